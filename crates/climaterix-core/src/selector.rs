use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::BundleTable;
use crate::error::ClimaterixError;
use crate::ClimaterixResult;

/// How a user picked their initiatives: a predefined bundle by name, or an
/// ad-hoc set of per-initiative toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSpec {
    Bundle(String),
    Custom(BTreeMap<String, bool>),
}

/// Resolve a selection spec into the set of included initiative names.
///
/// A bundle name not present in the table is a configuration error: the
/// bundle table and the UI offering it have diverged. Custom selections
/// return exactly the toggled-on subset; membership against the catalog is
/// checked downstream by the aggregation engine.
pub fn resolve(
    bundles: &BundleTable,
    spec: &SelectionSpec,
) -> ClimaterixResult<BTreeSet<String>> {
    match spec {
        SelectionSpec::Bundle(name) => {
            let bundle = bundles
                .get(name)
                .ok_or_else(|| ClimaterixError::UnknownBundle(name.clone()))?;
            Ok(bundle.initiatives.iter().cloned().collect())
        }
        SelectionSpec::Custom(toggles) => Ok(toggles
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.clone())
            .collect()),
    }
}
