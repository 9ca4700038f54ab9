use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ClimaterixError;
use crate::types::{Money, Tonnes, Years};
use crate::ClimaterixResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A discrete emission-reduction lever: one immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Initiative {
    /// Unique identifier within a catalog.
    pub name: String,
    /// Upfront investment cost.
    pub cost: Money,
    /// Annual emissions reduction in tCO2e.
    pub reduction: Tonnes,
    /// Vendor-quoted standalone payback period in years.
    pub payback_years: Years,
}

/// A named mapping of initiative name → entry. Catalogs are injected into the
/// engine rather than hardcoded, so presentation variants and test fixtures
/// can substitute their own tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitiativeCatalog {
    entries: BTreeMap<String, Initiative>,
}

/// Qualitative delivery-risk classification for a predefined bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// A predefined scenario bundle: a fixed set of initiative names with a
/// description and a risk rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioBundle {
    pub name: String,
    pub description: String,
    pub initiatives: Vec<String>,
    pub risk_level: RiskLevel,
}

/// The table of predefined bundles available for selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundleTable {
    bundles: Vec<ScenarioBundle>,
}

// ---------------------------------------------------------------------------
// InitiativeCatalog
// ---------------------------------------------------------------------------

impl InitiativeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from entries, validating each field invariant.
    pub fn from_entries(
        entries: impl IntoIterator<Item = Initiative>,
    ) -> ClimaterixResult<Self> {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry)?;
        }
        Ok(catalog)
    }

    /// Insert one entry. Rejects negative cost or reduction and non-positive
    /// payback; replaces any previous entry with the same name.
    pub fn insert(&mut self, entry: Initiative) -> ClimaterixResult<()> {
        if entry.cost < Decimal::ZERO {
            return Err(ClimaterixError::InvalidInput {
                field: format!("catalog[{}].cost", entry.name),
                reason: "Investment cost cannot be negative".into(),
            });
        }
        if entry.reduction < Decimal::ZERO {
            return Err(ClimaterixError::InvalidInput {
                field: format!("catalog[{}].reduction", entry.name),
                reason: "Reduction cannot be negative".into(),
            });
        }
        if entry.payback_years <= Decimal::ZERO {
            return Err(ClimaterixError::InvalidInput {
                field: format!("catalog[{}].payback_years", entry.name),
                reason: "Payback period must be positive".into(),
            });
        }
        self.entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Initiative> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Initiative> {
        self.entries.values()
    }
}

// ---------------------------------------------------------------------------
// BundleTable
// ---------------------------------------------------------------------------

impl BundleTable {
    pub fn new(bundles: Vec<ScenarioBundle>) -> Self {
        Self { bundles }
    }

    pub fn get(&self, name: &str) -> Option<&ScenarioBundle> {
        self.bundles.iter().find(|b| b.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScenarioBundle> {
        self.bundles.iter()
    }

    /// Check every bundle against a catalog. A bundle referencing an unknown
    /// initiative is a configuration error, surfaced with the offending name.
    pub fn validate(&self, catalog: &InitiativeCatalog) -> ClimaterixResult<()> {
        for bundle in &self.bundles {
            for name in &bundle.initiatives {
                if !catalog.contains(name) {
                    return Err(ClimaterixError::UnknownInitiative {
                        name: name.clone(),
                        context: format!("bundle '{}'", bundle.name),
                    });
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Built-in catalog variants
// ---------------------------------------------------------------------------

pub const RENEWABLE_ENERGY: &str = "Renewable Energy (50% of grid)";
pub const DATA_CENTER_EFFICIENCY: &str = "Data Center Efficiency Upgrade";
pub const CLOUD_MIGRATION: &str = "Cloud Migration (30% workloads)";
pub const EV_FLEET: &str = "EV Fleet Transition";
pub const REMOTE_WORK: &str = "Remote Work Policy (40% WFH)";
pub const SUSTAINABLE_PROCUREMENT: &str = "Sustainable Procurement";

fn entry(name: &str, cost: Money, reduction: Tonnes, payback_years: Years) -> Initiative {
    Initiative {
        name: name.to_string(),
        cost,
        reduction,
        payback_years,
    }
}

/// The full operations-decision catalog: all six reduction levers.
pub fn operations_catalog() -> InitiativeCatalog {
    // Constants satisfy the insert invariants, so this cannot fail.
    InitiativeCatalog::from_entries([
        entry(RENEWABLE_ENERGY, dec!(12_000_000), dec!(35_000), dec!(6)),
        entry(DATA_CENTER_EFFICIENCY, dec!(5_000_000), dec!(18_000), dec!(4)),
        entry(CLOUD_MIGRATION, dec!(8_000_000), dec!(12_000), dec!(8)),
        entry(EV_FLEET, dec!(3_000_000), dec!(8_000), dec!(5)),
        entry(REMOTE_WORK, dec!(500_000), dec!(6_500), dec!(1)),
        entry(SUSTAINABLE_PROCUREMENT, dec!(1_000_000), dec!(4_200), dec!(3)),
    ])
    .unwrap_or_default()
}

/// The financial-analysis catalog variant: the four capital-investment levers.
pub fn financial_catalog() -> InitiativeCatalog {
    InitiativeCatalog::from_entries([
        entry(RENEWABLE_ENERGY, dec!(12_000_000), dec!(35_000), dec!(6)),
        entry(DATA_CENTER_EFFICIENCY, dec!(5_000_000), dec!(18_000), dec!(4)),
        entry(CLOUD_MIGRATION, dec!(8_000_000), dec!(12_000), dec!(8)),
        entry(EV_FLEET, dec!(3_000_000), dec!(8_000), dec!(5)),
    ])
    .unwrap_or_default()
}

/// The predefined bundle table matching the operations catalog.
pub fn default_bundles() -> BundleTable {
    let bundle = |name: &str, description: &str, initiatives: &[&str], risk_level| {
        ScenarioBundle {
            name: name.to_string(),
            description: description.to_string(),
            initiatives: initiatives.iter().map(|s| s.to_string()).collect(),
            risk_level,
        }
    };

    BundleTable::new(vec![
        bundle(
            "Conservative (Low Risk)",
            "Low investment, proven technologies, minimal operational disruption",
            &[REMOTE_WORK, SUSTAINABLE_PROCUREMENT, EV_FLEET],
            RiskLevel::Low,
        ),
        bundle(
            "Balanced (Recommended)",
            "Optimal balance of cost, impact, and feasibility",
            &[RENEWABLE_ENERGY, DATA_CENTER_EFFICIENCY, REMOTE_WORK, EV_FLEET],
            RiskLevel::Medium,
        ),
        bundle(
            "Aggressive (High Impact)",
            "Maximum emissions reduction, requires significant investment and change management",
            &[
                RENEWABLE_ENERGY,
                DATA_CENTER_EFFICIENCY,
                CLOUD_MIGRATION,
                EV_FLEET,
                REMOTE_WORK,
                SUSTAINABLE_PROCUREMENT,
            ],
            RiskLevel::High,
        ),
        bundle(
            "Energy Focus",
            "Focused on energy efficiency and renewable sources",
            &[RENEWABLE_ENERGY, DATA_CENTER_EFFICIENCY],
            RiskLevel::Medium,
        ),
        bundle(
            "Operational Efficiency",
            "Optimize operations and infrastructure without major capital investments",
            &[DATA_CENTER_EFFICIENCY, CLOUD_MIGRATION, REMOTE_WORK],
            RiskLevel::Low,
        ),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_operations_catalog_complete() {
        let catalog = operations_catalog();
        assert_eq!(catalog.len(), 6);
        let renewable = catalog.get(RENEWABLE_ENERGY).unwrap();
        assert_eq!(renewable.cost, dec!(12_000_000));
        assert_eq!(renewable.reduction, dec!(35_000));
        assert_eq!(renewable.payback_years, dec!(6));
    }

    #[test]
    fn test_financial_catalog_is_subset() {
        let ops = operations_catalog();
        let fin = financial_catalog();
        assert_eq!(fin.len(), 4);
        for initiative in fin.iter() {
            assert_eq!(ops.get(&initiative.name), Some(initiative));
        }
    }

    #[test]
    fn test_insert_rejects_negative_cost() {
        let mut catalog = InitiativeCatalog::new();
        let result = catalog.insert(entry("Bad", dec!(-1), dec!(100), dec!(2)));
        assert!(matches!(
            result,
            Err(ClimaterixError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_insert_rejects_zero_payback() {
        let mut catalog = InitiativeCatalog::new();
        let result = catalog.insert(entry("Bad", dec!(1), dec!(100), dec!(0)));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_bundles_validate_against_operations_catalog() {
        let catalog = operations_catalog();
        default_bundles().validate(&catalog).unwrap();
    }

    #[test]
    fn test_bundle_validation_catches_unknown_initiative() {
        let catalog = financial_catalog();
        // The default bundles reference Remote Work, absent from the
        // financial variant.
        let err = default_bundles().validate(&catalog).unwrap_err();
        match err {
            ClimaterixError::UnknownInitiative { name, .. } => {
                assert!(!catalog.contains(&name));
            }
            other => panic!("Expected UnknownInitiative, got: {other:?}"),
        }
    }

    #[test]
    fn test_catalog_iteration_is_name_ordered() {
        let catalog = operations_catalog();
        let names: Vec<&str> = catalog.iter().map(|i| i.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
