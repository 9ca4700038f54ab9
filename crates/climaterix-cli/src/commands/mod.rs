pub mod catalog;
pub mod lca;
pub mod scenario;
pub mod sensitivity;

use std::collections::BTreeMap;

use climaterix_core::selector::SelectionSpec;

/// Build a selection from the shared `--bundle` / `--initiative` flags.
/// Exactly one of the two forms must be used.
pub fn selection_from_flags(
    bundle: Option<String>,
    initiatives: Vec<String>,
) -> Result<SelectionSpec, Box<dyn std::error::Error>> {
    match (bundle, initiatives.is_empty()) {
        (Some(_), false) => {
            Err("--bundle and --initiative are mutually exclusive".into())
        }
        (Some(name), true) => Ok(SelectionSpec::Bundle(name)),
        (None, false) => {
            let chosen: BTreeMap<String, bool> =
                initiatives.into_iter().map(|name| (name, true)).collect();
            Ok(SelectionSpec::Custom(chosen))
        }
        (None, true) => {
            Err("Provide --bundle <name> or one or more --initiative <name>".into())
        }
    }
}
