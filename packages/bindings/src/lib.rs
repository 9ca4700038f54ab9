use napi::Result as NapiResult;
use napi_derive::napi;

use serde::Deserialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Scenario analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_scenario(input_json: String) -> NapiResult<String> {
    let input: climaterix_core::scenario::ScenarioInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        climaterix_core::scenario::evaluate_scenario(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn sweep_npv(input_json: String) -> NapiResult<String> {
    let input: climaterix_core::sensitivity::SweepInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = climaterix_core::sensitivity::sweep(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Input for selection resolution: the bundle table plus the selection.
#[derive(Deserialize)]
struct ResolveSelectionInput {
    bundles: climaterix_core::catalog::BundleTable,
    selection: climaterix_core::selector::SelectionSpec,
}

#[napi]
pub fn resolve_selection(input_json: String) -> NapiResult<String> {
    let input: ResolveSelectionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let selected = climaterix_core::selector::resolve(&input.bundles, &input.selection)
        .map_err(to_napi_error)?;
    let names: Vec<String> = selected.into_iter().collect();
    serde_json::to_string(&names).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// LCA
// ---------------------------------------------------------------------------

#[napi]
pub fn run_lca(input_json: String) -> NapiResult<String> {
    let input: climaterix_core::lca::LcaInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = climaterix_core::lca::assess(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
