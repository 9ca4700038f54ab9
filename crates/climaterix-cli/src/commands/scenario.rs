use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use climaterix_core::catalog::{default_bundles, operations_catalog};
use climaterix_core::params::FinancialParameters;
use climaterix_core::scenario::{
    self, ScenarioInput, DEFAULT_BASELINE_EMISSIONS,
};

use crate::input;

/// Arguments for scenario evaluation
#[derive(Args)]
pub struct ScenarioArgs {
    /// Predefined bundle name, e.g. "Balanced (Recommended)"
    #[arg(long)]
    pub bundle: Option<String>,

    /// Initiative name to include; repeat for a custom selection
    #[arg(long = "initiative")]
    pub initiatives: Vec<String>,

    /// Carbon price in currency per tCO2e
    #[arg(long)]
    pub carbon_price: Option<Decimal>,

    /// Electricity price in currency per MWh
    #[arg(long)]
    pub electricity_price: Option<Decimal>,

    /// Discount rate in percentage points (5 = 5%)
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    /// Analysis horizon in years
    #[arg(long)]
    pub horizon: Option<u32>,

    /// Baseline annual emissions in tCO2e (defaults to the demo baseline;
    /// pass "none" semantics by supplying a full --input file instead)
    #[arg(long)]
    pub baseline: Option<Decimal>,

    /// Also project baseline vs. scenario emissions over this many years
    #[arg(long)]
    pub project_years: Option<u32>,

    /// Path to a JSON or YAML file with the full scenario input
    /// (catalog, bundles, selection, parameters)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_scenario(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario_input: ScenarioInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let selection = super::selection_from_flags(args.bundle, args.initiatives)?;
        let defaults = FinancialParameters::default();
        ScenarioInput {
            catalog: operations_catalog(),
            bundles: default_bundles(),
            selection,
            params: FinancialParameters {
                carbon_price: args.carbon_price.unwrap_or(defaults.carbon_price),
                electricity_price: args
                    .electricity_price
                    .unwrap_or(defaults.electricity_price),
                discount_rate_pct: args.discount_rate.unwrap_or(defaults.discount_rate_pct),
                horizon_years: args.horizon.unwrap_or(defaults.horizon_years),
                energy_savings_fraction: defaults.energy_savings_fraction,
            },
            baseline_emissions: Some(args.baseline.unwrap_or(DEFAULT_BASELINE_EMISSIONS)),
        }
    };

    let outcome = scenario::evaluate_scenario(&scenario_input)?;
    let mut value = serde_json::to_value(&outcome)?;

    if let Some(years) = args.project_years {
        let baseline = scenario_input
            .baseline_emissions
            .ok_or("--project-years needs a baseline (set --baseline or baseline_emissions)")?;
        let projection =
            scenario::project_emissions(baseline, outcome.result.total_reduction, years)?;
        if let Some(map) = value.as_object_mut() {
            map.insert("projection".to_string(), serde_json::to_value(&projection)?);
        }
    }

    Ok(value)
}
