use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use climaterix_core::aggregate;
use climaterix_core::catalog::{default_bundles, operations_catalog};
use climaterix_core::params::FinancialParameters;
use climaterix_core::selector;
use climaterix_core::sensitivity::{self, SweepInput, SweepParameter};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SweepTarget {
    CarbonPrice,
    DiscountRate,
}

impl From<SweepTarget> for SweepParameter {
    fn from(target: SweepTarget) -> Self {
        match target {
            SweepTarget::CarbonPrice => SweepParameter::CarbonPrice,
            SweepTarget::DiscountRate => SweepParameter::DiscountRatePct,
        }
    }
}

/// Arguments for a one-way NPV sensitivity sweep
#[derive(Args)]
pub struct SensitivityArgs {
    /// Parameter to vary
    #[arg(long, value_enum)]
    pub parameter: Option<SweepTarget>,

    /// Explicit grid values, comma-separated (e.g. "50,100,150")
    #[arg(long)]
    pub grid: Option<String>,

    /// Grid as min:max:step (e.g. "50:150:25"); alternative to --grid
    #[arg(long)]
    pub range: Option<String>,

    /// Predefined bundle name
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

    /// Discount rate in percentage points
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    /// Analysis horizon in years
    #[arg(long)]
    pub horizon: Option<u32>,

    /// Path to a JSON or YAML file with the full sweep input
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sweep_input: SweepInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let parameter = args
            .parameter
            .ok_or("--parameter is required (or provide --input)")?;
        let grid = parse_grid(args.grid.as_deref(), args.range.as_deref())?;

        let selection = super::selection_from_flags(args.bundle, args.initiatives)?;
        let catalog = operations_catalog();
        let selected = selector::resolve(&default_bundles(), &selection)?;
        let agg = aggregate::aggregate(&catalog, &selected)?;

        let defaults = FinancialParameters::default();
        SweepInput {
            parameter: parameter.into(),
            grid,
            aggregate: agg,
            params: FinancialParameters {
                carbon_price: args.carbon_price.unwrap_or(defaults.carbon_price),
                electricity_price: args
                    .electricity_price
                    .unwrap_or(defaults.electricity_price),
                discount_rate_pct: args.discount_rate.unwrap_or(defaults.discount_rate_pct),
                horizon_years: args.horizon.unwrap_or(defaults.horizon_years),
                energy_savings_fraction: defaults.energy_savings_fraction,
            },
        }
    };

    let result = sensitivity::sweep(&sweep_input)?;
    Ok(serde_json::to_value(&result)?)
}

/// Accept either an explicit comma-separated grid or a min:max:step range.
fn parse_grid(
    grid: Option<&str>,
    range: Option<&str>,
) -> Result<Vec<Decimal>, Box<dyn std::error::Error>> {
    match (grid, range) {
        (Some(_), Some(_)) => Err("--grid and --range are mutually exclusive".into()),
        (Some(list), None) => list
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<Decimal>()
                    .map_err(|e| format!("Invalid grid value '{}': {}", part.trim(), e).into())
            })
            .collect(),
        (None, Some(spec)) => {
            let parts: Vec<&str> = spec.split(':').collect();
            if parts.len() != 3 {
                return Err(format!("--range must be min:max:step, got '{spec}'").into());
            }
            let min: Decimal = parts[0].parse()?;
            let max: Decimal = parts[1].parse()?;
            let step: Decimal = parts[2].parse()?;
            if step <= Decimal::ZERO {
                return Err("--range step must be positive".into());
            }
            let mut values = Vec::new();
            let mut current = min;
            while current <= max {
                values.push(current);
                current += step;
            }
            if values.is_empty() {
                values.push(min);
            }
            Ok(values)
        }
        (None, None) => Err("Provide --grid or --range (or --input)".into()),
    }
}
