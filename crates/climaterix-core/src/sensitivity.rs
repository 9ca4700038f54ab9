use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::aggregate::{annual_savings, SelectionAggregate};
use crate::error::ClimaterixError;
use crate::params::FinancialParameters;
use crate::projector::npv;
use crate::types::{with_metadata, ComputationOutput, SeriesPoint};
use crate::ClimaterixResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which parameter a sweep varies while all others stay fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    /// Re-derives annual savings per grid value; the energy-price credit
    /// stays anchored to the base electricity price.
    CarbonPrice,
    /// Reuses the base annual savings and only changes discounting.
    DiscountRatePct,
}

/// Input for a one-way NPV sensitivity sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepInput {
    pub parameter: SweepParameter,
    /// Caller-supplied grid, any finite ordering. Output preserves it.
    pub grid: Vec<Decimal>,
    pub aggregate: SelectionAggregate,
    pub params: FinancialParameters,
}

/// One-way sweep output: NPV per grid value, in grid order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepOutput {
    pub parameter: SweepParameter,
    /// (grid value, npv) pairs in the exact order the grid was supplied —
    /// charts must render the grid as given, not sorted by result.
    pub points: Vec<SeriesPoint>,
    /// NPV at the unmodified base parameters, for reference lines.
    pub base_npv: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Recompute NPV across a grid of alternate values for one parameter,
/// holding the selection aggregate and all other parameters fixed.
pub fn sweep(input: &SweepInput) -> ClimaterixResult<ComputationOutput<SweepOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    input.params.validate()?;
    if input.grid.is_empty() {
        return Err(ClimaterixError::InsufficientData(
            "Sweep grid must contain at least one value".into(),
        ));
    }

    let base_savings = base_annual_savings(&input.aggregate, &input.params)?;
    let base_npv = npv(
        input.aggregate.total_cost,
        base_savings,
        input.params.discount_rate_pct,
        input.params.horizon_years,
    )?;

    let mut points = Vec::with_capacity(input.grid.len());
    for &value in &input.grid {
        let point_npv = match input.parameter {
            SweepParameter::CarbonPrice => {
                let savings = annual_savings(
                    input.aggregate.total_reduction,
                    value,
                    input.params.electricity_price,
                    input.params.energy_savings_fraction,
                )?;
                npv(
                    input.aggregate.total_cost,
                    savings,
                    input.params.discount_rate_pct,
                    input.params.horizon_years,
                )?
            }
            SweepParameter::DiscountRatePct => npv(
                input.aggregate.total_cost,
                base_savings,
                value,
                input.params.horizon_years,
            )?,
        };
        points.push(SeriesPoint {
            x: value,
            y: point_npv,
        });
    }

    let output = SweepOutput {
        parameter: input.parameter,
        points,
        base_npv,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "One-Way NPV Sensitivity Sweep",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn base_annual_savings(
    aggregate: &SelectionAggregate,
    params: &FinancialParameters,
) -> ClimaterixResult<Decimal> {
    annual_savings(
        aggregate.total_reduction,
        params.carbon_price,
        params.electricity_price,
        params.energy_savings_fraction,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
