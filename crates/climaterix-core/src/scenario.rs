use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::aggregate::{aggregate, SelectionAggregate};
use crate::catalog::{BundleTable, InitiativeCatalog};
use crate::params::{FinancialParameters, RECOMMENDED_MAX_HORIZON};
use crate::projector::{
    break_even_year, cumulative_cashflow_series, simple_payback, SimplePayback,
};
use crate::selector::{resolve, SelectionSpec};
use crate::types::{with_metadata, CashFlowPoint, ComputationOutput, Money, SeriesPoint, Tonnes};
use crate::ClimaterixResult;

/// The demo company's current annual footprint in tCO2e.
pub const DEFAULT_BASELINE_EMISSIONS: Decimal = dec!(234_560);

/// Organic year-on-year emissions decline assumed for projection paths
/// (efficiency gains that happen with or without initiatives).
pub const BASELINE_DECAY: Decimal = dec!(0.98);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input to a full scenario evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub catalog: InitiativeCatalog,
    pub bundles: BundleTable,
    pub selection: SelectionSpec,
    pub params: FinancialParameters,
    /// Current annual emissions, for the "new emissions" delta. Optional:
    /// pure financial analyses can omit it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_emissions: Option<Tonnes>,
}

/// One selected initiative's contribution to the scenario, for the
/// cost-effectiveness table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiativeContribution {
    pub name: String,
    pub cost: Money,
    pub reduction: Tonnes,
    pub payback_years: Decimal,
    /// cost / reduction; absent for zero-reduction entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_tonne: Option<Decimal>,
}

/// The fully recomputed scenario outcome. Stateless: derived from
/// {selection, parameters, catalog} on every evaluation, never partially
/// updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub selected: Vec<String>,
    pub total_investment: Money,
    pub total_reduction: Tonnes,
    pub carbon_cost_savings: Money,
    pub energy_cost_savings: Money,
    pub total_annual_savings: Money,
    pub simple_payback: SimplePayback,
    pub npv: Money,
    pub cashflow_series: Vec<CashFlowPoint>,
    /// None means no break-even within the horizon — a valid outcome.
    pub break_even_year: Option<u32>,
    /// Contributions ranked ascending by cost per tonne.
    pub cost_effectiveness: Vec<InitiativeContribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_annual_emissions: Option<Tonnes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduction_pct_of_baseline: Option<Decimal>,
}

/// Baseline-vs-scenario emissions paths over a projection window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmissionsProjection {
    pub baseline_path: Vec<SeriesPoint>,
    pub scenario_path: Vec<SeriesPoint>,
    pub cumulative_avoided: Tonnes,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate one scenario end to end: resolve the selection, aggregate it,
/// derive savings, and project the financials.
pub fn evaluate_scenario(
    input: &ScenarioInput,
) -> ClimaterixResult<ComputationOutput<ScenarioOutcome>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // Fail fast: parameters first, then catalog/bundle wiring.
    input.params.validate()?;
    input.bundles.validate(&input.catalog)?;

    if input.params.horizon_years > RECOMMENDED_MAX_HORIZON {
        warnings.push(format!(
            "Horizon of {} years exceeds the recommended maximum of {}; \
             discount factors lose precision at long horizons",
            input.params.horizon_years, RECOMMENDED_MAX_HORIZON
        ));
    }

    let selected = resolve(&input.bundles, &input.selection)?;
    if selected.is_empty() {
        warnings.push("No initiatives selected; all outcome totals are zero".into());
    }

    let agg = aggregate(&input.catalog, &selected)?;

    let (carbon_cost_savings, energy_cost_savings) = split_savings(&agg, &input.params);
    let total_annual_savings = carbon_cost_savings + energy_cost_savings;

    let payback = simple_payback(agg.total_cost, total_annual_savings)?;
    let cashflow_series = cumulative_cashflow_series(
        agg.total_cost,
        total_annual_savings,
        input.params.discount_rate_pct,
        input.params.horizon_years,
    )?;
    let npv = cashflow_series
        .last()
        .map(|p| p.cumulative)
        .unwrap_or(Decimal::ZERO);
    let break_even = break_even_year(&cashflow_series);

    let cost_effectiveness = rank_cost_effectiveness(&input.catalog, &selected)?;

    let (new_annual_emissions, reduction_pct_of_baseline) = match input.baseline_emissions {
        Some(baseline) => {
            let new_emissions = baseline - agg.total_reduction;
            if new_emissions < Decimal::ZERO {
                warnings.push(format!(
                    "Selected reductions ({} t) exceed the baseline ({} t)",
                    agg.total_reduction, baseline
                ));
            }
            let pct = if baseline > Decimal::ZERO {
                agg.total_reduction / baseline * dec!(100)
            } else {
                Decimal::ZERO
            };
            (Some(new_emissions), Some(pct))
        }
        None => (None, None),
    };

    let output = ScenarioOutcome {
        selected: selected.into_iter().collect(),
        total_investment: agg.total_cost,
        total_reduction: agg.total_reduction,
        carbon_cost_savings,
        energy_cost_savings,
        total_annual_savings,
        simple_payback: payback,
        npv,
        cashflow_series,
        break_even_year: break_even,
        cost_effectiveness,
        new_annual_emissions,
        reduction_pct_of_baseline,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "savings_formula": "reduction * carbon_price + reduction * energy_fraction * electricity_price / 1000",
        "energy_savings_fraction": input.params.energy_savings_fraction,
        "discounting": "end-of-year, whole-year periods",
        "carbon_price_unit": "currency per tCO2e",
        "electricity_price_unit": "currency per MWh",
    });

    Ok(with_metadata(
        "Emissions Reduction Scenario Analysis",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// Project baseline and post-initiative emissions paths forward, applying
/// the organic decline factor to both. Point 0 is the current year.
pub fn project_emissions(
    baseline: Tonnes,
    total_reduction: Tonnes,
    years: u32,
) -> ClimaterixResult<EmissionsProjection> {
    if baseline < Decimal::ZERO {
        return Err(crate::error::ClimaterixError::InvalidInput {
            field: "baseline".into(),
            reason: "Baseline emissions cannot be negative".into(),
        });
    }
    if years == 0 {
        return Err(crate::error::ClimaterixError::InvalidInput {
            field: "years".into(),
            reason: "Projection window must cover at least one year".into(),
        });
    }

    let scenario_start = baseline - total_reduction;

    let mut baseline_path = Vec::with_capacity(years as usize);
    let mut scenario_path = Vec::with_capacity(years as usize);
    let mut cumulative_avoided = Decimal::ZERO;

    let mut decay = Decimal::ONE;
    for year in 0..years {
        let baseline_value = baseline * decay;
        let scenario_value = scenario_start * decay;
        cumulative_avoided += baseline_value - scenario_value;
        baseline_path.push(SeriesPoint {
            x: Decimal::from(year),
            y: baseline_value,
        });
        scenario_path.push(SeriesPoint {
            x: Decimal::from(year),
            y: scenario_value,
        });
        decay *= BASELINE_DECAY;
    }

    Ok(EmissionsProjection {
        baseline_path,
        scenario_path,
        cumulative_avoided,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn split_savings(agg: &SelectionAggregate, params: &FinancialParameters) -> (Money, Money) {
    let carbon = agg.total_reduction * params.carbon_price;
    let energy =
        agg.total_reduction * params.energy_savings_fraction * params.electricity_price
            / dec!(1000);
    (carbon, energy)
}

fn rank_cost_effectiveness(
    catalog: &InitiativeCatalog,
    selected: &std::collections::BTreeSet<String>,
) -> ClimaterixResult<Vec<InitiativeContribution>> {
    let mut contributions = Vec::with_capacity(selected.len());
    for name in selected {
        let initiative =
            catalog
                .get(name)
                .ok_or_else(|| crate::error::ClimaterixError::UnknownInitiative {
                    name: name.clone(),
                    context: "cost-effectiveness ranking".into(),
                })?;
        let cost_per_tonne = if initiative.reduction > Decimal::ZERO {
            Some(initiative.cost / initiative.reduction)
        } else {
            None
        };
        contributions.push(InitiativeContribution {
            name: initiative.name.clone(),
            cost: initiative.cost,
            reduction: initiative.reduction,
            payback_years: initiative.payback_years,
            cost_per_tonne,
        });
    }

    // Cheapest abatement first; zero-reduction entries sink to the end.
    contributions.sort_by(|a, b| match (a.cost_per_tonne, b.cost_per_tonne) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    });

    Ok(contributions)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
