use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::catalog::InitiativeCatalog;
use crate::error::ClimaterixError;
use crate::types::{Money, Percent, Tonnes};
use crate::ClimaterixResult;

/// Share of each avoided tonne assumed to carry an energy-cost saving on top
/// of the carbon-price saving. Domain default; overridable per computation
/// via `FinancialParameters::energy_savings_fraction`.
pub const ENERGY_SAVINGS_FRACTION: Decimal = dec!(0.4);

/// Cost and reduction totals over a selected initiative subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionAggregate {
    pub total_cost: Money,
    pub total_reduction: Tonnes,
}

impl SelectionAggregate {
    pub const ZERO: SelectionAggregate = SelectionAggregate {
        total_cost: Decimal::ZERO,
        total_reduction: Decimal::ZERO,
    };
}

/// Sum cost and reduction over the catalog entries named in `selected`.
///
/// An empty selection yields the zero aggregate — a valid "nothing chosen"
/// result, left to the presentation layer to prompt on. A name missing from
/// the catalog means the selector and the catalog were wired against
/// different tables and aborts the computation.
pub fn aggregate(
    catalog: &InitiativeCatalog,
    selected: &BTreeSet<String>,
) -> ClimaterixResult<SelectionAggregate> {
    let mut total_cost = Decimal::ZERO;
    let mut total_reduction = Decimal::ZERO;

    for name in selected {
        let initiative =
            catalog
                .get(name)
                .ok_or_else(|| ClimaterixError::UnknownInitiative {
                    name: name.clone(),
                    context: "selection".into(),
                })?;
        total_cost += initiative.cost;
        total_reduction += initiative.reduction;
    }

    Ok(SelectionAggregate {
        total_cost,
        total_reduction,
    })
}

/// Annual savings from an aggregate reduction:
///
/// `reduction * carbon_price + reduction * energy_fraction * electricity_price / 1000`
///
/// The second term credits the assumed energy-side share of the reduction at
/// the electricity price (per MWh, hence the /1000 against tonne-denominated
/// reduction). Negative inputs are rejected, never clamped.
pub fn annual_savings(
    total_reduction: Tonnes,
    carbon_price: Money,
    electricity_price: Money,
    energy_fraction: Percent,
) -> ClimaterixResult<Money> {
    if total_reduction < Decimal::ZERO {
        return Err(ClimaterixError::InvalidInput {
            field: "total_reduction".into(),
            reason: "Reduction cannot be negative".into(),
        });
    }
    if carbon_price < Decimal::ZERO {
        return Err(ClimaterixError::InvalidInput {
            field: "carbon_price".into(),
            reason: "Carbon price cannot be negative".into(),
        });
    }
    if electricity_price < Decimal::ZERO {
        return Err(ClimaterixError::InvalidInput {
            field: "electricity_price".into(),
            reason: "Electricity price cannot be negative".into(),
        });
    }
    if energy_fraction < Decimal::ZERO || energy_fraction > Decimal::ONE {
        return Err(ClimaterixError::InvalidInput {
            field: "energy_fraction".into(),
            reason: "Energy fraction must be between 0 and 1".into(),
        });
    }

    let carbon_savings = total_reduction * carbon_price;
    let energy_savings = total_reduction * energy_fraction * electricity_price / dec!(1000);
    Ok(carbon_savings + energy_savings)
}
