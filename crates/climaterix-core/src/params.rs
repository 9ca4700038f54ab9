use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::aggregate::ENERGY_SAVINGS_FRACTION;
use crate::error::ClimaterixError;
use crate::types::{Money, Percent};
use crate::ClimaterixResult;

/// Horizons beyond this accumulate enough discount-factor precision loss to
/// warrant a warning (the computation still runs).
pub const RECOMMENDED_MAX_HORIZON: u32 = 50;

/// Externally supplied pricing and discounting parameters, immutable for the
/// duration of one computation. Validated fail-fast at the boundary: no
/// partial results are produced from rejected parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialParameters {
    /// Carbon price in currency per tCO2e.
    pub carbon_price: Money,
    /// Electricity price in currency per MWh.
    pub electricity_price: Money,
    /// Discount rate in percentage points (5 = 5%).
    pub discount_rate_pct: Percent,
    /// Analysis horizon in whole years.
    pub horizon_years: u32,
    /// Share of reduction credited with energy-cost savings; defaults to the
    /// domain constant when omitted from serialized input.
    #[serde(default = "default_energy_fraction")]
    pub energy_savings_fraction: Decimal,
}

fn default_energy_fraction() -> Decimal {
    ENERGY_SAVINGS_FRACTION
}

impl Default for FinancialParameters {
    /// The demo defaults: €100/t carbon, €120/MWh electricity, 5% discount
    /// rate over a 10-year horizon.
    fn default() -> Self {
        Self {
            carbon_price: dec!(100),
            electricity_price: dec!(120),
            discount_rate_pct: dec!(5),
            horizon_years: 10,
            energy_savings_fraction: ENERGY_SAVINGS_FRACTION,
        }
    }
}

impl FinancialParameters {
    pub fn validate(&self) -> ClimaterixResult<()> {
        if self.carbon_price < Decimal::ZERO {
            return Err(ClimaterixError::InvalidInput {
                field: "carbon_price".into(),
                reason: "Carbon price cannot be negative".into(),
            });
        }
        if self.electricity_price < Decimal::ZERO {
            return Err(ClimaterixError::InvalidInput {
                field: "electricity_price".into(),
                reason: "Electricity price cannot be negative".into(),
            });
        }
        if self.discount_rate_pct < Decimal::ZERO || self.discount_rate_pct > dec!(100) {
            return Err(ClimaterixError::InvalidInput {
                field: "discount_rate_pct".into(),
                reason: "Discount rate must be between 0 and 100 percent".into(),
            });
        }
        if self.horizon_years == 0 {
            return Err(ClimaterixError::InvalidInput {
                field: "horizon_years".into(),
                reason: "Analysis horizon must be a positive number of years".into(),
            });
        }
        if self.energy_savings_fraction < Decimal::ZERO
            || self.energy_savings_fraction > Decimal::ONE
        {
            return Err(ClimaterixError::InvalidInput {
                field: "energy_savings_fraction".into(),
                reason: "Energy fraction must be between 0 and 1".into(),
            });
        }
        Ok(())
    }
}
