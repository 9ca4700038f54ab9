use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ClimaterixError;
use crate::types::Percent;
use crate::ClimaterixResult;

/// kg CO2e per kWh of natural gas burned.
pub const NATURAL_GAS_FACTOR: Decimal = dec!(0.2);
/// kg CO2e per liter of diesel.
pub const DIESEL_FACTOR: Decimal = dec!(2.7);
/// kg CO2e per MJ of process heat or steam.
pub const PROCESS_HEAT_FACTOR: Decimal = dec!(0.06);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Manufacturing energy consumption per functional unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyInputs {
    pub electricity_kwh: Decimal,
    /// Location-dependent grid intensity in kg CO2e/kWh (EU avg ~0.3,
    /// US avg ~0.4).
    pub grid_factor: Decimal,
    /// Share of electricity from renewable sources, 0-100. Renewable
    /// electricity is credited at zero grid emissions.
    pub renewable_pct: Percent,
    pub natural_gas_kwh: Decimal,
    pub diesel_liters: Decimal,
    pub process_heat_mj: Decimal,
}

/// Per-source manufacturing impact, kg CO2e per functional unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyBreakdown {
    pub electricity: Decimal,
    pub natural_gas: Decimal,
    pub diesel: Decimal,
    pub process_heat: Decimal,
    pub total: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Manufacturing energy footprint. Electricity is scaled by the non-renewable
/// share of the mix; the other sources apply their factors directly.
pub fn energy_footprint(inputs: &EnergyInputs) -> ClimaterixResult<EnergyBreakdown> {
    validate(inputs)?;

    let grid_share = Decimal::ONE - inputs.renewable_pct / dec!(100);
    let electricity = inputs.electricity_kwh * inputs.grid_factor * grid_share;
    let natural_gas = inputs.natural_gas_kwh * NATURAL_GAS_FACTOR;
    let diesel = inputs.diesel_liters * DIESEL_FACTOR;
    let process_heat = inputs.process_heat_mj * PROCESS_HEAT_FACTOR;

    Ok(EnergyBreakdown {
        electricity,
        natural_gas,
        diesel,
        process_heat,
        total: electricity + natural_gas + diesel + process_heat,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate(inputs: &EnergyInputs) -> ClimaterixResult<()> {
    let nonnegative = [
        ("electricity_kwh", inputs.electricity_kwh),
        ("grid_factor", inputs.grid_factor),
        ("natural_gas_kwh", inputs.natural_gas_kwh),
        ("diesel_liters", inputs.diesel_liters),
        ("process_heat_mj", inputs.process_heat_mj),
    ];
    for (field, value) in nonnegative {
        if value < Decimal::ZERO {
            return Err(ClimaterixError::InvalidInput {
                field: field.into(),
                reason: "Energy quantities and factors cannot be negative".into(),
            });
        }
    }
    if inputs.renewable_pct < Decimal::ZERO || inputs.renewable_pct > dec!(100) {
        return Err(ClimaterixError::InvalidInput {
            field: "renewable_pct".into(),
            reason: "Renewable share must be between 0 and 100 percent".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_inputs() -> EnergyInputs {
        EnergyInputs {
            electricity_kwh: dec!(150),
            grid_factor: dec!(0.45),
            renewable_pct: dec!(25),
            natural_gas_kwh: dec!(50),
            diesel_liters: dec!(2),
            process_heat_mj: dec!(500),
        }
    }

    #[test]
    fn test_footprint_reference_values() {
        let breakdown = energy_footprint(&sample_inputs()).unwrap();
        // 150 * 0.45 * 0.75 = 50.625
        assert_eq!(breakdown.electricity, dec!(50.625));
        assert_eq!(breakdown.natural_gas, dec!(10));
        assert_eq!(breakdown.diesel, dec!(5.4));
        assert_eq!(breakdown.process_heat, dec!(30));
        assert_eq!(breakdown.total, dec!(96.025));
    }

    #[test]
    fn test_fully_renewable_electricity_is_zero_impact() {
        let mut inputs = sample_inputs();
        inputs.renewable_pct = dec!(100);
        let breakdown = energy_footprint(&inputs).unwrap();
        assert_eq!(breakdown.electricity, Decimal::ZERO);
        // Non-electric sources are unaffected by the renewable share.
        assert_eq!(breakdown.natural_gas, dec!(10));
    }

    #[test]
    fn test_renewable_share_above_100_rejected() {
        let mut inputs = sample_inputs();
        inputs.renewable_pct = dec!(101);
        assert!(energy_footprint(&inputs).is_err());
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let mut inputs = sample_inputs();
        inputs.diesel_liters = dec!(-1);
        assert!(energy_footprint(&inputs).is_err());
    }

    #[test]
    fn test_all_zero_inputs_yield_zero_total() {
        let inputs = EnergyInputs {
            electricity_kwh: Decimal::ZERO,
            grid_factor: Decimal::ZERO,
            renewable_pct: Decimal::ZERO,
            natural_gas_kwh: Decimal::ZERO,
            diesel_liters: Decimal::ZERO,
            process_heat_mj: Decimal::ZERO,
        };
        assert_eq!(energy_footprint(&inputs).unwrap().total, Decimal::ZERO);
    }
}
