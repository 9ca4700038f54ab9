use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ClimaterixError;
use crate::ClimaterixResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Truck,
    Rail,
    Ship,
    Air,
}

impl TransportMode {
    /// kg CO2e per tonne-km.
    pub fn emission_factor(&self) -> Decimal {
        match self {
            TransportMode::Truck => dec!(0.062),
            TransportMode::Rail => dec!(0.022),
            TransportMode::Ship => dec!(0.008),
            TransportMode::Air => dec!(0.602),
        }
    }
}

/// One shipment leg: a weight moved a distance by one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportLeg {
    pub mode: TransportMode,
    pub distance_km: Decimal,
    pub weight_kg: Decimal,
}

/// Inbound (materials to factory) and outbound (factory to customer)
/// impacts, kg CO2e per functional unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportBreakdown {
    pub inbound: Decimal,
    pub outbound: Decimal,
    pub total: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Leg impact: `distance_km * weight_kg / 1000 * factor` (weight converted
/// to tonnes against the tonne-km factor).
pub fn leg_impact(leg: &TransportLeg) -> ClimaterixResult<Decimal> {
    if leg.distance_km < Decimal::ZERO {
        return Err(ClimaterixError::InvalidInput {
            field: "distance_km".into(),
            reason: "Transport distance cannot be negative".into(),
        });
    }
    if leg.weight_kg < Decimal::ZERO {
        return Err(ClimaterixError::InvalidInput {
            field: "weight_kg".into(),
            reason: "Transport weight cannot be negative".into(),
        });
    }
    Ok(leg.distance_km * leg.weight_kg / dec!(1000) * leg.mode.emission_factor())
}

pub fn transport_impact(
    inbound: &TransportLeg,
    outbound: &TransportLeg,
) -> ClimaterixResult<TransportBreakdown> {
    let inbound_impact = leg_impact(inbound)?;
    let outbound_impact = leg_impact(outbound)?;
    Ok(TransportBreakdown {
        inbound: inbound_impact,
        outbound: outbound_impact,
        total: inbound_impact + outbound_impact,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leg_impact_truck_reference() {
        let leg = TransportLeg {
            mode: TransportMode::Truck,
            distance_km: dec!(500),
            weight_kg: dec!(50),
        };
        // 500 * 50 / 1000 * 0.062 = 1.55
        assert_eq!(leg_impact(&leg).unwrap(), dec!(1.55));
    }

    #[test]
    fn test_air_is_heaviest_mode_per_tonne_km() {
        let factors = [
            TransportMode::Truck,
            TransportMode::Rail,
            TransportMode::Ship,
        ]
        .map(|m| m.emission_factor());
        for factor in factors {
            assert!(TransportMode::Air.emission_factor() > factor);
        }
        assert!(TransportMode::Ship.emission_factor() < TransportMode::Rail.emission_factor());
    }

    #[test]
    fn test_transport_impact_sums_legs() {
        let inbound = TransportLeg {
            mode: TransportMode::Truck,
            distance_km: dec!(500),
            weight_kg: dec!(50),
        };
        let outbound = TransportLeg {
            mode: TransportMode::Air,
            distance_km: dec!(2000),
            weight_kg: dec!(25),
        };
        let breakdown = transport_impact(&inbound, &outbound).unwrap();
        assert_eq!(breakdown.inbound, dec!(1.55));
        // 2000 * 25 / 1000 * 0.602 = 30.1
        assert_eq!(breakdown.outbound, dec!(30.1));
        assert_eq!(breakdown.total, dec!(31.65));
    }

    #[test]
    fn test_zero_weight_leg_is_zero_impact() {
        let leg = TransportLeg {
            mode: TransportMode::Ship,
            distance_km: dec!(10_000),
            weight_kg: Decimal::ZERO,
        };
        assert_eq!(leg_impact(&leg).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_distance_rejected() {
        let leg = TransportLeg {
            mode: TransportMode::Rail,
            distance_km: dec!(-1),
            weight_kg: dec!(10),
        };
        assert!(leg_impact(&leg).is_err());
    }
}
