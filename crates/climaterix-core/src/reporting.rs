//! Synthetic dashboard data: monthly emission history, GHG-Protocol scope
//! rollup, product portfolio impact, and the facility energy table. All
//! figures are demo fixtures, not measurements.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ClimaterixError;
use crate::types::{Percent, Tonnes};
use crate::ClimaterixResult;

/// Scope 1 direct emissions for a software company: fleet vehicles,
/// emergency generators, refrigerants. Flat estimate in tCO2e per month.
pub const SCOPE1_DIRECT: Tonnes = dec!(500);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EmissionSource {
    DataCenters,
    CloudInfrastructure,
    OfficeBuildings,
    EmployeeCommute,
    BusinessTravel,
    SoftwareDevelopment,
}

impl EmissionSource {
    pub const ALL: [EmissionSource; 6] = [
        EmissionSource::DataCenters,
        EmissionSource::CloudInfrastructure,
        EmissionSource::OfficeBuildings,
        EmissionSource::EmployeeCommute,
        EmissionSource::BusinessTravel,
        EmissionSource::SoftwareDevelopment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EmissionSource::DataCenters => "Data Centers",
            EmissionSource::CloudInfrastructure => "Cloud Infrastructure",
            EmissionSource::OfficeBuildings => "Office Buildings",
            EmissionSource::EmployeeCommute => "Employee Commute",
            EmissionSource::BusinessTravel => "Business Travel",
            EmissionSource::SoftwareDevelopment => "Software Development",
        }
    }

    /// Monthly tCO2e range the synthetic history samples uniformly from.
    fn monthly_range(&self) -> (f64, f64) {
        match self {
            EmissionSource::DataCenters => (8_500.0, 9_500.0),
            EmissionSource::CloudInfrastructure => (3_500.0, 4_200.0),
            EmissionSource::OfficeBuildings => (2_800.0, 3_200.0),
            EmissionSource::EmployeeCommute => (1_200.0, 1_500.0),
            EmissionSource::BusinessTravel => (2_500.0, 3_500.0),
            EmissionSource::SoftwareDevelopment => (1_800.0, 2_200.0),
        }
    }
}

/// One month of per-source emissions, tCO2e.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyEmissions {
    /// 1-based month index, oldest first.
    pub month: u32,
    pub by_source: BTreeMap<EmissionSource, Tonnes>,
}

impl MonthlyEmissions {
    pub fn total(&self) -> Tonnes {
        self.by_source.values().copied().sum()
    }
}

/// GHG-Protocol rollup of one month's sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeRollup {
    /// Company-owned sources (flat estimate, see [`SCOPE1_DIRECT`]).
    pub scope1: Tonnes,
    /// Purchased energy: data centers, cloud, offices.
    pub scope2: Tonnes,
    /// Value chain: commute, travel, software development.
    pub scope3: Tonnes,
    pub total: Tonnes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpdStatus {
    Compliant,
    InProgress,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub category: String,
    pub annual_units: u32,
    /// kg CO2e per unit sold.
    pub gwp_per_unit: Decimal,
    pub status: EpdStatus,
}

impl ProductRecord {
    /// `annual_units * gwp_per_unit / 1000`: total portfolio impact in tCO2e.
    pub fn annual_impact_tonnes(&self) -> Tonnes {
        Decimal::from(self.annual_units) * self.gwp_per_unit / dec!(1000)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub location: String,
    pub kind: String,
    pub size_sqm: u32,
    pub employees: u32,
    pub annual_energy_mwh: Decimal,
    pub renewable_pct: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate a synthetic per-source emission history, oldest month first.
/// A seed makes the history reproducible across calls.
pub fn emission_history(
    months: u32,
    seed: Option<u64>,
) -> ClimaterixResult<Vec<MonthlyEmissions>> {
    if months == 0 {
        return Err(ClimaterixError::InvalidInput {
            field: "months".into(),
            reason: "History must cover at least one month".into(),
        });
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut history = Vec::with_capacity(months as usize);
    for month in 1..=months {
        let mut by_source = BTreeMap::new();
        for source in EmissionSource::ALL {
            let (low, high) = source.monthly_range();
            let sampled: f64 = rng.gen_range(low..high);
            let value = Decimal::from_f64_retain(sampled)
                .unwrap_or(Decimal::ZERO)
                .round_dp(1);
            by_source.insert(source, value);
        }
        history.push(MonthlyEmissions { month, by_source });
    }
    Ok(history)
}

/// Roll one month's sources up into GHG-Protocol scopes.
pub fn scope_rollup(month: &MonthlyEmissions) -> ScopeRollup {
    let source = |s: EmissionSource| month.by_source.get(&s).copied().unwrap_or(Decimal::ZERO);

    let scope2 = source(EmissionSource::DataCenters)
        + source(EmissionSource::CloudInfrastructure)
        + source(EmissionSource::OfficeBuildings);
    let scope3 = source(EmissionSource::EmployeeCommute)
        + source(EmissionSource::BusinessTravel)
        + source(EmissionSource::SoftwareDevelopment);

    ScopeRollup {
        scope1: SCOPE1_DIRECT,
        scope2,
        scope3,
        total: SCOPE1_DIRECT + scope2 + scope3,
    }
}

/// The demo product portfolio with EPD status per product.
pub fn product_portfolio() -> Vec<ProductRecord> {
    fn product(
        name: &str,
        category: &str,
        annual_units: u32,
        gwp_per_unit: Decimal,
        status: EpdStatus,
    ) -> ProductRecord {
        ProductRecord {
            name: name.to_string(),
            category: category.to_string(),
            annual_units,
            gwp_per_unit,
            status,
        }
    }

    vec![
        product(
            "Quantum Firewall",
            "Network Security",
            50_000,
            dec!(45.2),
            EpdStatus::Compliant,
        ),
        product(
            "CloudGuard",
            "Cloud Security",
            75_000,
            dec!(12.8),
            EpdStatus::Compliant,
        ),
        product(
            "Harmony Endpoint",
            "Endpoint Security",
            120_000,
            dec!(8.5),
            EpdStatus::InProgress,
        ),
        product(
            "Infinity Platform",
            "Unified Platform",
            30_000,
            dec!(156.3),
            EpdStatus::Compliant,
        ),
        product(
            "Mobile Security",
            "Mobile Security",
            45_000,
            dec!(6.2),
            EpdStatus::Pending,
        ),
    ]
}

/// The demo facility energy table.
pub fn facility_table() -> Vec<Facility> {
    fn facility(
        location: &str,
        kind: &str,
        size_sqm: u32,
        employees: u32,
        annual_energy_mwh: Decimal,
        renewable_pct: Percent,
    ) -> Facility {
        Facility {
            location: location.to_string(),
            kind: kind.to_string(),
            size_sqm,
            employees,
            annual_energy_mwh,
            renewable_pct,
        }
    }

    vec![
        facility("Tel Aviv HQ", "Office/R&D", 15_000, 1_500, dec!(8_500), dec!(35)),
        facility("California Office", "Office/R&D", 12_000, 800, dec!(6_200), dec!(60)),
        facility("Singapore DC", "Data Center", 8_000, 50, dec!(15_000), dec!(25)),
        facility("Frankfurt DC", "Data Center", 6_500, 40, dec!(12_000), dec!(45)),
        facility("Tokyo Office", "Office", 5_000, 300, dec!(2_800), dec!(40)),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_length_and_month_order() {
        let history = emission_history(12, Some(42)).unwrap();
        assert_eq!(history.len(), 12);
        for (i, month) in history.iter().enumerate() {
            assert_eq!(month.month, i as u32 + 1);
            assert_eq!(month.by_source.len(), 6);
        }
    }

    #[test]
    fn test_history_values_within_source_ranges() {
        let history = emission_history(24, Some(7)).unwrap();
        for month in &history {
            for source in EmissionSource::ALL {
                let (low, high) = source.monthly_range();
                let value = month.by_source[&source];
                assert!(value >= Decimal::from_f64_retain(low).unwrap());
                assert!(value <= Decimal::from_f64_retain(high).unwrap());
            }
        }
    }

    #[test]
    fn test_seeded_history_is_reproducible() {
        let a = emission_history(12, Some(99)).unwrap();
        let b = emission_history(12, Some(99)).unwrap();
        for (ma, mb) in a.iter().zip(&b) {
            assert_eq!(ma.by_source, mb.by_source);
        }
    }

    #[test]
    fn test_zero_months_rejected() {
        assert!(emission_history(0, Some(1)).is_err());
    }

    #[test]
    fn test_scope_rollup_partitions_sources() {
        let history = emission_history(1, Some(5)).unwrap();
        let month = &history[0];
        let rollup = scope_rollup(month);
        assert_eq!(rollup.scope1, SCOPE1_DIRECT);
        assert_eq!(
            rollup.scope2 + rollup.scope3,
            month.total()
        );
        assert_eq!(rollup.total, rollup.scope1 + rollup.scope2 + rollup.scope3);
    }

    #[test]
    fn test_product_annual_impact() {
        let portfolio = product_portfolio();
        let quantum = &portfolio[0];
        // 50_000 * 45.2 / 1000 = 2260 tCO2e
        assert_eq!(quantum.annual_impact_tonnes(), dec!(2260));
    }

    #[test]
    fn test_fixture_tables_are_nonempty_and_valid() {
        assert_eq!(product_portfolio().len(), 5);
        let facilities = facility_table();
        assert_eq!(facilities.len(), 5);
        for facility in facilities {
            assert!(facility.renewable_pct >= Decimal::ZERO);
            assert!(facility.renewable_pct <= dec!(100));
        }
    }
}
