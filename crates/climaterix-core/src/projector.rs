use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ClimaterixError;
use crate::types::{CashFlowPoint, Money, Percent};
use crate::ClimaterixResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Simple payback period. `NeverRecovered` is the "+infinity" sentinel for
/// positive investment with zero savings — a valid outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimplePayback {
    Years(Decimal),
    NeverRecovered,
}

impl SimplePayback {
    pub fn is_never(&self) -> bool {
        matches!(self, SimplePayback::NeverRecovered)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Undiscounted payback: `cost / savings`. Zero cost pays back immediately
/// regardless of savings; zero savings against a positive cost never pays
/// back.
pub fn simple_payback(total_cost: Money, annual_savings: Money) -> ClimaterixResult<SimplePayback> {
    validate_cost_and_savings(total_cost, annual_savings)?;

    if total_cost.is_zero() {
        return Ok(SimplePayback::Years(Decimal::ZERO));
    }
    if annual_savings.is_zero() {
        return Ok(SimplePayback::NeverRecovered);
    }
    Ok(SimplePayback::Years(total_cost / annual_savings))
}

/// Net present value over a whole-year horizon:
///
/// `-cost + Σ_{y=1..horizon} savings / (1 + rate/100)^y`
///
/// A zero rate degenerates to the undiscounted sum. Rates at or below -100%
/// are outside the valid domain and rejected before any computation.
pub fn npv(
    total_cost: Money,
    annual_savings: Money,
    discount_rate_pct: Percent,
    horizon_years: u32,
) -> ClimaterixResult<Money> {
    let series =
        cumulative_cashflow_series(total_cost, annual_savings, discount_rate_pct, horizon_years)?;
    // The series invariant guarantees horizon+1 points, so last() is present.
    series
        .last()
        .map(|p| p.cumulative)
        .ok_or_else(|| ClimaterixError::InsufficientData("Empty cash-flow series".into()))
}

/// Cumulative discounted cash flow, years 0..=horizon in ascending order.
/// Point 0 is the pre-investment `-total_cost`; each later point adds one
/// year's discounted savings. Always `horizon_years + 1` points.
pub fn cumulative_cashflow_series(
    total_cost: Money,
    annual_savings: Money,
    discount_rate_pct: Percent,
    horizon_years: u32,
) -> ClimaterixResult<Vec<CashFlowPoint>> {
    validate_cost_and_savings(total_cost, annual_savings)?;
    if discount_rate_pct <= dec!(-100) {
        return Err(ClimaterixError::InvalidInput {
            field: "discount_rate_pct".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }
    if horizon_years == 0 {
        return Err(ClimaterixError::InvalidInput {
            field: "horizon_years".into(),
            reason: "Analysis horizon must be a positive number of years".into(),
        });
    }

    let one_plus_r = Decimal::ONE + discount_rate_pct / dec!(100);

    let mut series = Vec::with_capacity(horizon_years as usize + 1);
    let mut cumulative = -total_cost;
    series.push(CashFlowPoint {
        year: 0,
        cumulative,
    });

    let mut discount = Decimal::ONE;
    for year in 1..=horizon_years {
        discount *= one_plus_r;
        if discount.is_zero() {
            return Err(ClimaterixError::DivisionByZero {
                context: format!("discount factor at year {year}"),
            });
        }
        cumulative += annual_savings / discount;
        series.push(CashFlowPoint { year, cumulative });
    }

    Ok(series)
}

/// First year at which cumulative cash flow turns strictly positive, or
/// `None` if it never does within the series. A series starting at or above
/// zero (the degenerate zero-investment case) breaks even at year 0.
pub fn break_even_year(series: &[CashFlowPoint]) -> Option<u32> {
    let first = series.first()?;
    if first.cumulative >= Decimal::ZERO {
        return Some(first.year);
    }
    series
        .iter()
        .find(|p| p.cumulative > Decimal::ZERO)
        .map(|p| p.year)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_cost_and_savings(total_cost: Money, annual_savings: Money) -> ClimaterixResult<()> {
    if total_cost < Decimal::ZERO {
        return Err(ClimaterixError::InvalidInput {
            field: "total_cost".into(),
            reason: "Investment cost cannot be negative".into(),
        });
    }
    if annual_savings < Decimal::ZERO {
        return Err(ClimaterixError::InvalidInput {
            field: "annual_savings".into(),
            reason: "Annual savings cannot be negative".into(),
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
    use rust_decimal_macros::dec;

    #[test]
    fn test_simple_payback_basic() {
        let payback = simple_payback(dec!(1_000_000), dec!(1_000_000)).unwrap();
        assert_eq!(payback, SimplePayback::Years(dec!(1)));
    }

    #[test]
    fn test_simple_payback_zero_cost_is_zero_years() {
        assert_eq!(
            simple_payback(dec!(0), dec!(500)).unwrap(),
            SimplePayback::Years(Decimal::ZERO)
        );
        // Holds even with zero savings.
        assert_eq!(
            simple_payback(dec!(0), dec!(0)).unwrap(),
            SimplePayback::Years(Decimal::ZERO)
        );
    }

    #[test]
    fn test_simple_payback_zero_savings_never_recovers() {
        let payback = simple_payback(dec!(50_000), dec!(0)).unwrap();
        assert!(payback.is_never());
    }

    #[test]
    fn test_npv_zero_rate_is_undiscounted_sum() {
        // -1_000_000 + 5 * 1_000_000 = 4_000_000
        let value = npv(dec!(1_000_000), dec!(1_000_000), dec!(0), 5).unwrap();
        assert_eq!(value, dec!(4_000_000));
    }

    #[test]
    fn test_npv_discounted() {
        // -1000 + 500/1.1 + 500/1.21 ≈ -1000 + 454.55 + 413.22 ≈ -132.23
        let value = npv(dec!(1000), dec!(500), dec!(10), 2).unwrap();
        assert!((value - dec!(-132.23)).abs() < dec!(0.01));
    }

    #[test]
    fn test_npv_monotone_nonincreasing_in_rate() {
        let rates = [dec!(0), dec!(3), dec!(5), dec!(7), dec!(10)];
        let mut previous: Option<Decimal> = None;
        for rate in rates {
            let value = npv(dec!(50_000), dec!(10_000), rate, 10).unwrap();
            if let Some(prev) = previous {
                assert!(value <= prev, "NPV rose from {prev} to {value} at rate {rate}");
            }
            previous = Some(value);
        }
    }

    #[test]
    fn test_npv_rejects_rate_at_minus_100() {
        assert!(npv(dec!(1000), dec!(500), dec!(-100), 5).is_err());
    }

    #[test]
    fn test_npv_rejects_zero_horizon() {
        assert!(npv(dec!(1000), dec!(500), dec!(5), 0).is_err());
    }

    #[test]
    fn test_series_shape() {
        let series = cumulative_cashflow_series(dec!(10_000), dec!(3_000), dec!(5), 10).unwrap();
        assert_eq!(series.len(), 11);
        assert_eq!(series[0].year, 0);
        assert_eq!(series[0].cumulative, dec!(-10_000));
        assert_eq!(series.last().unwrap().year, 10);
        // Years strictly ascending.
        for window in series.windows(2) {
            assert_eq!(window[1].year, window[0].year + 1);
        }
    }

    #[test]
    fn test_npv_equals_last_series_point() {
        let cost = dec!(7_500_000);
        let savings = dec!(1_200_000);
        let series = cumulative_cashflow_series(cost, savings, dec!(7), 15).unwrap();
        let value = npv(cost, savings, dec!(7), 15).unwrap();
        assert_eq!(value, series.last().unwrap().cumulative);
    }

    #[test]
    fn test_break_even_found() {
        // -1000, then +500/year undiscounted: positive at year 3 (cum 500).
        let series = cumulative_cashflow_series(dec!(1000), dec!(500), dec!(0), 5).unwrap();
        assert_eq!(break_even_year(&series), Some(3));
    }

    #[test]
    fn test_break_even_exact_recovery_year_not_counted() {
        // Cumulative hits exactly zero at year 2; strictly positive at year 3.
        let series = cumulative_cashflow_series(dec!(1000), dec!(500), dec!(0), 5).unwrap();
        assert_eq!(series[2].cumulative, Decimal::ZERO);
        assert_eq!(break_even_year(&series), Some(3));
    }

    #[test]
    fn test_break_even_none_with_zero_savings() {
        let series = cumulative_cashflow_series(dec!(1000), dec!(0), dec!(5), 10).unwrap();
        assert_eq!(break_even_year(&series), None);
    }

    #[test]
    fn test_break_even_zero_investment_is_year_zero() {
        let series = cumulative_cashflow_series(dec!(0), dec!(500), dec!(5), 5).unwrap();
        assert_eq!(break_even_year(&series), Some(0));
    }
}
