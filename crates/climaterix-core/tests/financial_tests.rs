use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use climaterix_core::aggregate::{aggregate, annual_savings, ENERGY_SAVINGS_FRACTION};
use climaterix_core::catalog::operations_catalog;
use climaterix_core::projector::{
    break_even_year, cumulative_cashflow_series, npv, simple_payback, SimplePayback,
};

// ===========================================================================
// Financial properties over the built-in catalog
// ===========================================================================

#[test]
fn test_full_catalog_financials_at_default_prices() {
    let catalog = operations_catalog();
    let all_names = catalog.iter().map(|i| i.name.clone()).collect();
    let agg = aggregate(&catalog, &all_names).unwrap();

    assert_eq!(agg.total_cost, dec!(29_500_000));
    assert_eq!(agg.total_reduction, dec!(83_700));

    let savings = annual_savings(
        agg.total_reduction,
        dec!(100),
        dec!(120),
        ENERGY_SAVINGS_FRACTION,
    )
    .unwrap();
    // 83_700 * 100 + 83_700 * 0.4 * 120 / 1000 = 8_370_000 + 4_017.6
    assert_eq!(savings, dec!(8_374_017.6));

    // Cost recovered in under four years at these prices.
    match simple_payback(agg.total_cost, savings).unwrap() {
        SimplePayback::Years(years) => {
            assert!(years > dec!(3.5));
            assert!(years < dec!(3.6));
        }
        SimplePayback::NeverRecovered => panic!("Expected a finite payback"),
    }
}

#[test]
fn test_savings_zero_iff_reduction_or_prices_zero() {
    // Reduction 0 forces zero savings regardless of prices.
    let zero = annual_savings(dec!(0), dec!(250), dec!(300), ENERGY_SAVINGS_FRACTION).unwrap();
    assert_eq!(zero, Decimal::ZERO);
    // Both prices 0 forces zero savings regardless of reduction.
    let zero = annual_savings(dec!(80_000), dec!(0), dec!(0), ENERGY_SAVINGS_FRACTION).unwrap();
    assert_eq!(zero, Decimal::ZERO);
    // Either price positive yields positive savings for positive reduction.
    let carbon_only =
        annual_savings(dec!(100), dec!(1), dec!(0), ENERGY_SAVINGS_FRACTION).unwrap();
    assert!(carbon_only > Decimal::ZERO);
    let energy_only =
        annual_savings(dec!(100), dec!(0), dec!(1), ENERGY_SAVINGS_FRACTION).unwrap();
    assert!(energy_only > Decimal::ZERO);
}

#[test]
fn test_npv_matches_series_across_rate_grid() {
    let cost = dec!(29_500_000);
    let savings = dec!(8_374_017.6);
    for rate in [dec!(0), dec!(2.5), dec!(5), dec!(8), dec!(12)] {
        let series = cumulative_cashflow_series(cost, savings, rate, 10).unwrap();
        assert_eq!(series.len(), 11);
        assert_eq!(series[0].cumulative, -cost);
        let value = npv(cost, savings, rate, 10).unwrap();
        assert_eq!(value, series.last().unwrap().cumulative);
    }
}

#[test]
fn test_npv_nonincreasing_in_rate_for_catalog_scale_inputs() {
    let mut previous: Option<Decimal> = None;
    for rate in [dec!(0), dec!(1), dec!(3), dec!(5), dec!(10), dec!(20)] {
        let value = npv(dec!(29_500_000), dec!(8_374_017.6), rate, 10).unwrap();
        if let Some(prev) = previous {
            assert!(value <= prev);
        }
        previous = Some(value);
    }
}

#[test]
fn test_break_even_shifts_later_with_discounting() {
    let cost = dec!(10_000_000);
    let savings = dec!(2_000_000);
    let undiscounted = cumulative_cashflow_series(cost, savings, dec!(0), 15).unwrap();
    let discounted = cumulative_cashflow_series(cost, savings, dec!(10), 15).unwrap();
    let year_flat = break_even_year(&undiscounted).unwrap();
    let year_discounted = break_even_year(&discounted).unwrap();
    assert!(year_discounted >= year_flat);
}
