//! Tests for asset valuation
//!
//! These tests verify:
//! - Monthly compounding of asset values
//! - Assets run to the end of the viewing interval
//! - Growth of an untaxed asset stays in the asset
//! - Growth of a taxed asset is credited to cash and accumulates liability

use jiff::civil::date;

use super::{assert_close, evaluations_of, roi, run};
use crate::config::{AssetBuilder, ModelBuilder};
use crate::model::{CASH, TAX_POT};

#[test]
fn test_asset_compounds_monthly() {
    let model = ModelBuilder::new()
        .asset(
            AssetBuilder::new("Stocks")
                .start("2018-01-01")
                .value(500.0)
                .growth("12"),
        )
        .build();

    let result = run(&model, &roi(date(2018, 1, 1), date(2019, 4, 1)));
    let values: Vec<f64> = evaluations_of(&result, "Stocks").map(|e| e.value).collect();

    assert_eq!(values.len(), 15);
    assert_eq!(values[0], 500.0);
    assert!(values.windows(2).all(|w| w[1] > w[0]));
    assert_close(values[14], 570.68, 0.01);
}

#[test]
fn test_zero_growth_is_still_logged() {
    let model = ModelBuilder::new()
        .asset(AssetBuilder::new("Car").start("2018-01-01").value(8_000.0))
        .build();

    let result = run(&model, &roi(date(2018, 1, 1), date(2018, 6, 1)));
    let values: Vec<f64> = evaluations_of(&result, "Car").map(|e| e.value).collect();
    assert_eq!(values, vec![8_000.0; 5]);
}

#[test]
fn test_asset_started_before_view_is_projected_from_its_start() {
    let model = ModelBuilder::new()
        .asset(
            AssetBuilder::new("ISA")
                .start("2017-01-01")
                .value(1_000.0)
                .growth("12")
                .cpi_immune(),
        )
        .build();

    let result = run(&model, &roi(date(2018, 1, 1), date(2018, 2, 1)));
    let first = evaluations_of(&result, "ISA").next().unwrap();
    assert_eq!(first.date, date(2017, 1, 1));
    assert_close(result.final_values["ISA"], 1_120.0, 1e-6);
}

#[test]
fn test_untaxed_growth_stays_in_asset() {
    let model = ModelBuilder::new()
        .asset(AssetBuilder::new(CASH).start("2018-01-01").value(10.0))
        .asset(
            AssetBuilder::new("Stocks")
                .start("2018-01-01")
                .value(1_000.0)
                .growth("50"),
        )
        .build();

    let result = run(&model, &roi(date(2018, 1, 1), date(2019, 1, 1)));
    assert_eq!(result.final_values[CASH], 10.0);
    assert!(evaluations_of(&result, CASH).all(|e| e.source == CASH));
}

#[test]
fn test_taxed_growth_is_credited_to_cash() {
    let model = ModelBuilder::new()
        .asset(AssetBuilder::new(CASH).start("2018-01-01").value(0.0))
        .asset(
            AssetBuilder::new("Savings")
                .start("2018-01-01")
                .value(1_000.0)
                .growth("12")
                .liability("Joe(incomeTax)"),
        )
        .build();

    let result = run(&model, &roi(date(2018, 1, 1), date(2018, 4, 1)));
    let growth = result.final_values["Savings"] - 1_000.0;

    assert!(growth > 0.0);
    assert!(result.final_values[CASH] > 0.0);
    assert_close(result.final_values[CASH], growth, 1e-9);

    let credits: Vec<_> = evaluations_of(&result, CASH)
        .filter(|e| e.source == "Savings")
        .collect();
    assert_eq!(credits.len(), 2);
    assert_eq!(credits[0].date, date(2018, 2, 1));
}

#[test]
fn test_taxable_growth_is_settled() {
    // 100k growing 20% a year gives well over the allowance in one tax year
    let model = ModelBuilder::new()
        .asset(AssetBuilder::new(CASH).start("2018-04-06").value(0.0))
        .asset(
            AssetBuilder::new("Bond")
                .start("2018-04-06")
                .value(100_000.0)
                .growth("20")
                .liability("Joe(incomeTax)"),
        )
        .build();

    let result = run(&model, &roi(date(2018, 4, 6), date(2019, 4, 6)));
    let growth = result.final_values["Bond"] - 100_000.0;
    let expected_tax = (growth - 12_500.0) * 0.20;

    assert!(growth > 12_500.0);
    assert_close(result.final_values[TAX_POT], expected_tax, 1e-6);
    assert_close(result.final_values[CASH], growth - expected_tax, 1e-6);
}
