//! Tests for pensions
//!
//! These tests verify:
//! - Contributions diverted from an income as it is paid
//! - Relief from income tax, and from National Insurance for salary sacrifice
//! - Contributions only while the transaction is active
//! - Drawdown from a crystallized pension taxed as income

use jiff::civil::date;

use super::{assert_close, evaluations_of, roi, run};
use crate::config::{AssetBuilder, CashFlowBuilder, ModelBuilder, TransactionBuilder};
use crate::model::{CASH, TAX_POT};

fn employee(contribution: TransactionBuilder) -> ModelBuilder {
    ModelBuilder::new()
        .asset(AssetBuilder::new(CASH).start("2018-04-06"))
        .asset(AssetBuilder::new("Workplace").start("2018-04-06"))
        .income(
            CashFlowBuilder::income("Salary")
                .start("2018-04-06")
                .end("2019-04-06")
                .value(3_000.0)
                .liability("Joe(incomeTax)/Joe(NI)"),
        )
        .transaction(contribution)
}

fn tax_paid(result: &crate::simulation::SimulationResult, liability: &str) -> f64 {
    let mut previous = 0.0;
    let mut paid = 0.0;
    for e in evaluations_of(result, TAX_POT) {
        if e.source == liability {
            paid += e.value - previous;
        }
        previous = e.value;
    }
    paid
}

#[test]
fn test_contribution_relieves_income_tax_only() {
    let model = employee(
        TransactionBuilder::new("PensionJoe")
            .from_proportion("Salary", 0.1)
            .to_proportion("Workplace", 1.0)
            .date("2018-04-06"),
    )
    .build();
    let result = run(&model, &roi(date(2018, 4, 6), date(2019, 4, 6)));

    assert_close(result.final_values["Workplace"], 3_600.0, 1e-6);
    assert_close(tax_paid(&result, "Joe(incomeTax)"), (32_400.0 - 12_500.0) * 0.20, 1e-6);
    assert_close(tax_paid(&result, "Joe(NI)"), (36_000.0 - 8_628.0) * 0.12, 1e-6);

    let contributions = evaluations_of(&result, "Workplace")
        .filter(|e| e.source == "PensionJoe")
        .count();
    assert_eq!(contributions, 12);
}

#[test]
fn test_salary_sacrifice_also_relieves_national_insurance() {
    let model = employee(
        TransactionBuilder::new("PensionSSJoe")
            .from_proportion("Salary", 0.1)
            .to_proportion("Workplace", 1.0)
            .date("2018-04-06"),
    )
    .build();
    let result = run(&model, &roi(date(2018, 4, 6), date(2019, 4, 6)));

    let income_tax = (32_400.0 - 12_500.0) * 0.20;
    let national_insurance = (32_400.0 - 8_628.0) * 0.12;
    assert_close(tax_paid(&result, "Joe(incomeTax)"), income_tax, 1e-6);
    assert_close(tax_paid(&result, "Joe(NI)"), national_insurance, 1e-6);
    assert_close(
        result.final_values[CASH],
        32_400.0 - income_tax - national_insurance,
        1e-6,
    );
}

#[test]
fn test_absolute_contribution_with_employer_top_up() {
    let model = employee(
        TransactionBuilder::new("PensionJoe")
            .from_absolute("Salary", 200.0)
            .to_proportion("Workplace", 1.25)
            .date("2018-04-06"),
    )
    .build();
    let result = run(&model, &roi(date(2018, 4, 6), date(2019, 4, 6)));

    assert_close(result.final_values["Workplace"], 12.0 * 250.0, 1e-6);
    assert_close(tax_paid(&result, "Joe(incomeTax)"), (33_600.0 - 12_500.0) * 0.20, 1e-6);
}

#[test]
fn test_contributions_stop_at_stop_date() {
    let model = employee(
        TransactionBuilder::new("PensionJoe")
            .from_proportion("Salary", 0.1)
            .to_proportion("Workplace", 1.0)
            .date("2018-04-06")
            .stop_date("2018-10-06"),
    )
    .build();
    let result = run(&model, &roi(date(2018, 4, 6), date(2019, 4, 6)));

    assert_close(result.final_values["Workplace"], 1_800.0, 1e-6);
}

#[test]
fn test_contributions_wait_for_start_date() {
    let model = employee(
        TransactionBuilder::new("PensionJoe")
            .from_proportion("Salary", 0.1)
            .to_proportion("Workplace", 1.0)
            .date("2019-01-01"),
    )
    .build();
    let result = run(&model, &roi(date(2018, 4, 6), date(2019, 4, 6)));

    // Jan 6, Feb 6 and Mar 6 2019 payments only
    assert_close(result.final_values["Workplace"], 900.0, 1e-6);
}

#[test]
fn test_drawdown_is_taxed_as_income() {
    let model = ModelBuilder::new()
        .asset(AssetBuilder::new(CASH).start("2018-04-06"))
        .asset(
            AssetBuilder::new("CrystallizedPensionJoe")
                .start("2018-04-06")
                .value(20_000.0)
                .liability("Joe(incomeTax)"),
        )
        .income(
            CashFlowBuilder::income("Salary")
                .start("2018-04-06")
                .end("2019-04-06")
                .value(3_000.0)
                .liability("Joe(incomeTax)"),
        )
        .transaction(
            TransactionBuilder::new("Drawdown")
                .from_absolute("CrystallizedPensionJoe", 1_000.0)
                .to_proportion(CASH, 1.0)
                .date("2018-05-01"),
        )
        .build();
    let result = run(&model, &roi(date(2018, 4, 6), date(2019, 4, 6)));

    let tax = (37_000.0 - 12_500.0) * 0.20;
    assert_close(result.final_values["CrystallizedPensionJoe"], 19_000.0, 1e-6);
    assert_close(result.final_values[TAX_POT], tax, 1e-6);
    assert_close(result.final_values[CASH], 37_000.0 - tax, 1e-6);
}
