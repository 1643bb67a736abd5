//! Tests for chart aggregation over simulated logs
//!
//! These tests verify:
//! - Income and expense payments summed per bucket
//! - Asset value, additions, reductions and delta views
//! - Fine series summing to their coarse category series
//! - Focus filters, age labels and dropping of all-zero series

use std::collections::HashMap;

use jiff::civil::date;

use super::{assert_close, roi, run};
use crate::chart::{
    AssetView, ChartData, Detail, Focus, Frequency, SeriesKind, ViewSettings, category_label,
    make_chart_data, make_chart_data_for_views,
};
use crate::config::{AssetBuilder, CashFlowBuilder, ModelBuilder, TransactionBuilder};
use crate::model::{BIRTH_DATE_SETTING, CASH, ModelData, ViewInterval};

fn household() -> (ModelData, ViewInterval) {
    let model = ModelBuilder::new()
        .asset(AssetBuilder::new(CASH).start("2018-01-01").value(2_000.0))
        .asset(
            AssetBuilder::new("ISA")
                .start("2018-01-01")
                .value(5_000.0)
                .growth("8")
                .category("Investments"),
        )
        .asset(
            AssetBuilder::new("GIA")
                .start("2018-01-01")
                .value(3_000.0)
                .growth("5")
                .category("Investments"),
        )
        .income(
            CashFlowBuilder::income("Salary")
                .start("2018-01-01")
                .end("2021-01-01")
                .value(2_500.0)
                .category("Work"),
        )
        .income(
            CashFlowBuilder::income("Bonus")
                .start("2018-03-01")
                .end("2018-04-01")
                .value(1_000.0)
                .category("Work"),
        )
        .expense(
            CashFlowBuilder::expense("Rent")
                .start("2018-01-01")
                .end("2021-01-01")
                .value(900.0)
                .category("Housing"),
        )
        .expense(
            CashFlowBuilder::expense("Food")
                .start("2018-01-01")
                .end("2021-01-01")
                .value(300.0)
                .growth("3"),
        )
        .transaction(
            TransactionBuilder::new("Invest")
                .from_absolute(CASH, 500.0)
                .to_proportion("ISA", 1.0)
                .date("2018-01-15")
                .recurrence("1m")
                .category("Investments"),
        )
        .transaction(
            TransactionBuilder::new("Rebalance")
                .from_proportion("ISA", 0.1)
                .to_proportion(CASH, 1.0)
                .date("2018-06-20")
                .recurrence("6m"),
        )
        .transaction(
            TransactionBuilder::new("RevalueGIA")
                .to_proportion("GIA", 0.9)
                .date("2019-03-10"),
        )
        .build();
    (model, roi(date(2018, 1, 1), date(2021, 1, 1)))
}

fn chart(settings: ViewSettings) -> ChartData {
    let (model, roi) = household();
    let result = run(&model, &roi);
    make_chart_data(&model, &roi, &result.evaluations, &settings)
}

fn key(item: &str, label: &str) -> (String, String) {
    (item.to_string(), label.to_string())
}

/// `(series, label) -> y` for one kind
fn points(data: &ChartData, kind: SeriesKind) -> HashMap<(String, String), f64> {
    data.series(kind)
        .iter()
        .flat_map(|s| {
            s.points
                .iter()
                .map(|p| ((s.item.clone(), p.label.clone()), p.y))
        })
        .collect()
}

#[test]
fn test_income_payments_summed_per_year() {
    let data = chart(ViewSettings::default().detail(Detail::Fine));

    assert_eq!(data.labels, vec!["2018-01-01", "2019-01-01", "2020-01-01"]);
    let incomes = points(&data, SeriesKind::Income);
    assert_close(incomes[&key("Salary", "2018-01-01")], 30_000.0, 1e-6);
    assert_close(incomes[&key("Bonus", "2018-01-01")], 1_000.0, 1e-6);
    // Bonus is zero after 2018 but its series is kept because 2018 is not
    assert_eq!(incomes[&key("Bonus", "2019-01-01")], 0.0);
}

#[test]
fn test_asset_value_is_last_valuation_in_bucket() {
    let (model, roi) = household();
    let result = run(&model, &roi);
    let data = make_chart_data(
        &model,
        &roi,
        &result.evaluations,
        &ViewSettings::default()
            .detail(Detail::Fine)
            .frequency(Frequency::Monthly),
    );

    let last_cash_in_january = result
        .evaluations
        .iter()
        .filter(|e| e.name == CASH && e.date < date(2018, 2, 1))
        .next_back()
        .unwrap()
        .value;
    let assets = points(&data, SeriesKind::Asset);
    assert_eq!(
        assets[&key(CASH, "2018-01-01")],
        last_cash_in_january
    );
    assert_eq!(data.labels.len(), 36);
}

#[test]
fn test_additions_reductions_and_delta() {
    let fine = ViewSettings::default()
        .detail(Detail::Fine)
        .frequency(Frequency::Monthly);
    let additions = chart(fine.clone().asset_view(AssetView::Additions));
    let reductions = chart(fine.clone().asset_view(AssetView::Reductions));
    let delta = chart(fine.asset_view(AssetView::Delta));

    assert!(!additions.assets.is_empty());
    assert!(!reductions.assets.is_empty());
    assert!(
        additions
            .assets
            .iter()
            .flat_map(|s| &s.points)
            .all(|p| p.y >= 0.0)
    );
    assert!(
        reductions
            .assets
            .iter()
            .flat_map(|s| &s.points)
            .all(|p| p.y <= 0.0)
    );

    let added = points(&additions, SeriesKind::Asset);
    let reduced = points(&reductions, SeriesKind::Asset);
    let net = points(&delta, SeriesKind::Asset);
    for key in added.keys().chain(reduced.keys()).chain(net.keys()) {
        let sum = added.get(key).unwrap_or(&0.0) + reduced.get(key).unwrap_or(&0.0);
        assert_close(*net.get(key).unwrap_or(&0.0), sum, 1e-6);
    }
}

#[test]
fn test_delta_keys_name_cause_and_target() {
    let data = chart(
        ViewSettings::default()
            .detail(Detail::Fine)
            .asset_view(AssetView::Delta),
    );
    let items: Vec<_> = data.assets.iter().map(|s| s.item.as_str()).collect();

    for expected in [
        "growth/ISA",
        "Invest/ISA",
        "Invest/Cash",
        "Salary/Cash",
        "Rent/Cash",
        "Rebalance/ISA",
        "RevalueGIA/GIA",
    ] {
        assert!(items.contains(&expected), "{expected} missing from {items:?}");
    }
    let mut sorted = items.clone();
    sorted.sort_unstable();
    assert_eq!(items, sorted);
}

#[test]
fn test_fine_series_sum_to_coarse() {
    let (model, roi) = household();
    let result = run(&model, &roi);

    for asset_view in [
        AssetView::Value,
        AssetView::Additions,
        AssetView::Reductions,
        AssetView::Delta,
    ] {
        let settings = ViewSettings::default().asset_view(asset_view);
        let fine = make_chart_data(
            &model,
            &roi,
            &result.evaluations,
            &settings.clone().detail(Detail::Fine),
        );
        let coarse = make_chart_data(
            &model,
            &roi,
            &result.evaluations,
            &settings.detail(Detail::Coarse),
        );

        for kind in [SeriesKind::Expense, SeriesKind::Income, SeriesKind::Asset] {
            let mut folded: HashMap<(String, String), f64> = HashMap::new();
            for ((item, label), y) in points(&fine, kind) {
                *folded
                    .entry((category_label(&model, kind, &item), label))
                    .or_default() += y;
            }
            let coarse_points = points(&coarse, kind);
            for key in folded.keys().chain(coarse_points.keys()) {
                assert_close(
                    *coarse_points.get(key).unwrap_or(&0.0),
                    *folded.get(key).unwrap_or(&0.0),
                    1e-6,
                );
            }
        }
    }
}

#[test]
fn test_coarse_uses_categories() {
    let data = chart(ViewSettings::default());
    let incomes: Vec<_> = data.incomes.iter().map(|s| s.item.as_str()).collect();
    let expenses: Vec<_> = data.expenses.iter().map(|s| s.item.as_str()).collect();
    let assets: Vec<_> = data.assets.iter().map(|s| s.item.as_str()).collect();

    assert_eq!(incomes, vec!["Work"]);
    assert_eq!(expenses, vec!["Food", "Housing"]);
    assert_eq!(assets, vec![CASH, "Investments"]);
}

#[test]
fn test_focus_filters() {
    let (model, _) = household();
    let data = chart(
        ViewSettings::default()
            .detail(Detail::Fine)
            .income_focus(Focus::Item("Bonus".to_string()))
            .expense_focus(Focus::Category("Housing".to_string()))
            .asset_focus(Focus::resolve("Investments", &model)),
    );

    let items = |kind: SeriesKind| {
        data.series(kind)
            .iter()
            .map(|s| s.item.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(items(SeriesKind::Income), vec!["Bonus"]);
    assert_eq!(items(SeriesKind::Expense), vec!["Rent"]);
    assert_eq!(items(SeriesKind::Asset), vec!["GIA", "ISA"]);
}

#[test]
fn test_all_zero_series_dropped() {
    let model = ModelBuilder::new()
        .asset(AssetBuilder::new("Empty").start("2018-01-01"))
        .asset(AssetBuilder::new("Full").start("2018-01-01").value(1.0))
        .build();
    let roi = roi(date(2018, 1, 1), date(2019, 1, 1));
    let result = run(&model, &roi);
    let data = make_chart_data(&model, &roi, &result.evaluations, &ViewSettings::default());

    let items: Vec<_> = data.assets.iter().map(|s| s.item.as_str()).collect();
    assert_eq!(items, vec!["Full"]);
}

#[test]
fn test_age_labels_and_tooltips() {
    let model = ModelBuilder::new()
        .setting(BIRTH_DATE_SETTING, "1980-06-15")
        .expense(
            CashFlowBuilder::expense("Rent")
                .start("2018-01-01")
                .end("2020-01-01")
                .value(100.0),
        )
        .build();
    let roi = roi(date(2018, 1, 1), date(2020, 1, 1));
    let result = run(&model, &roi);
    let data = make_chart_data(&model, &roi, &result.evaluations, &ViewSettings::default());

    assert_eq!(data.labels, vec!["37", "38"]);
    assert_eq!(data.expenses[0].points[0].tooltip, "37 Rent 1200.00");
}

#[test]
fn test_views_drawn_together_match_single_draws() {
    let (model, roi) = household();
    let result = run(&model, &roi);
    let views = vec![
        ViewSettings::default(),
        ViewSettings::default().asset_view(AssetView::Delta),
        ViewSettings::default()
            .detail(Detail::Fine)
            .frequency(Frequency::Monthly),
    ];

    let together = make_chart_data_for_views(&model, &roi, &result.evaluations, &views);
    assert_eq!(together.len(), views.len());
    for (data, settings) in together.iter().zip(&views) {
        assert_eq!(
            data,
            &make_chart_data(&model, &roi, &result.evaluations, settings)
        );
    }
}

#[test]
fn test_empty_log_gives_empty_series() {
    let (model, roi) = household();
    let data = make_chart_data(&model, &roi, &[], &ViewSettings::default());
    assert_eq!(data.labels.len(), 3);
    assert!(data.incomes.is_empty() && data.expenses.is_empty() && data.assets.is_empty());
}
