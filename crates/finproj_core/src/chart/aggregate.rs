//! Replaying an evaluation log into chart buckets
//!
//! All bucketed amounts live in one flat map keyed by
//! `(kind, series name, bucket index)`. A replay fills it per item; coarse
//! detail then folds item series into category series.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use super::buckets::Buckets;
use super::view::{AssetView, Detail, ViewSettings};
use super::{ChartPoint, ChartSeries};
use crate::model::{Evaluation, ModelData, REVALUE_PREFIX};

/// Source segment of the delta key for an asset's own growth
pub const GROWTH_SOURCE: &str = "growth";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesKind {
    Expense,
    Income,
    Asset,
}

#[derive(Debug, Clone, Default)]
pub struct BucketValues {
    values: FxHashMap<(SeriesKind, String, usize), f64>,
}

impl BucketValues {
    pub fn add(&mut self, kind: SeriesKind, name: &str, bucket: usize, amount: f64) {
        *self
            .values
            .entry((kind, name.to_string(), bucket))
            .or_insert(0.0) += amount;
    }

    pub fn set(&mut self, kind: SeriesKind, name: &str, bucket: usize, value: f64) {
        self.values.insert((kind, name.to_string(), bucket), value);
    }

    pub fn get(&self, kind: SeriesKind, name: &str, bucket: usize) -> Option<f64> {
        self.values.get(&(kind, name.to_string(), bucket)).copied()
    }

    /// Series names of one kind, sorted
    pub fn names(&self, kind: SeriesKind) -> BTreeSet<String> {
        self.values
            .keys()
            .filter(|(k, _, _)| *k == kind)
            .map(|(_, name, _)| name.clone())
            .collect()
    }

    /// Fill buckets with no valuation from the bucket before
    pub fn carry_forward(&mut self, kind: SeriesKind, buckets: usize) {
        for name in self.names(kind) {
            for bucket in 1..buckets {
                if self.get(kind, &name, bucket).is_none()
                    && let Some(previous) = self.get(kind, &name, bucket - 1)
                {
                    self.set(kind, &name, bucket, previous);
                }
            }
        }
    }

    /// Sum series into the series named by `label`
    pub fn fold(&self, label: impl Fn(SeriesKind, &str) -> String) -> Self {
        let mut folded = Self::default();
        for ((kind, name, bucket), value) in &self.values {
            folded.add(*kind, &label(*kind, name), *bucket, *value);
        }
        folded
    }
}

/// Replay `evaluations` in log order into per-item buckets
pub fn replay(
    model: &ModelData,
    evaluations: &[Evaluation],
    buckets: &Buckets,
    settings: &ViewSettings,
) -> BucketValues {
    let mut values = BucketValues::default();
    let mut last_asset_value: FxHashMap<&str, f64> = FxHashMap::default();

    for evaluation in evaluations {
        let Some(bucket) = buckets.index_of(evaluation.date) else {
            continue;
        };
        let name = evaluation.name.as_str();
        // Only the item's own evaluations are payments; revaluations are not
        let is_payment = evaluation.source == name;

        if model.is_income(name) {
            if is_payment && settings.income_focus.admits(name, model) {
                values.add(SeriesKind::Income, name, bucket, evaluation.value);
            }
        } else if model.is_expense(name) {
            if is_payment && settings.expense_focus.admits(name, model) {
                values.add(SeriesKind::Expense, name, bucket, evaluation.value);
            }
        } else if model.is_asset(name) {
            let previous = last_asset_value
                .insert(name, evaluation.value)
                .unwrap_or(0.0);
            if !settings.asset_focus.admits(name, model) {
                continue;
            }
            if settings.asset_view == AssetView::Value {
                values.set(SeriesKind::Asset, name, bucket, evaluation.value);
                continue;
            }

            let delta = evaluation.value - previous;
            let shown = match settings.asset_view {
                AssetView::Additions => delta > 0.0,
                AssetView::Reductions => delta < 0.0,
                AssetView::Delta | AssetView::Value => delta != 0.0,
            };
            if shown {
                let source = if is_payment {
                    GROWTH_SOURCE
                } else {
                    evaluation.source.as_str()
                };
                values.add(SeriesKind::Asset, &format!("{source}/{name}"), bucket, delta);
            }
        }
    }

    if settings.asset_view == AssetView::Value {
        values.carry_forward(SeriesKind::Asset, buckets.len());
    }
    match settings.detail {
        Detail::Fine => values,
        Detail::Coarse => values.fold(|kind, name| category_label(model, kind, name)),
    }
}

/// Category a series is folded into at coarse detail.
///
/// Growth and revaluation deltas belong to the asset they change; other
/// deltas to whatever caused them. Anything without a category keeps its
/// own name.
pub fn category_label(model: &ModelData, kind: SeriesKind, name: &str) -> String {
    let category = match (kind, name.rsplit_once('/')) {
        (SeriesKind::Asset, Some((source, target)))
            if source == GROWTH_SOURCE || source.starts_with(REVALUE_PREFIX) =>
        {
            model.category_of(target)
        }
        (SeriesKind::Asset, Some((source, _))) => model.category_of(source),
        _ => model.category_of(name),
    };
    category.unwrap_or(name).to_string()
}

/// One series per name, aligned to the shown buckets; all-zero series are
/// left out
pub fn emit(
    values: &BucketValues,
    kind: SeriesKind,
    buckets: &Buckets,
    labels: &[String],
) -> Vec<ChartSeries> {
    values
        .names(kind)
        .into_iter()
        .filter_map(|item| {
            let points: Vec<ChartPoint> = buckets
                .shown()
                .zip(labels)
                .map(|(bucket, label)| {
                    let y = values.get(kind, &item, bucket).unwrap_or(0.0);
                    ChartPoint {
                        label: label.clone(),
                        y,
                        tooltip: format!("{label} {item} {y:.2}"),
                    }
                })
                .collect();
            if points.iter().all(|p| p.y == 0.0) {
                None
            } else {
                Some(ChartSeries { item, points })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AssetBuilder, CashFlowBuilder, ModelBuilder};

    fn model() -> ModelData {
        ModelBuilder::new()
            .asset(AssetBuilder::new("ISA").category("Investments"))
            .asset(AssetBuilder::new("Cash"))
            .income(CashFlowBuilder::income("Salary").category("Work"))
            .build()
    }

    #[test]
    fn test_category_labels() {
        let model = model();
        assert_eq!(category_label(&model, SeriesKind::Income, "Salary"), "Work");
        assert_eq!(
            category_label(&model, SeriesKind::Asset, "growth/ISA"),
            "Investments"
        );
        assert_eq!(
            category_label(&model, SeriesKind::Asset, "RevalueISA/ISA"),
            "Investments"
        );
        assert_eq!(category_label(&model, SeriesKind::Asset, "Salary/Cash"), "Work");
        assert_eq!(
            category_label(&model, SeriesKind::Asset, "Joe(incomeTax)/Cash"),
            "Joe(incomeTax)/Cash"
        );
        assert_eq!(category_label(&model, SeriesKind::Asset, "Cash"), "Cash");
    }

    #[test]
    fn test_carry_forward_fills_gaps() {
        let mut values = BucketValues::default();
        values.set(SeriesKind::Asset, "ISA", 0, 5.0);
        values.set(SeriesKind::Asset, "ISA", 2, 7.0);
        values.carry_forward(SeriesKind::Asset, 4);
        assert_eq!(values.get(SeriesKind::Asset, "ISA", 1), Some(5.0));
        assert_eq!(values.get(SeriesKind::Asset, "ISA", 3), Some(7.0));
    }
}
