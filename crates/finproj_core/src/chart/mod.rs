//! Chart aggregation
//!
//! Turns a finished evaluation log into three collections of series
//! (expenses, incomes, assets) aligned to monthly or annual buckets over
//! the viewing interval. Aggregation only reads the log, so any number of
//! views can be drawn from one simulation run.

mod aggregate;
mod buckets;
mod view;

use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::model::{BIRTH_DATE_SETTING, Evaluation, ModelData, ViewInterval};
use crate::parse::resolve_date;

pub use aggregate::{BucketValues, GROWTH_SOURCE, SeriesKind, category_label};
pub use buckets::Buckets;
pub use view::{AssetView, Detail, Focus, Frequency, ViewSettings};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub y: f64,
    pub tooltip: String,
}

/// One line (or stack) on a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub item: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    /// Shared x-axis labels, one per point in every series
    pub labels: Vec<String>,
    pub expenses: Vec<ChartSeries>,
    pub incomes: Vec<ChartSeries>,
    pub assets: Vec<ChartSeries>,
}

impl ChartData {
    pub fn series(&self, kind: SeriesKind) -> &[ChartSeries] {
        match kind {
            SeriesKind::Expense => &self.expenses,
            SeriesKind::Income => &self.incomes,
            SeriesKind::Asset => &self.assets,
        }
    }
}

pub fn make_chart_data(
    model: &ModelData,
    roi: &ViewInterval,
    evaluations: &[Evaluation],
    settings: &ViewSettings,
) -> ChartData {
    let buckets = Buckets::new(roi, settings.frequency);
    let birth_date = model
        .setting(BIRTH_DATE_SETTING)
        .and_then(|s| match resolve_date(&s.value, &model.triggers) {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!(error = %e, "WARNING: birth date ignored for chart labels");
                None
            }
        });
    let labels = buckets.labels(birth_date);

    let values = aggregate::replay(model, evaluations, &buckets, settings);

    ChartData {
        expenses: aggregate::emit(&values, SeriesKind::Expense, &buckets, &labels),
        incomes: aggregate::emit(&values, SeriesKind::Income, &buckets, &labels),
        assets: aggregate::emit(&values, SeriesKind::Asset, &buckets, &labels),
        labels,
    }
}

/// Draw several views of the same log
pub fn make_chart_data_for_views(
    model: &ModelData,
    roi: &ViewInterval,
    evaluations: &[Evaluation],
    views: &[ViewSettings],
) -> Vec<ChartData> {
    #[cfg(feature = "parallel")]
    let charts = views
        .par_iter()
        .map(|settings| make_chart_data(model, roi, evaluations, settings))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let charts = views
        .iter()
        .map(|settings| make_chart_data(model, roi, evaluations, settings))
        .collect();

    charts
}
