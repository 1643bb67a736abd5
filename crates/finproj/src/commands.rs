//! What each subcommand does, separated from argument parsing

use color_eyre::eyre::{Result, WrapErr};
use finproj_core::chart::{AssetView, Detail, Focus, Frequency};
use finproj_core::{
    ChartData, Evaluation, ModelData, ViewInterval, ViewSettings, get_evaluations,
    make_chart_data, validate,
};

/// Chart options from the command line; anything unset falls back to the
/// model's own view settings
#[derive(Debug, Clone, Default)]
pub struct ChartOptions {
    pub detail: Option<Detail>,
    pub frequency: Option<Frequency>,
    pub asset_view: Option<AssetView>,
    pub asset_focus: Option<String>,
    pub income_focus: Option<String>,
    pub expense_focus: Option<String>,
}

impl ChartOptions {
    pub fn view_settings(&self, model: &ModelData) -> ViewSettings {
        let mut settings = ViewSettings::from_model(model);
        if let Some(detail) = self.detail {
            settings = settings.detail(detail);
        }
        if let Some(frequency) = self.frequency {
            settings = settings.frequency(frequency);
        }
        if let Some(asset_view) = self.asset_view {
            settings = settings.asset_view(asset_view);
        }
        if let Some(name) = &self.asset_focus {
            settings = settings.asset_focus(Focus::resolve(name, model));
        }
        if let Some(name) = &self.income_focus {
            settings = settings.income_focus(Focus::resolve(name, model));
        }
        if let Some(name) = &self.expense_focus {
            settings = settings.expense_focus(Focus::resolve(name, model));
        }
        settings
    }
}

/// Validate the model and read its view range
fn prepare(model: &ModelData) -> Result<ViewInterval> {
    validate(model).wrap_err("model is invalid")?;
    ViewInterval::from_model(model).wrap_err("model has no usable view range")
}

pub fn evaluate(model: &ModelData) -> Result<Vec<Evaluation>> {
    let roi = prepare(model)?;
    let evaluations = get_evaluations(model, &roi);
    tracing::info!(
        start = %roi.start,
        end = %roi.end,
        evaluations = evaluations.len(),
        "Evaluated model"
    );
    Ok(evaluations)
}

pub fn chart(model: &ModelData, options: &ChartOptions) -> Result<ChartData> {
    let roi = prepare(model)?;
    let evaluations = get_evaluations(model, &roi);
    let settings = options.view_settings(model);
    tracing::info!(
        detail = ?settings.detail,
        frequency = ?settings.frequency,
        asset_view = %settings.asset_view,
        "Charting model"
    );
    Ok(make_chart_data(model, &roi, &evaluations, &settings))
}
