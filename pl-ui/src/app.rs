use std::path::Path;

use anyhow::Context;
use pl_core::ForecastEngine;
use pl_core::calculations::metric_cards;
use tracing::info;

use crate::config::DashboardConfig;
use crate::csv_loader;
use crate::render::{render_chart, render_metrics, render_table};

/// Builds the engine from configuration and an optional parameter CSV.
pub fn build_engine(
    config: &DashboardConfig,
    params: Option<&Path>,
) -> anyhow::Result<ForecastEngine> {
    let engine =
        ForecastEngine::new(config.forecast_config()).context("invalid forecast configuration")?;

    let Some(path) = params else {
        return Ok(engine);
    };
    let parameters = csv_loader::load_from_file(path)
        .with_context(|| format!("cannot load parameters from '{}'", path.display()))?;
    info!(path = %path.display(), "parameters imported");
    Ok(engine.with_parameters(parameters))
}

/// Metric cards, forecast table and bar chart as one printable report.
pub fn forecast_report(
    engine: &ForecastEngine,
    company_count: u32,
) -> String {
    let cards = metric_cards(engine, company_count);
    format!(
        "{}\n{}\n{}",
        render_metrics(&cards),
        render_table(engine),
        render_chart(&engine.chart_data())
    )
}
