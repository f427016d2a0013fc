//! Profit-and-loss calculation modules.
//!
//! This module provides the forecast engine and the presentation figures
//! derived from it: line-item breakdowns and summary metric cards.

pub mod common;
pub mod forecast;
pub mod line_items;
pub mod metrics;

pub use forecast::{
    ForecastConfig, ForecastConfigError, ForecastEngine, HistoricalConstants, YearPolicy,
};
pub use line_items::{COST_WEIGHTS, REVENUE_WEIGHTS, WeightTable, distribute_by_weight};
pub use metrics::{DEFAULT_COMPANY_COUNT, MetricCard, metric_cards};
