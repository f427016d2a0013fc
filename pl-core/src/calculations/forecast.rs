//! Profit-and-loss forecast across the ten-year fiscal window.
//!
//! The engine projects revenue, cost, gross profit and SG&A for every year
//! of a [`ForecastWindow`]. Years up to and including the cutover year are
//! *actual* and follow fixed historical constants; later years are *planned*
//! and follow the user-editable [`PercentageParameterSet`].
//!
//! # Row Structure
//!
//! | Line             | Actual year                          | Planned year                      |
//! |------------------|--------------------------------------|-----------------------------------|
//! | Revenue          | baseline × (0.7 + index × 0.1)       | baseline × revenue index / 100    |
//! | Cost             | revenue × 0.7                        | revenue × cost ratio / 100        |
//! | Gross profit     | revenue − cost                       | revenue − cost                    |
//! | SG&A             | revenue × 0.2                        | revenue × SG&A ratio / 100        |
//! | Operating profit | gross profit − SG&A                  | gross profit − SG&A               |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pl_core::calculations::{ForecastConfig, ForecastEngine};
//!
//! let config = ForecastConfig {
//!     baseline_revenue: dec!(840432),
//!     ..ForecastConfig::default()
//! };
//! let engine = ForecastEngine::new(config).unwrap();
//!
//! let first = engine.compute_row(2019, 0);
//! assert_eq!(first.revenue, dec!(588302.4));
//! assert_eq!(first.cost, dec!(411811.68));
//! assert_eq!(first.gross_profit, dec!(176490.72));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{parse_percentage, percent_to_ratio};
use crate::calculations::line_items::{COST_WEIGHTS, REVENUE_WEIGHTS, distribute_by_weight};
use crate::models::{
    ChartRecord, ForecastWindow, LineItemBreakdown, MAX_PERCENTAGE, ParameterCategory,
    ParameterError, PercentageParameterSet, VisibilityFlags, WINDOW_LEN, YearKind,
    YearlyFinancials,
};

/// Room above peak revenue for the products derived from it: cost and SG&A
/// ratios up to 999.9% and line-item weights up to their denominator of 100.
const REVENUE_HEADROOM: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Errors raised when a [`ForecastConfig`] is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForecastConfigError {
    /// The baseline revenue must be positive.
    #[error("baseline revenue must be positive, got {0}")]
    InvalidBaseline(Decimal),

    /// The cutover year must fall inside the window.
    #[error("cutover year {cutover} is outside the window {start}-{end}")]
    CutoverOutsideWindow { cutover: i32, start: i32, end: i32 },

    /// A historical ratio must be between 0 and 1.
    #[error("historical {name} must be between 0 and 1, got {value}")]
    InvalidHistoricalRatio { name: &'static str, value: Decimal },

    /// The historical growth curve must be non-negative.
    #[error("historical growth {name} must be non-negative, got {value}")]
    InvalidGrowth { name: &'static str, value: Decimal },

    /// The last year of the window does not fit in an `i32`.
    #[error("a ten-year window cannot start at {start}")]
    WindowOutOfRange { start: i32 },

    /// Projections from this baseline would overflow `Decimal`.
    #[error("baseline revenue {0} is too large to project")]
    BaselineTooLarge(Decimal),
}

/// Fixed constants applied to actual years.
///
/// Actual-year revenue is `baseline × (growth_base + index × growth_step)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalConstants {
    pub growth_base: Decimal,
    pub growth_step: Decimal,
    pub cost_ratio: Decimal,
    pub sga_ratio: Decimal,
}

impl Default for HistoricalConstants {
    fn default() -> Self {
        Self {
            growth_base: Decimal::new(7, 1),
            growth_step: Decimal::new(1, 1),
            cost_ratio: Decimal::new(7, 1),
            sga_ratio: Decimal::new(2, 1),
        }
    }
}

/// Configuration for a [`ForecastEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Reference revenue (in thousands) all projections scale from.
    pub baseline_revenue: Decimal,
    pub window: ForecastWindow,
    pub historical: HistoricalConstants,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            baseline_revenue: Decimal::from(840_432),
            window: ForecastWindow::default(),
            historical: HistoricalConstants::default(),
        }
    }
}

impl ForecastConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastConfigError`] if:
    /// - `baseline_revenue` is not positive
    /// - `window.cutover_year` is outside the window
    /// - a historical ratio is not in [0, 1]
    /// - a historical growth term is negative
    /// - the window runs past `i32::MAX`
    /// - projecting from the baseline could overflow `Decimal`
    pub fn validate(&self) -> Result<(), ForecastConfigError> {
        if self.baseline_revenue <= Decimal::ZERO {
            return Err(ForecastConfigError::InvalidBaseline(self.baseline_revenue));
        }

        if self.window.checked_end().is_none() {
            return Err(ForecastConfigError::WindowOutOfRange {
                start: self.window.start,
            });
        }

        if !self.window.contains(self.window.cutover_year) {
            return Err(ForecastConfigError::CutoverOutsideWindow {
                cutover: self.window.cutover_year,
                start: self.window.start,
                end: self.window.end(),
            });
        }

        for (name, value) in [
            ("cost ratio", self.historical.cost_ratio),
            ("sga ratio", self.historical.sga_ratio),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(ForecastConfigError::InvalidHistoricalRatio { name, value });
            }
        }

        for (name, value) in [
            ("base", self.historical.growth_base),
            ("step", self.historical.growth_step),
        ] {
            if value < Decimal::ZERO {
                return Err(ForecastConfigError::InvalidGrowth { name, value });
            }
        }

        let fits = self
            .peak_revenue_factor()
            .and_then(|factor| self.baseline_revenue.checked_mul(factor))
            .and_then(|peak| peak.checked_mul(REVENUE_HEADROOM));
        if fits.is_none() {
            return Err(ForecastConfigError::BaselineTooLarge(self.baseline_revenue));
        }

        Ok(())
    }

    /// Largest multiple of the baseline any year's revenue can reach: the
    /// last actual-curve step or a revenue index of 999.9%.
    fn peak_revenue_factor(&self) -> Option<Decimal> {
        let last_index = Decimal::from(WINDOW_LEN - 1);
        let actual_peak = self
            .historical
            .growth_step
            .checked_mul(last_index)?
            .checked_add(self.historical.growth_base)?;
        Some(actual_peak.max(percent_to_ratio(MAX_PERCENTAGE)))
    }
}

/// How figures are derived for one fiscal year.
///
/// Selected by a single cutover comparison in [`ForecastEngine::policy_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearPolicy<'a> {
    /// Fixed historical progression; user parameters are ignored.
    Actual(&'a HistoricalConstants),
    /// Driven by the percentage inputs for the year's window slot.
    Planned(&'a PercentageParameterSet),
}

impl YearPolicy<'_> {
    pub fn kind(&self) -> YearKind {
        match self {
            Self::Actual(_) => YearKind::Actual,
            Self::Planned(_) => YearKind::Planned,
        }
    }

    pub fn revenue(
        &self,
        baseline: Decimal,
        index: usize,
    ) -> Decimal {
        match self {
            Self::Actual(constants) => {
                baseline * (constants.growth_base + Decimal::from(index) * constants.growth_step)
            }
            Self::Planned(params) => {
                baseline * percent_to_ratio(params.get(ParameterCategory::RevenueIndex, index))
            }
        }
    }

    pub fn cost_ratio(
        &self,
        index: usize,
    ) -> Decimal {
        match self {
            Self::Actual(constants) => constants.cost_ratio,
            Self::Planned(params) => {
                percent_to_ratio(params.get(ParameterCategory::CostRatio, index))
            }
        }
    }

    pub fn sga_ratio(
        &self,
        index: usize,
    ) -> Decimal {
        match self {
            Self::Actual(constants) => constants.sga_ratio,
            Self::Planned(params) => percent_to_ratio(params.get(ParameterCategory::SgaRatio, index)),
        }
    }
}

/// Forecast state plus the pure computations over it.
///
/// Holds the only mutable state of the P&L page: the percentage parameters
/// and the visibility flags. Every computation is derived fresh from that
/// state; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastEngine {
    config: ForecastConfig,
    parameters: PercentageParameterSet,
    visibility: VisibilityFlags,
}

impl ForecastEngine {
    /// Creates an engine with default parameters and all rows hidden.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastConfigError`] if the configuration fails validation.
    pub fn new(config: ForecastConfig) -> Result<Self, ForecastConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            parameters: PercentageParameterSet::default(),
            visibility: VisibilityFlags::default(),
        })
    }

    /// Replaces the whole parameter set, e.g. after a CSV import.
    pub fn with_parameters(
        mut self,
        parameters: PercentageParameterSet,
    ) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn window(&self) -> &ForecastWindow {
        &self.config.window
    }

    pub fn parameters(&self) -> &PercentageParameterSet {
        &self.parameters
    }

    pub fn visibility(&self) -> &VisibilityFlags {
        &self.visibility
    }

    /// Chooses the computation policy for a fiscal year.
    pub fn policy_for(
        &self,
        year: i32,
    ) -> YearPolicy<'_> {
        match self.config.window.kind_of(year) {
            YearKind::Actual => YearPolicy::Actual(&self.config.historical),
            YearKind::Planned => YearPolicy::Planned(&self.parameters),
        }
    }

    /// Revenue for `year` at window position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the window and `year` is planned.
    pub fn compute_revenue(
        &self,
        year: i32,
        index: usize,
    ) -> Decimal {
        self.policy_for(year)
            .revenue(self.config.baseline_revenue, index)
    }

    pub fn compute_cost_ratio(
        &self,
        year: i32,
        index: usize,
    ) -> Decimal {
        self.policy_for(year).cost_ratio(index)
    }

    pub fn compute_sga_ratio(
        &self,
        year: i32,
        index: usize,
    ) -> Decimal {
        self.policy_for(year).sga_ratio(index)
    }

    /// Full P&L row for one fiscal year.
    pub fn compute_row(
        &self,
        year: i32,
        index: usize,
    ) -> YearlyFinancials {
        let policy = self.policy_for(year);

        let revenue = policy.revenue(self.config.baseline_revenue, index);
        let cost = revenue * policy.cost_ratio(index);
        let gross_profit = revenue - cost;
        let sga = revenue * policy.sga_ratio(index);

        YearlyFinancials {
            year,
            kind: policy.kind(),
            revenue,
            cost,
            gross_profit,
            sga,
            operating_profit: gross_profit - sga,
        }
    }

    /// Revenue and cost sub-categories for one fiscal year.
    pub fn compute_line_items(
        &self,
        year: i32,
        index: usize,
    ) -> LineItemBreakdown {
        let row = self.compute_row(year, index);

        LineItemBreakdown {
            year,
            revenue: distribute_by_weight(row.revenue, &REVENUE_WEIGHTS),
            cost: distribute_by_weight(row.cost, &COST_WEIGHTS),
        }
    }

    /// All ten rows in window order.
    pub fn rows(&self) -> Vec<YearlyFinancials> {
        self.config
            .window
            .years()
            .map(|(index, year)| self.compute_row(year, index))
            .collect()
    }

    /// Row for a fiscal year, if it is inside the window.
    pub fn row_for_year(
        &self,
        year: i32,
    ) -> Option<YearlyFinancials> {
        self.config
            .window
            .index_of(year)
            .map(|index| self.compute_row(year, index))
    }

    /// Line-item breakdowns for all ten years.
    pub fn line_items(&self) -> Vec<LineItemBreakdown> {
        self.config
            .window
            .years()
            .map(|(index, year)| self.compute_line_items(year, index))
            .collect()
    }

    /// Dataset for the bar chart.
    pub fn chart_data(&self) -> Vec<ChartRecord> {
        self.rows().iter().map(ChartRecord::from).collect()
    }

    /// Replaces one percentage slot.
    ///
    /// Actual-year slots may be written; their values are simply unused.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] and keeps the prior value when the index
    /// is outside the window or the value is outside `[0, 999.9]`.
    pub fn set_parameter(
        &mut self,
        category: ParameterCategory,
        index: usize,
        value: Decimal,
    ) -> Result<(), ParameterError> {
        self.parameters.set(category, index, value)?;
        debug!(%category, index, %value, "parameter updated");
        Ok(())
    }

    /// Like [`set_parameter`](Self::set_parameter) but parses free text.
    ///
    /// # Errors
    ///
    /// [`ParameterError::NotNumeric`] for text that is not a number, plus
    /// everything [`set_parameter`](Self::set_parameter) rejects.
    pub fn set_parameter_str(
        &mut self,
        category: ParameterCategory,
        index: usize,
        input: &str,
    ) -> Result<(), ParameterError> {
        let value = parse_percentage(input)?;
        self.set_parameter(category, index, value)
    }

    /// Flips the visibility of one editable row and returns the new state.
    pub fn toggle_visibility(
        &mut self,
        category: ParameterCategory,
    ) -> bool {
        let visible = self.visibility.toggle(category);
        debug!(%category, visible, "parameter row visibility toggled");
        visible
    }

    /// Categories whose editable row is currently rendered.
    pub fn visible_parameter_rows(&self) -> Vec<ParameterCategory> {
        self.visibility.visible().collect()
    }
}
