use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::fiscal_year::WINDOW_LEN;
use crate::calculations::common::round_one_decimal;

/// Largest value a percentage parameter may hold.
pub const MAX_PERCENTAGE: Decimal = Decimal::from_parts(9999, 0, 0, false, 1);

/// The three user-editable forecast drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParameterCategory {
    RevenueIndex,
    CostRatio,
    SgaRatio,
}

impl ParameterCategory {
    pub const ALL: [ParameterCategory; 3] = [Self::RevenueIndex, Self::CostRatio, Self::SgaRatio];

    /// Stable key used on the command line and in parameter CSV files.
    pub fn key(&self) -> &'static str {
        match self {
            Self::RevenueIndex => "revenue-index",
            Self::CostRatio => "cost-ratio",
            Self::SgaRatio => "sga-ratio",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::RevenueIndex => "Revenue index (%)",
            Self::CostRatio => "Cost ratio (%)",
            Self::SgaRatio => "SG&A ratio (%)",
        }
    }

    /// Value every slot starts with.
    pub fn default_value(&self) -> Decimal {
        match self {
            Self::RevenueIndex => Decimal::ONE_HUNDRED,
            Self::CostRatio => Decimal::from(70),
            Self::SgaRatio => Decimal::from(20),
        }
    }
}

impl fmt::Display for ParameterCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown parameter category '{0}' (expected revenue-index, cost-ratio or sga-ratio)")]
pub struct ParseCategoryError(pub String);

impl FromStr for ParameterCategory {
    type Err = ParseCategoryError;

    /// Accepts `cost-ratio`, `cost_ratio` and `cost ratio`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "revenue-index" => Ok(Self::RevenueIndex),
            "cost-ratio" => Ok(Self::CostRatio),
            "sga-ratio" => Ok(Self::SgaRatio),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

/// A rejected parameter edit. The stored value is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("{category} value {value} is outside 0 to 999.9")]
    OutOfRange {
        category: ParameterCategory,
        value: Decimal,
    },

    #[error("'{0}' is not a number")]
    NotNumeric(String),

    #[error("index {0} is outside the ten-year window")]
    IndexOutOfWindow(usize),
}

/// Percentage inputs for every fiscal-year slot, one row per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentageParameterSet {
    revenue_index: [Decimal; WINDOW_LEN],
    cost_ratio: [Decimal; WINDOW_LEN],
    sga_ratio: [Decimal; WINDOW_LEN],
}

impl Default for PercentageParameterSet {
    fn default() -> Self {
        Self {
            revenue_index: [ParameterCategory::RevenueIndex.default_value(); WINDOW_LEN],
            cost_ratio: [ParameterCategory::CostRatio.default_value(); WINDOW_LEN],
            sga_ratio: [ParameterCategory::SgaRatio.default_value(); WINDOW_LEN],
        }
    }
}

impl PercentageParameterSet {
    pub fn values(
        &self,
        category: ParameterCategory,
    ) -> &[Decimal; WINDOW_LEN] {
        match category {
            ParameterCategory::RevenueIndex => &self.revenue_index,
            ParameterCategory::CostRatio => &self.cost_ratio,
            ParameterCategory::SgaRatio => &self.sga_ratio,
        }
    }

    fn values_mut(
        &mut self,
        category: ParameterCategory,
    ) -> &mut [Decimal; WINDOW_LEN] {
        match category {
            ParameterCategory::RevenueIndex => &mut self.revenue_index,
            ParameterCategory::CostRatio => &mut self.cost_ratio,
            ParameterCategory::SgaRatio => &mut self.sga_ratio,
        }
    }

    /// Value for one slot.
    ///
    /// # Panics
    ///
    /// Panics if `index >= WINDOW_LEN`.
    pub fn get(
        &self,
        category: ParameterCategory,
        index: usize,
    ) -> Decimal {
        self.values(category)[index]
    }

    /// Replaces one slot, storing the value rounded to one decimal place.
    ///
    /// The range check applies to the value as given, so `-0.01` and
    /// `999.94` are rejected while `65.04` is stored as `65.0`.
    ///
    /// # Errors
    ///
    /// * [`ParameterError::IndexOutOfWindow`] if `index >= WINDOW_LEN`.
    /// * [`ParameterError::OutOfRange`] if the value is negative or
    ///   above [`MAX_PERCENTAGE`].
    pub fn set(
        &mut self,
        category: ParameterCategory,
        index: usize,
        value: Decimal,
    ) -> Result<(), ParameterError> {
        if index >= WINDOW_LEN {
            return Err(ParameterError::IndexOutOfWindow(index));
        }

        if value < Decimal::ZERO || value > MAX_PERCENTAGE {
            return Err(ParameterError::OutOfRange { category, value });
        }

        self.values_mut(category)[index] = round_one_decimal(value);
        Ok(())
    }
}

/// Which editable percentage rows are shown under the forecast table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityFlags {
    revenue_index: bool,
    cost_ratio: bool,
    sga_ratio: bool,
}

impl VisibilityFlags {
    pub fn is_visible(
        &self,
        category: ParameterCategory,
    ) -> bool {
        match category {
            ParameterCategory::RevenueIndex => self.revenue_index,
            ParameterCategory::CostRatio => self.cost_ratio,
            ParameterCategory::SgaRatio => self.sga_ratio,
        }
    }

    /// Flips one flag and returns its new state.
    pub fn toggle(
        &mut self,
        category: ParameterCategory,
    ) -> bool {
        let flag = match category {
            ParameterCategory::RevenueIndex => &mut self.revenue_index,
            ParameterCategory::CostRatio => &mut self.cost_ratio,
            ParameterCategory::SgaRatio => &mut self.sga_ratio,
        };
        *flag = !*flag;
        *flag
    }

    /// Categories currently shown, in display order.
    pub fn visible(&self) -> impl Iterator<Item = ParameterCategory> + '_ {
        ParameterCategory::ALL
            .into_iter()
            .filter(|c| self.is_visible(*c))
    }
}
