use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fiscal_year::YearKind;

/// Computed P&L figures for one fiscal year.
///
/// Recomputed from the current parameters on every render; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyFinancials {
    pub year: i32,
    pub kind: YearKind,
    pub revenue: Decimal,
    pub cost: Decimal,
    /// Always `revenue - cost`.
    pub gross_profit: Decimal,
    /// Selling, general and administrative expenses as a non-negative
    /// magnitude. Displayed as a deduction.
    pub sga: Decimal,
    /// Always `gross_profit - sga`.
    pub operating_profit: Decimal,
}

/// One bar group of the revenue / gross profit / cost chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRecord {
    pub year: i32,
    pub revenue: Decimal,
    pub gross_profit: Decimal,
    pub cost: Decimal,
}

impl From<&YearlyFinancials> for ChartRecord {
    fn from(row: &YearlyFinancials) -> Self {
        Self {
            year: row.year,
            revenue: row.revenue,
            gross_profit: row.gross_profit,
            cost: row.cost,
        }
    }
}

/// A named share of an aggregate figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub name: &'static str,
    pub amount: Decimal,
}

/// Revenue and cost broken down into their sub-categories for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItemBreakdown {
    pub year: i32,
    pub revenue: Vec<LineItem>,
    pub cost: Vec<LineItem>,
}
