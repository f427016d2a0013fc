//! Fixed sub-category breakdowns for the detailed forecast table.
//!
//! Each breakdown is a declarative [`WeightTable`]: a list of `(name, weight)`
//! pairs over a common denominator. [`distribute_by_weight`] is the single
//! routine that turns an aggregate into line items.
//!
//! | Revenue sub-category    | Weight |
//! |-------------------------|--------|
//! | Store sales             | 30%    |
//! | Mail-order sales        | 20%    |
//! | Cloud service           | 15%    |
//! | Agency service          | 12%    |
//! | Contract manufacturing  | 10%    |
//! | Consulting              | 8%     |
//! | Other revenue           | 5%     |
//!
//! Cost is split evenly across seven sub-categories.

use rust_decimal::Decimal;

use crate::models::LineItem;

/// Named weights sharing one denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightTable {
    pub denominator: u32,
    pub entries: &'static [(&'static str, u32)],
}

impl WeightTable {
    /// Sum of all weights; equals the denominator for a complete table.
    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|(_, w)| w).sum()
    }
}

pub const REVENUE_WEIGHTS: WeightTable = WeightTable {
    denominator: 100,
    entries: &[
        ("Store sales", 30),
        ("Mail-order sales", 20),
        ("Cloud service", 15),
        ("Agency service", 12),
        ("Contract manufacturing", 10),
        ("Consulting", 8),
        ("Other revenue", 5),
    ],
};

pub const COST_WEIGHTS: WeightTable = WeightTable {
    denominator: 7,
    entries: &[
        ("Material cost", 1),
        ("Labor cost", 1),
        ("Outsourcing cost", 1),
        ("Depreciation", 1),
        ("Rent", 1),
        ("Utilities", 1),
        ("Other cost", 1),
    ],
};

/// Splits `total` into one line item per table entry.
///
/// Each amount is `total * weight / denominator`, in table order.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use pl_core::calculations::line_items::{distribute_by_weight, REVENUE_WEIGHTS};
///
/// let items = distribute_by_weight(dec!(1000), &REVENUE_WEIGHTS);
///
/// assert_eq!(items[0].name, "Store sales");
/// assert_eq!(items[0].amount, dec!(300));
/// assert_eq!(items[6].amount, dec!(50));
/// ```
pub fn distribute_by_weight(
    total: Decimal,
    table: &WeightTable,
) -> Vec<LineItem> {
    let denominator = Decimal::from(table.denominator);
    table
        .entries
        .iter()
        .map(|&(name, weight)| LineItem {
            name,
            amount: total * Decimal::from(weight) / denominator,
        })
        .collect()
}
