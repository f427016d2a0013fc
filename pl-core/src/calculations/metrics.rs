//! Summary cards shown beside the P&L chart.
//!
//! Cards describe the latest actual year (the cutover year): its value,
//! the change against the previous year, and the average per company in
//! the reporting group.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculations::ForecastEngine;
use crate::calculations::common::round_half_up;
use crate::models::YearlyFinancials;

pub const DEFAULT_COMPANY_COUNT: u32 = 320;
pub const METRIC_UNIT: &str = "k JPY";
const METRIC_SUBTITLE: &str = "landing forecast";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub year: i32,
    pub value: Decimal,
    pub unit: &'static str,
    pub company_count: u32,
    /// Percentage change against the previous year, two decimals.
    pub year_over_year: Decimal,
    /// `value / company_count`, two decimals.
    pub per_company: Decimal,
}

/// Percentage change from `previous` to `current`, rounded to two decimals.
///
/// Zero when there is no previous value to compare against.
pub fn year_over_year(
    current: Decimal,
    previous: Option<Decimal>,
) -> Decimal {
    match previous {
        Some(prev) if !prev.is_zero() => {
            round_half_up((current - prev) / prev * Decimal::ONE_HUNDRED)
        }
        _ => Decimal::ZERO,
    }
}

fn per_company(
    value: Decimal,
    company_count: u32,
) -> Decimal {
    if company_count == 0 {
        return Decimal::ZERO;
    }
    round_half_up(value / Decimal::from(company_count))
}

/// Revenue, gross profit, operating profit, ordinary profit and net income
/// cards for the cutover year.
pub fn metric_cards(
    engine: &ForecastEngine,
    company_count: u32,
) -> Vec<MetricCard> {
    let window = engine.window();
    let Some(current) = engine.row_for_year(window.cutover_year) else {
        return Vec::new();
    };
    let previous = engine.row_for_year(window.cutover_year - 1);

    let figures: [(&'static str, fn(&YearlyFinancials) -> Decimal); 5] = [
        ("Revenue", |r| r.revenue),
        ("Gross profit", |r| r.gross_profit),
        ("Operating profit", |r| r.operating_profit),
        // No non-operating items or taxes are modelled, so both equal
        // operating profit.
        ("Ordinary profit", |r| r.operating_profit),
        ("Net income", |r| r.operating_profit),
    ];

    figures
        .into_iter()
        .map(|(title, pick)| {
            let value = pick(&current);
            MetricCard {
                title,
                subtitle: METRIC_SUBTITLE,
                year: current.year,
                value,
                unit: METRIC_UNIT,
                company_count,
                year_over_year: year_over_year(value, previous.as_ref().map(pick)),
                per_company: per_company(value, company_count),
            }
        })
        .collect()
}
