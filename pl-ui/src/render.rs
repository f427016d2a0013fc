//! Plain-text rendering of the dashboard: metric cards, the forecast table,
//! a horizontal bar chart and the todo list.

use pl_core::calculations::MetricCard;
use pl_core::{ChartRecord, ForecastEngine, LineItem, TodoList, YearKind};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::utils::{format_amount, format_deduction, format_millions, format_percent};

const LABEL_WIDTH: usize = 26;
const COLUMN_WIDTH: usize = 13;
pub const BAR_WIDTH: usize = 40;
const BAR_CHAR: char = '█';

fn year_marker(kind: YearKind) -> char {
    match kind {
        YearKind::Actual => 'A',
        YearKind::Planned => 'P',
    }
}

fn push_row<I>(
    out: &mut String,
    label: &str,
    cells: I,
) where
    I: IntoIterator<Item = String>,
{
    out.push_str(&format!("{label:<LABEL_WIDTH$}"));
    for cell in cells {
        out.push_str(&format!("{cell:>COLUMN_WIDTH$}"));
    }
    out.push('\n');
}

pub fn render_metrics(cards: &[MetricCard]) -> String {
    let mut out = String::new();
    for card in cards {
        let sign = if card.year_over_year > Decimal::ZERO { "+" } else { "" };
        out.push_str(&format!(
            "{} ({} FY{})\n",
            card.title, card.subtitle, card.year
        ));
        out.push_str(&format!(
            "  {} {}   YoY {sign}{:.2}%   per company ({}): {}\n",
            format_amount(card.value),
            card.unit,
            card.year_over_year,
            card.company_count,
            format_amount(card.per_company),
        ));
    }
    out
}

/// Ten-year P&L table, followed by the editable rows that are switched on.
pub fn render_table(engine: &ForecastEngine) -> String {
    let rows = engine.rows();
    let breakdowns = engine.line_items();
    let mut out = String::new();

    push_row(
        &mut out,
        "Fiscal year",
        rows.iter().map(|r| format!("{}{}", r.year, year_marker(r.kind))),
    );
    push_row(&mut out, "Revenue", rows.iter().map(|r| format_amount(r.revenue)));
    push_line_items(&mut out, breakdowns.iter().map(|b| b.revenue.as_slice()).collect());
    push_row(&mut out, "Cost", rows.iter().map(|r| format_amount(r.cost)));
    push_line_items(&mut out, breakdowns.iter().map(|b| b.cost.as_slice()).collect());
    push_row(
        &mut out,
        "Gross profit",
        rows.iter().map(|r| format_amount(r.gross_profit)),
    );
    push_row(&mut out, "SG&A", rows.iter().map(|r| format_deduction(r.sga)));
    push_row(
        &mut out,
        "Operating profit",
        rows.iter().map(|r| format_amount(r.operating_profit)),
    );

    for category in engine.visible_parameter_rows() {
        push_row(
            &mut out,
            category.label(),
            engine.window().years().map(|(index, year)| {
                if engine.window().kind_of(year).is_planned() {
                    format_percent(engine.parameters().get(category, index))
                } else {
                    String::new()
                }
            }),
        );
    }
    out
}

/// One indented row per sub-category; `per_year[i]` holds year `i`'s items.
fn push_line_items(
    out: &mut String,
    per_year: Vec<&[LineItem]>,
) {
    let Some(first) = per_year.first() else {
        return;
    };
    for (position, item) in first.iter().enumerate() {
        push_row(
            out,
            &format!("  {}", item.name),
            per_year
                .iter()
                .map(|items| format_amount(items[position].amount)),
        );
    }
}

fn bar(
    value: Decimal,
    max: Decimal,
) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }
    let len = (value / max * Decimal::from(BAR_WIDTH))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    BAR_CHAR.to_string().repeat(len)
}

/// Revenue, gross profit and cost per year as horizontal bars, labelled in
/// millions. Bars are scaled to the largest amount in the dataset.
pub fn render_chart(records: &[ChartRecord]) -> String {
    let max = records
        .iter()
        .flat_map(|r| [r.revenue, r.gross_profit, r.cost])
        .max()
        .unwrap_or(Decimal::ZERO);

    let mut out = String::from("Revenue / gross profit / cost (millions)\n");
    for record in records {
        let series = [
            ("revenue", record.revenue),
            ("gross profit", record.gross_profit),
            ("cost", record.cost),
        ];
        for (i, (name, value)) in series.into_iter().enumerate() {
            let year = if i == 0 { record.year.to_string() } else { String::new() };
            out.push_str(&format!(
                "{year:<6}{name:<14}{} {}\n",
                bar(value, max),
                format_millions(value)
            ));
        }
    }
    out
}

pub fn render_todos(todos: &TodoList) -> String {
    if todos.is_empty() {
        return "No todos yet.\n".to_string();
    }
    let mut out = format!(
        "completed: {} / total: {}\n",
        todos.completed_count(),
        todos.len()
    );
    for todo in todos.iter() {
        let mark = if todo.completed { 'x' } else { ' ' };
        out.push_str(&format!(
            "[{mark}] {}  {}  {}\n",
            todo.id, todo.user_name, todo.title
        ));
    }
    out
}

pub fn chart_json(records: &[ChartRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
