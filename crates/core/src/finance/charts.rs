//! Chart-ready reshaping of backend budget performance.
//!
//! Nothing here computes spending: every figure comes from
//! [`BudgetPerformance`]; these functions only reshape and format it.

use businessos_shared::types::{Currency, format_currency, format_percentage};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::{percentage, running_totals, total};
use super::budget::{BudgetPerformance, CategoryStatus};

/// One row of the category breakdown table/bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChartRow {
    /// Category name (x-axis label).
    pub category: String,
    /// Allocated amount.
    pub allocated: Decimal,
    /// Spent amount.
    pub spent: Decimal,
    /// Remaining amount.
    pub remaining: Decimal,
    /// Spending percentage.
    pub percentage: Decimal,
    /// Status badge.
    pub status: CategoryStatus,
}

/// One pie slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieSlice {
    /// Slice label.
    pub label: String,
    /// Slice value.
    pub value: Decimal,
    /// Share of the whole pie, 0-100, two decimals.
    pub share: Decimal,
}

/// A named series of values aligned with a label axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Series name (legend entry).
    pub name: String,
    /// Values, one per label.
    pub values: Vec<Decimal>,
}

/// Labels plus one or more series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesChart {
    /// Axis labels.
    pub labels: Vec<String>,
    /// Series.
    pub series: Vec<Series>,
}

/// Summary cards above the charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCards {
    /// Formatted total allocated.
    pub allocated: String,
    /// Formatted total spent.
    pub spent: String,
    /// Formatted total remaining.
    pub remaining: String,
    /// Formatted overall percentage.
    pub utilization: String,
}

/// Category rows in backend order.
#[must_use]
pub fn category_rows(performance: &BudgetPerformance) -> Vec<CategoryChartRow> {
    performance
        .categories
        .iter()
        .map(|c| CategoryChartRow {
            category: c.name.clone(),
            allocated: c.allocated_amount,
            spent: c.spent_amount,
            remaining: c.remaining_amount,
            percentage: c.spending_percentage,
            status: c.status,
        })
        .collect()
}

/// Allocation pie: one slice per category, sized by allocated amount.
#[must_use]
pub fn allocation_pie(performance: &BudgetPerformance) -> Vec<PieSlice> {
    to_pie(
        performance
            .categories
            .iter()
            .map(|c| (c.name.as_str(), c.allocated_amount)),
    )
}

/// Spending pie: one slice per category with non-zero spending.
#[must_use]
pub fn spending_pie(performance: &BudgetPerformance) -> Vec<PieSlice> {
    to_pie(
        performance
            .categories
            .iter()
            .filter(|c| !c.spent_amount.is_zero())
            .map(|c| (c.name.as_str(), c.spent_amount)),
    )
}

fn to_pie<'a>(values: impl Iterator<Item = (&'a str, Decimal)> + Clone) -> Vec<PieSlice> {
    let whole = total(values.clone().map(|(_, v)| v));
    values
        .map(|(label, value)| PieSlice {
            label: label.to_string(),
            value,
            share: percentage(value, whole),
        })
        .collect()
}

/// Allocated-vs-spent bar chart.
#[must_use]
pub fn allocated_vs_spent(performance: &BudgetPerformance) -> SeriesChart {
    let labels = performance
        .categories
        .iter()
        .map(|c| c.name.clone())
        .collect();
    SeriesChart {
        labels,
        series: vec![
            Series {
                name: "Allocated".to_string(),
                values: performance
                    .categories
                    .iter()
                    .map(|c| c.allocated_amount)
                    .collect(),
            },
            Series {
                name: "Spent".to_string(),
                values: performance
                    .categories
                    .iter()
                    .map(|c| c.spent_amount)
                    .collect(),
            },
        ],
    }
}

/// Monthly spending line chart, with a cumulative series.
#[must_use]
pub fn monthly_trend(performance: &BudgetPerformance) -> SeriesChart {
    let labels = performance
        .monthly_spending
        .iter()
        .map(|m| m.month.clone())
        .collect();
    let monthly: Vec<Decimal> = performance
        .monthly_spending
        .iter()
        .map(|m| m.amount)
        .collect();
    let cumulative = running_totals(&monthly);
    SeriesChart {
        labels,
        series: vec![
            Series {
                name: "Spending".to_string(),
                values: monthly,
            },
            Series {
                name: "Cumulative".to_string(),
                values: cumulative,
            },
        ],
    }
}

/// Formatted summary cards.
#[must_use]
pub fn summary_cards(performance: &BudgetPerformance, currency: Currency) -> SummaryCards {
    SummaryCards {
        allocated: format_currency(performance.total_allocated, currency),
        spent: format_currency(performance.total_spent, currency),
        remaining: format_currency(performance.total_remaining, currency),
        utilization: format_percentage(performance.overall_percentage),
    }
}

/// Categories needing attention (over budget or near the limit), worst first.
#[must_use]
pub fn attention_list(performance: &BudgetPerformance) -> Vec<CategoryChartRow> {
    let mut rows: Vec<_> = category_rows(performance)
        .into_iter()
        .filter(|r| matches!(r.status, CategoryStatus::OverBudget | CategoryStatus::NearLimit))
        .collect();
    rows.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    rows
}
