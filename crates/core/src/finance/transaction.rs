//! Income/expense transactions and dashboard summaries.

use businessos_shared::types::TransactionId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::amount::total;
use crate::listing::{SortDirection, any_field_matches, category_matches};
use crate::validation::{not_blank, positive};

/// Transaction direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money in.
    Income,
    /// Money out.
    Expense,
}

/// A recorded transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Booking date.
    pub date: NaiveDate,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Direction.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Category label.
    pub category: String,
    /// Amount, always positive.
    pub amount: Decimal,
}

/// Input for creating or updating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransactionInput {
    /// Booking date.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// Direction.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Category label.
    #[validate(custom(function = "not_blank", message = "Category is required"))]
    pub category: String,
    /// Amount.
    #[validate(custom(function = "positive"))]
    pub amount: Decimal,
}

/// Filter for the transaction table.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Restricts to one direction.
    pub transaction_type: Option<TransactionType>,
    /// Category, `"all"` for any.
    pub category: String,
    /// Matches description or category.
    pub search: String,
    /// Inclusive lower date bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    /// True if the transaction passes the filter.
    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.transaction_type.is_none_or(|t| t == tx.transaction_type)
            && category_matches(&tx.category, &self.category)
            && self.from.is_none_or(|from| tx.date >= from)
            && self.to.is_none_or(|to| tx.date <= to)
            && any_field_matches([tx.description.as_str(), tx.category.as_str()], &self.search)
    }
}

/// Filters transactions and orders them by date.
#[must_use]
pub fn filter_transactions(
    transactions: &[Transaction],
    filter: &TransactionFilter,
    direction: SortDirection,
) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| filter.matches(tx))
        .cloned()
        .collect();
    out.sort_by(|a, b| direction.apply(a.date.cmp(&b.date)));
    out
}

/// Income/expense totals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionSummary {
    /// Sum of income.
    pub income: Decimal,
    /// Sum of expenses.
    pub expense: Decimal,
    /// Income minus expenses.
    pub net: Decimal,
}

/// Totals income and expenses.
#[must_use]
pub fn summarize(transactions: &[Transaction]) -> TransactionSummary {
    let of_type = |kind: TransactionType| {
        total(
            transactions
                .iter()
                .filter(move |tx| tx.transaction_type == kind)
                .map(|tx| tx.amount),
        )
    };
    let income = of_type(TransactionType::Income);
    let expense = of_type(TransactionType::Expense);
    TransactionSummary {
        income,
        expense,
        net: income.saturating_sub(expense),
    }
}

/// Totals per category for one direction, largest first (ties keep first-seen order).
#[must_use]
pub fn totals_by_category(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> Vec<(String, Decimal)> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.transaction_type == transaction_type)
    {
        match totals.iter_mut().find(|(category, _)| *category == tx.category) {
            Some((_, sum)) => *sum = sum.saturating_add(tx.amount),
            None => totals.push((tx.category.clone(), tx.amount)),
        }
    }
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tx(day: u32, kind: TransactionType, category: &str, amount: Decimal) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            description: format!("{category} on {day}"),
            transaction_type: kind,
            category: category.to_string(),
            amount,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(3, TransactionType::Income, "Sales", dec!(5000)),
            tx(1, TransactionType::Expense, "Rent", dec!(1200)),
            tx(2, TransactionType::Expense, "Travel", dec!(300.50)),
            tx(5, TransactionType::Expense, "Travel", dec!(99.50)),
        ]
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&sample());
        assert_eq!(summary.income, dec!(5000));
        assert_eq!(summary.expense, dec!(1600));
        assert_eq!(summary.net, dec!(3400));
    }

    #[test]
    fn test_totals_by_category() {
        let totals = totals_by_category(&sample(), TransactionType::Expense);
        assert_eq!(
            totals,
            vec![("Rent".to_string(), dec!(1200)), ("Travel".to_string(), dec!(400))]
        );
    }

    #[test]
    fn test_filter_by_type_and_range() {
        let filter = TransactionFilter {
            transaction_type: Some(TransactionType::Expense),
            category: "all".into(),
            from: NaiveDate::from_ymd_opt(2026, 3, 2),
            ..TransactionFilter::default()
        };
        let out = filter_transactions(&sample(), &filter, SortDirection::Desc);
        let days: Vec<_> = out.iter().map(|t| t.date.to_string()).collect();
        assert_eq!(days, ["2026-03-05", "2026-03-02"]);
    }

    #[test]
    fn test_wire_type_field() {
        let json = serde_json::to_value(&sample()[0]).unwrap();
        assert_eq!(json["type"], "Income");
    }
}
