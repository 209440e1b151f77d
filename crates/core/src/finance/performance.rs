//! Budget performance derivation.
//!
//! This is the backend's job: the views only display a
//! [`BudgetPerformance`] they receive. It lives here so the stub backend and
//! any reporting tool derive it the same way.

use rust_decimal::Decimal;

use super::amount::{percentage, total};
use super::budget::{
    Budget, BudgetCategory, BudgetPerformance, CategoryPerformance, CategoryStatus,
    MonthlySpending,
};
use super::transaction::{Transaction, TransactionType};

/// Spent as a percentage of allocated, two decimals. Zero allocation yields zero.
#[must_use]
pub fn spending_percentage(allocated: Decimal, spent: Decimal) -> Decimal {
    percentage(spent, allocated)
}

/// Derives performance from categories and the expense transactions booked
/// inside the budget period. Transactions are matched to a category by
/// case-insensitive name.
#[must_use]
pub fn derive_performance(
    budget: &Budget,
    categories: &[BudgetCategory],
    transactions: &[Transaction],
) -> BudgetPerformance {
    let expenses: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| tx.transaction_type == TransactionType::Expense && budget.covers(tx.date))
        .collect();

    let categories: Vec<CategoryPerformance> = categories
        .iter()
        .filter(|c| c.budget_id == budget.id)
        .map(|c| {
            let spent = total(
                expenses
                    .iter()
                    .filter(|tx| tx.category.eq_ignore_ascii_case(&c.name))
                    .map(|tx| tx.amount),
            );
            let percentage = spending_percentage(c.allocated_amount, spent);
            CategoryPerformance {
                category_id: c.id,
                name: c.name.clone(),
                allocated_amount: c.allocated_amount,
                spent_amount: spent,
                remaining_amount: c.allocated_amount.saturating_sub(spent),
                spending_percentage: percentage,
                status: CategoryStatus::from_percentage(percentage),
            }
        })
        .collect();

    let total_allocated = total(categories.iter().map(|c| c.allocated_amount));
    let total_spent = total(categories.iter().map(|c| c.spent_amount));

    let mut monthly: Vec<MonthlySpending> = Vec::new();
    let mut tracked: Vec<&&Transaction> = expenses
        .iter()
        .filter(|tx| {
            categories
                .iter()
                .any(|c| tx.category.eq_ignore_ascii_case(&c.name))
        })
        .collect();
    tracked.sort_by_key(|tx| tx.date);
    for tx in tracked {
        let month = tx.date.format("%Y-%m").to_string();
        match monthly.last_mut() {
            Some(last) if last.month == month => {
                last.amount = last.amount.saturating_add(tx.amount);
            }
            _ => monthly.push(MonthlySpending {
                month,
                amount: tx.amount,
            }),
        }
    }

    BudgetPerformance {
        budget_id: budget.id,
        budget_name: budget.name.clone(),
        total_allocated,
        total_spent,
        total_remaining: total_allocated.saturating_sub(total_spent),
        overall_percentage: spending_percentage(total_allocated, total_spent),
        categories,
        monthly_spending: monthly,
    }
}
