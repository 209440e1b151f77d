//! Transactions page.
//!
//! Shows the filtered ledger with income/expense totals and the expense
//! breakdown by category. Totals cover the filtered rows.

use std::sync::Arc;

use businessos_core::finance::{
    Transaction, TransactionFilter, TransactionInput, TransactionSummary, TransactionType,
    filter_transactions, summarize, totals_by_category,
};
use businessos_core::listing::SortDirection;
use businessos_core::ports::TransactionApi;
use businessos_core::validate_input;
use businessos_shared::types::TransactionId;
use rust_decimal::Decimal;

use crate::notify::Notifier;
use crate::scope::ViewScope;

/// State of the transactions page.
pub struct TransactionsView {
    api: Arc<dyn TransactionApi>,
    scope: ViewScope,
    transactions: Vec<Transaction>,
    filter: TransactionFilter,
    direction: SortDirection,
}

impl TransactionsView {
    /// Empty page, newest first; call [`load`](Self::load) to fill it.
    pub fn new(api: Arc<dyn TransactionApi>, notifier: Notifier) -> Self {
        Self {
            api,
            scope: ViewScope::new(notifier),
            transactions: Vec::new(),
            filter: TransactionFilter::default(),
            direction: SortDirection::Desc,
        }
    }

    /// Lifetime of the page.
    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Transactions as last fetched.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Filter controls.
    pub fn filter_mut(&mut self) -> &mut TransactionFilter {
        &mut self.filter
    }

    /// Date order of [`visible`](Self::visible).
    pub fn set_direction(&mut self, direction: SortDirection) {
        self.direction = direction;
    }

    /// Filtered rows ordered by date.
    pub fn visible(&self) -> Vec<Transaction> {
        filter_transactions(&self.transactions, &self.filter, self.direction)
    }

    /// Income, expense and net of the filtered rows.
    pub fn summary(&self) -> TransactionSummary {
        summarize(&self.visible())
    }

    /// Expense totals per category over the filtered rows, largest first.
    pub fn expense_breakdown(&self) -> Vec<(String, Decimal)> {
        totals_by_category(&self.visible(), TransactionType::Expense)
    }

    /// Fetches the ledger. Returns `false` on failure, leaving it as it was.
    pub async fn load(&mut self) -> bool {
        let fetched = self
            .scope
            .run("Failed to load transactions", self.api.list_transactions())
            .await;
        match fetched {
            Some(transactions) => {
                self.transactions = transactions;
                true
            }
            None => false,
        }
    }

    /// Records a transaction and re-fetches.
    pub async fn create(&mut self, input: TransactionInput) -> bool {
        const TITLE: &str = "Failed to record transaction";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        let created = self
            .scope
            .run(TITLE, self.api.create_transaction(&input))
            .await;
        let Some(created) = created else {
            return false;
        };
        self.scope
            .notifier()
            .success("Transaction recorded", created.category);
        self.load().await
    }

    /// Updates a transaction and re-fetches.
    pub async fn update(&mut self, id: TransactionId, input: TransactionInput) -> bool {
        const TITLE: &str = "Failed to update transaction";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        let updated = self
            .scope
            .run(TITLE, self.api.update_transaction(id, &input))
            .await;
        if updated.is_none() {
            return false;
        }
        self.scope
            .notifier()
            .success("Transaction updated", input.category);
        self.load().await
    }

    /// Deletes a transaction and re-fetches.
    pub async fn delete(&mut self, id: TransactionId) -> bool {
        let deleted = self
            .scope
            .run(
                "Failed to delete transaction",
                self.api.delete_transaction(id),
            )
            .await;
        if deleted.is_none() {
            return false;
        }
        self.scope
            .notifier()
            .success("Transaction deleted", "The transaction was removed");
        self.load().await
    }

    /// Closes the page; late responses are dropped.
    pub fn close(&self) {
        self.scope.close();
    }
}
