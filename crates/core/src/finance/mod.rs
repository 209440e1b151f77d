//! Budgets, invoices, transactions and clients.

pub mod amount;
pub mod budget;
pub mod charts;
pub mod invoice;
pub mod performance;
pub mod transaction;

pub use budget::{
    Budget, BudgetCategory, BudgetCategoryInput, BudgetInput, BudgetPerformance, BudgetStatus,
    CategoryPerformance, CategoryStatus, MonthlySpending,
};
pub use charts::{CategoryChartRow, PieSlice, Series, SeriesChart, SummaryCards};
pub use invoice::{
    Client, ClientInput, Invoice, InvoiceInput, InvoiceItem, InvoicePayload, InvoiceStatus,
    InvoiceTotals, compute_totals,
};
pub use performance::{derive_performance, spending_percentage};
pub use transaction::{
    Transaction, TransactionFilter, TransactionInput, TransactionSummary, TransactionType,
    filter_transactions, summarize, totals_by_category,
};
