//! Headless view-models for BusinessOS.
//!
//! Each screen or dialog is a struct that owns its list state, talks to the
//! backend through a port from `businessos_core::ports` and reports to a
//! shared [`Notifier`]. The rules every view follows:
//!
//! - A successful write is followed by a full re-fetch.
//! - A failed call logs, pushes exactly one error toast and leaves state
//!   as it was.
//! - Once a view is closed, late responses are dropped.
//!
//! # Modules
//!
//! - `budget` / `analysis` - Budget categories and performance charts
//! - `invoices` - Invoices with their clients
//! - `transactions` - Income/expense ledger with totals
//! - `employees` - Employee directory and departments
//! - `users` / `roles` - Admin screens and the role permissions dialog
//! - `tasks` / `calendar` - Task manager and calendar widget
//! - `documents` - Shares and versions of one document
//! - `activity` / `chat` / `assistant` - Dashboard widgets

pub mod activity;
pub mod analysis;
pub mod assistant;
pub mod budget;
pub mod calendar;
pub mod chat;
pub mod documents;
pub mod employees;
pub mod invoices;
pub mod notify;
pub mod roles;
pub mod scope;
pub mod tasks;
pub mod transactions;
pub mod users;

#[cfg(test)]
mod testing;

pub use activity::ActivityView;
pub use analysis::BudgetAnalysisView;
pub use assistant::{AssistantView, Speaker, Turn};
pub use budget::BudgetCategoriesView;
pub use calendar::CalendarView;
pub use chat::ChatView;
pub use documents::DocumentView;
pub use employees::EmployeesView;
pub use invoices::InvoicesView;
pub use notify::{Notifier, Toast, ToastLevel};
pub use roles::{RolePermissionsDialog, RolesView};
pub use scope::ViewScope;
pub use tasks::TaskManagerView;
pub use transactions::TransactionsView;
pub use users::UsersView;
