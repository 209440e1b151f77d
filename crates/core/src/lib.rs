//! Core business logic for BusinessOS.
//!
//! This crate contains pure domain logic with ZERO web or database dependencies.
//! Data-transfer types, form validation, list filtering/sorting, calendar
//! bucketing and chart shaping live here, together with the service ports
//! the REST client implements.
//!
//! # Modules
//!
//! - `admin` - Users, roles and permission filtering
//! - `finance` - Budgets, invoices, transactions, performance charts
//! - `hr` - Employees, departments, reporting lines
//! - `tasks` - Task manager filter/sort
//! - `calendar` - Day bucketing for the calendar widget
//! - `documents` - Shares and version history
//! - `activity` / `chat` - Feed and team chat
//! - `assistant` - Rule-based help replies
//! - `ports` - Async service traits

pub mod activity;
pub mod admin;
pub mod assistant;
pub mod calendar;
pub mod chat;
pub mod documents;
pub mod finance;
pub mod hr;
pub mod listing;
pub mod ports;
pub mod tasks;
pub mod validation;

#[cfg(test)]
mod props;

pub use listing::{NullsPlacement, SortDirection};
pub use validation::validate_input;
