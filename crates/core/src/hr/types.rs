//! Employee and department data types.

use businessos_shared::types::{DepartmentId, EmployeeId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{non_negative, not_blank};

/// Employment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmployeeStatus {
    /// Currently employed.
    #[default]
    Active,
    /// Temporarily away.
    #[serde(rename = "On Leave")]
    OnLeave,
    /// No longer employed.
    Terminated,
}

/// An employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee ID.
    pub id: EmployeeId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Work email.
    pub email: String,
    /// Job title.
    #[serde(default)]
    pub position: Option<String>,
    /// Department name.
    #[serde(default)]
    pub department: Option<String>,
    /// Line manager.
    #[serde(default)]
    pub manager_id: Option<EmployeeId>,
    /// Start date.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// Annual salary.
    #[serde(default)]
    pub salary: Option<Decimal>,
    /// Employment status.
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl Employee {
    /// `"First Last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for creating or updating an employee.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeInput {
    /// Given name.
    #[validate(custom(function = "not_blank", message = "First name is required"))]
    pub first_name: String,
    /// Family name.
    #[validate(custom(function = "not_blank", message = "Last name is required"))]
    pub last_name: String,
    /// Work email.
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    /// Job title.
    pub position: Option<String>,
    /// Department name.
    pub department: Option<String>,
    /// Line manager.
    pub manager_id: Option<EmployeeId>,
    /// Start date.
    pub hire_date: Option<NaiveDate>,
    /// Annual salary.
    #[validate(custom(function = "non_negative"))]
    pub salary: Option<Decimal>,
    /// Employment status.
    pub status: EmployeeStatus,
}

/// A department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Department ID.
    pub id: DepartmentId,
    /// Name; employees reference it by name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Department head.
    #[serde(default)]
    pub manager_id: Option<EmployeeId>,
}

/// Input for creating or updating a department.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DepartmentInput {
    /// Name.
    #[validate(custom(function = "not_blank", message = "Department name is required"))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Department head.
    pub manager_id: Option<EmployeeId>,
}
