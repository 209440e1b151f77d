//! Employees and departments.

pub mod org;
pub mod types;

pub use org::{
    EmployeeFilter, direct_reports, filter_employees, headcount_by_department, management_chain,
};
pub use types::{Department, DepartmentInput, Employee, EmployeeInput, EmployeeStatus};
