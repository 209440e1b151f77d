//! Directory filtering and reporting lines.

use businessos_shared::types::EmployeeId;

use super::types::{Department, Employee, EmployeeStatus};
use crate::listing::{any_field_matches, category_matches};

/// Filter for the employee directory.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    /// Matches name, email or position.
    pub search: String,
    /// Department name, `"all"` for any.
    pub department: String,
    /// Restricts to one status.
    pub status: Option<EmployeeStatus>,
}

impl EmployeeFilter {
    /// True if the employee passes the filter.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        self.status.is_none_or(|s| s == employee.status)
            && category_matches(
                employee.department.as_deref().unwrap_or_default(),
                &self.department,
            )
            && any_field_matches(
                [
                    employee.first_name.as_str(),
                    employee.last_name.as_str(),
                    employee.email.as_str(),
                    employee.position.as_deref().unwrap_or_default(),
                ],
                &self.search,
            )
    }
}

/// Filters employees, ordered by last then first name.
#[must_use]
pub fn filter_employees(employees: &[Employee], filter: &EmployeeFilter) -> Vec<Employee> {
    let mut out: Vec<Employee> = employees
        .iter()
        .filter(|e| filter.matches(e))
        .cloned()
        .collect();
    out.sort_by_cached_key(|e| (e.last_name.to_lowercase(), e.first_name.to_lowercase()));
    out
}

/// Employees whose `manager_id` is `manager`, in input order.
#[must_use]
pub fn direct_reports(employees: &[Employee], manager: EmployeeId) -> Vec<&Employee> {
    employees
        .iter()
        .filter(|e| e.manager_id == Some(manager))
        .collect()
}

/// Walks `manager_id` links upward from `employee`, nearest manager first.
///
/// Stops at a missing manager or when a link loops back to someone
/// already visited.
#[must_use]
pub fn management_chain(employees: &[Employee], employee: EmployeeId) -> Vec<&Employee> {
    let mut chain: Vec<&Employee> = Vec::new();
    let mut visited = vec![employee];
    let mut current = employees.iter().find(|e| e.id == employee);

    while let Some(manager_id) = current.and_then(|e| e.manager_id) {
        if visited.contains(&manager_id) {
            break;
        }
        visited.push(manager_id);
        current = employees.iter().find(|e| e.id == manager_id);
        if let Some(manager) = current {
            chain.push(manager);
        }
    }
    chain
}

/// Active (non-terminated) headcount per department, in department order.
/// Employees whose department matches no known department are not counted.
#[must_use]
pub fn headcount_by_department(
    departments: &[Department],
    employees: &[Employee],
) -> Vec<(String, usize)> {
    departments
        .iter()
        .map(|d| {
            let count = employees
                .iter()
                .filter(|e| e.status != EmployeeStatus::Terminated)
                .filter(|e| e.department.as_deref() == Some(d.name.as_str()))
                .count();
            (d.name.clone(), count)
        })
        .collect()
}
