//! Employee directory and departments.

use std::sync::Arc;

use businessos_core::hr::{
    Department, DepartmentInput, Employee, EmployeeFilter, EmployeeInput, direct_reports,
    filter_employees, headcount_by_department, management_chain,
};
use businessos_core::ports::HrApi;
use businessos_core::validate_input;
use businessos_shared::types::{DepartmentId, EmployeeId};

use crate::notify::Notifier;
use crate::scope::ViewScope;

/// State of the HR page.
pub struct EmployeesView {
    api: Arc<dyn HrApi>,
    scope: ViewScope,
    employees: Vec<Employee>,
    departments: Vec<Department>,
    filter: EmployeeFilter,
}

impl EmployeesView {
    /// Empty page.
    pub fn new(api: Arc<dyn HrApi>, notifier: Notifier) -> Self {
        Self {
            api,
            scope: ViewScope::new(notifier),
            employees: Vec::new(),
            departments: Vec::new(),
            filter: EmployeeFilter::default(),
        }
    }

    /// Lifetime of the page.
    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Employees as last fetched.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Departments as last fetched.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Mutable filter.
    pub fn filter_mut(&mut self) -> &mut EmployeeFilter {
        &mut self.filter
    }

    /// Filtered employees by last, then first name.
    pub fn visible(&self) -> Vec<Employee> {
        filter_employees(&self.employees, &self.filter)
    }

    /// People reporting to `manager`.
    pub fn reports_of(&self, manager: EmployeeId) -> Vec<&Employee> {
        direct_reports(&self.employees, manager)
    }

    /// Managers above `employee`, nearest first.
    pub fn chain_of(&self, employee: EmployeeId) -> Vec<&Employee> {
        management_chain(&self.employees, employee)
    }

    /// Active headcount per department.
    pub fn headcount(&self) -> Vec<(String, usize)> {
        headcount_by_department(&self.departments, &self.employees)
    }

    /// Fetches employees and departments together.
    pub async fn load(&mut self) -> bool {
        let api = &self.api;
        let fetched = self
            .scope
            .run("Failed to load employees", async {
                tokio::try_join!(api.list_employees(), api.list_departments())
            })
            .await;
        let Some((employees, departments)) = fetched else {
            return false;
        };
        self.employees = employees;
        self.departments = departments;
        true
    }

    /// Adds an employee and re-fetches.
    pub async fn create(&mut self, input: EmployeeInput) -> bool {
        const TITLE: &str = "Failed to add employee";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        let Some(employee) = self.scope.run(TITLE, self.api.create_employee(&input)).await else {
            return false;
        };
        self.scope
            .notifier()
            .success("Employee added", employee.full_name());
        self.load().await
    }

    /// Saves an employee and re-fetches.
    pub async fn update(&mut self, id: EmployeeId, input: EmployeeInput) -> bool {
        const TITLE: &str = "Failed to update employee";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        let Some(employee) = self
            .scope
            .run(TITLE, self.api.update_employee(id, &input))
            .await
        else {
            return false;
        };
        self.scope
            .notifier()
            .success("Employee updated", employee.full_name());
        self.load().await
    }

    /// Removes an employee and re-fetches.
    pub async fn delete(&mut self, id: EmployeeId) -> bool {
        if self
            .scope
            .run("Failed to remove employee", self.api.delete_employee(id))
            .await
            .is_none()
        {
            return false;
        }
        self.scope
            .notifier()
            .success("Employee removed", "The record was deleted");
        self.load().await
    }

    /// Adds a department and re-fetches.
    pub async fn create_department(&mut self, input: DepartmentInput) -> bool {
        const TITLE: &str = "Failed to add department";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        let Some(department) = self
            .scope
            .run(TITLE, self.api.create_department(&input))
            .await
        else {
            return false;
        };
        self.scope
            .notifier()
            .success("Department added", department.name);
        self.load().await
    }

    /// Removes a department and re-fetches.
    pub async fn delete_department(&mut self, id: DepartmentId) -> bool {
        if self
            .scope
            .run("Failed to remove department", self.api.delete_department(id))
            .await
            .is_none()
        {
            return false;
        }
        self.scope
            .notifier()
            .success("Department removed", "The department was deleted");
        self.load().await
    }

    /// Closes the page.
    pub fn close(&self) {
        self.scope.close();
    }
}
