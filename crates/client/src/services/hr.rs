//! `/api/hr` service.

use async_trait::async_trait;
use businessos_core::hr::{Department, DepartmentInput, Employee, EmployeeInput};
use businessos_core::ports::HrApi;
use businessos_shared::AppResult;
use businessos_shared::types::{DepartmentId, EmployeeId};

use crate::http::ApiClient;

/// Employees and departments over REST.
#[derive(Debug, Clone)]
pub struct HrService {
    api: ApiClient,
}

impl HrService {
    /// Creates the service.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl HrApi for HrService {
    async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        self.api.get("/api/hr/employees").await
    }

    async fn get_employee(&self, id: EmployeeId) -> AppResult<Employee> {
        self.api.get(&format!("/api/hr/employees/{id}")).await
    }

    async fn create_employee(&self, input: &EmployeeInput) -> AppResult<Employee> {
        self.api.post("/api/hr/employees", input).await
    }

    async fn update_employee(&self, id: EmployeeId, input: &EmployeeInput) -> AppResult<Employee> {
        self.api.put(&format!("/api/hr/employees/{id}"), input).await
    }

    async fn delete_employee(&self, id: EmployeeId) -> AppResult<()> {
        self.api.delete(&format!("/api/hr/employees/{id}")).await
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        self.api.get("/api/hr/departments").await
    }

    async fn create_department(&self, input: &DepartmentInput) -> AppResult<Department> {
        self.api.post("/api/hr/departments", input).await
    }

    async fn update_department(
        &self,
        id: DepartmentId,
        input: &DepartmentInput,
    ) -> AppResult<Department> {
        self.api
            .put(&format!("/api/hr/departments/{id}"), input)
            .await
    }

    async fn delete_department(&self, id: DepartmentId) -> AppResult<()> {
        self.api.delete(&format!("/api/hr/departments/{id}")).await
    }
}
