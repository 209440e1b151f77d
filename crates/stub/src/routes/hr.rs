//! Employee and department routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use businessos_core::activity::ActivityKind;
use businessos_core::hr::{Department, DepartmentInput, Employee, EmployeeInput, management_chain};
use businessos_core::validate_input;
use businessos_shared::AppError;
use businessos_shared::types::{DepartmentId, EmployeeId};

use crate::StubState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

/// Creates the HR routes.
pub fn routes() -> Router<StubState> {
    Router::new()
        .route("/hr/employees", get(list_employees).post(create_employee))
        .route(
            "/hr/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route(
            "/hr/departments",
            get(list_departments).post(create_department),
        )
        .route(
            "/hr/departments/{id}",
            put(update_department).delete(delete_department),
        )
}

/// Checks email uniqueness and that the manager exists without forming a loop.
fn check_employee(
    state: &StubState,
    input: &EmployeeInput,
    id: Option<EmployeeId>,
) -> ApiResult<()> {
    validate_input(input)?;
    let email = input.email.trim();
    if !state
        .store
        .employees
        .filter(|e| Some(e.id) != id && e.email.eq_ignore_ascii_case(email))
        .is_empty()
    {
        let message = format!("An employee with email {email} already exists");
        return Err(AppError::Conflict(message).into());
    }

    let Some(manager) = input.manager_id else {
        return Ok(());
    };
    if Some(manager) == id {
        return Err(AppError::Validation("An employee cannot manage themselves".into()).into());
    }
    if !state.store.employees.contains(manager) {
        return Err(AppError::Validation("Unknown manager".into()).into());
    }
    if let Some(id) = id {
        let everyone = state.store.employees.list();
        if management_chain(&everyone, manager).iter().any(|e| e.id == id) {
            let message = "Manager assignment would create a cycle".to_string();
            return Err(AppError::Validation(message).into());
        }
    }
    Ok(())
}

fn apply_input(employee: &mut Employee, input: EmployeeInput) {
    employee.first_name = input.first_name.trim().to_string();
    employee.last_name = input.last_name.trim().to_string();
    employee.email = input.email.trim().to_string();
    employee.position = input.position;
    employee.department = input.department;
    employee.manager_id = input.manager_id;
    employee.hire_date = input.hire_date;
    employee.salary = input.salary;
    employee.status = input.status;
}

/// GET `/hr/employees`
async fn list_employees(State(state): State<StubState>) -> Json<Vec<Employee>> {
    Json(state.store.employees.list())
}

/// GET `/hr/employees/{id}`
async fn get_employee(
    State(state): State<StubState>,
    Path(id): Path<EmployeeId>,
) -> ApiResult<Json<Employee>> {
    state
        .store
        .employees
        .get(id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Employee"))
}

/// POST `/hr/employees`
async fn create_employee(
    State(state): State<StubState>,
    auth: AuthUser,
    Json(input): Json<EmployeeInput>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    check_employee(&state, &input, None)?;
    let mut employee = Employee {
        id: EmployeeId::new(),
        first_name: String::new(),
        last_name: String::new(),
        email: String::new(),
        position: None,
        department: None,
        manager_id: None,
        hire_date: None,
        salary: None,
        status: input.status,
    };
    apply_input(&mut employee, input);
    let employee = state.store.employees.insert(employee.id, employee);
    state.store.record(
        auth.email(),
        "hired",
        ActivityKind::Hr,
        format!("{} joined", employee.full_name()),
    );
    Ok((StatusCode::CREATED, Json(employee)))
}

/// PUT `/hr/employees/{id}`
async fn update_employee(
    State(state): State<StubState>,
    auth: AuthUser,
    Path(id): Path<EmployeeId>,
    Json(input): Json<EmployeeInput>,
) -> ApiResult<Json<Employee>> {
    if !state.store.employees.contains(id) {
        return Err(ApiError::not_found("Employee"));
    }
    check_employee(&state, &input, Some(id))?;
    let employee = state
        .store
        .employees
        .update(id, |e| apply_input(e, input))
        .ok_or_else(|| ApiError::not_found("Employee"))?;
    state.store.record(
        auth.email(),
        "updated",
        ActivityKind::Hr,
        format!("Record of {} updated", employee.full_name()),
    );
    Ok(Json(employee))
}

/// DELETE `/hr/employees/{id}` - Direct reports lose their manager.
async fn delete_employee(
    State(state): State<StubState>,
    auth: AuthUser,
    Path(id): Path<EmployeeId>,
) -> ApiResult<StatusCode> {
    let removed = state
        .store
        .employees
        .remove(id)
        .ok_or_else(|| ApiError::not_found("Employee"))?;
    for report in state.store.employees.filter(|e| e.manager_id == Some(id)) {
        state.store.employees.update(report.id, |e| e.manager_id = None);
    }
    for dept in state.store.departments.filter(|d| d.manager_id == Some(id)) {
        state.store.departments.update(dept.id, |d| d.manager_id = None);
    }
    state.store.record(
        auth.email(),
        "removed",
        ActivityKind::Hr,
        format!("{} removed", removed.full_name()),
    );
    Ok(StatusCode::NO_CONTENT)
}

fn check_department(
    state: &StubState,
    input: &DepartmentInput,
    id: Option<DepartmentId>,
) -> ApiResult<()> {
    validate_input(input)?;
    let name = input.name.trim();
    if !state
        .store
        .departments
        .filter(|d| Some(d.id) != id && d.name.eq_ignore_ascii_case(name))
        .is_empty()
    {
        return Err(AppError::Conflict(format!("Department {name} already exists")).into());
    }
    if input
        .manager_id
        .is_some_and(|m| !state.store.employees.contains(m))
    {
        return Err(AppError::Validation("Unknown manager".into()).into());
    }
    Ok(())
}

/// GET `/hr/departments`
async fn list_departments(State(state): State<StubState>) -> Json<Vec<Department>> {
    Json(state.store.departments.list())
}

/// POST `/hr/departments`
async fn create_department(
    State(state): State<StubState>,
    Json(input): Json<DepartmentInput>,
) -> ApiResult<(StatusCode, Json<Department>)> {
    check_department(&state, &input, None)?;
    let department = Department {
        id: DepartmentId::new(),
        name: input.name.trim().to_string(),
        description: input.description,
        manager_id: input.manager_id,
    };
    Ok((
        StatusCode::CREATED,
        Json(state.store.departments.insert(department.id, department)),
    ))
}

/// PUT `/hr/departments/{id}`
async fn update_department(
    State(state): State<StubState>,
    Path(id): Path<DepartmentId>,
    Json(input): Json<DepartmentInput>,
) -> ApiResult<Json<Department>> {
    if !state.store.departments.contains(id) {
        return Err(ApiError::not_found("Department"));
    }
    check_department(&state, &input, Some(id))?;
    state
        .store
        .departments
        .update(id, |d| {
            d.name = input.name.trim().to_string();
            d.description = input.description;
            d.manager_id = input.manager_id;
        })
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Department"))
}

/// DELETE `/hr/departments/{id}` - Refused while employees are assigned.
async fn delete_department(
    State(state): State<StubState>,
    Path(id): Path<DepartmentId>,
) -> ApiResult<StatusCode> {
    let department = state
        .store
        .departments
        .get(id)
        .ok_or_else(|| ApiError::not_found("Department"))?;
    let staffed = state
        .store
        .employees
        .filter(|e| e.department.as_deref() == Some(department.name.as_str()))
        .len();
    if staffed > 0 {
        return Err(AppError::Conflict(format!(
            "{} still has {staffed} employee(s)",
            department.name
        ))
        .into());
    }
    state.store.departments.remove(id);
    Ok(StatusCode::NO_CONTENT)
}
