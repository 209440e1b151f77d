//! Task routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use businessos_core::activity::ActivityKind;
use businessos_core::tasks::{Task, TaskInput, TaskStatus};
use businessos_core::validate_input;
use businessos_shared::AppError;
use businessos_shared::types::TaskId;
use chrono::Utc;

use crate::StubState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

/// Creates the task routes.
pub fn routes() -> Router<StubState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
}

fn check_task(state: &StubState, input: &TaskInput) -> ApiResult<()> {
    validate_input(input)?;
    if input
        .assignee
        .is_some_and(|user| !state.store.users.contains(user))
    {
        return Err(AppError::Validation("Unknown assignee".into()).into());
    }
    Ok(())
}

/// GET `/tasks`
async fn list_tasks(State(state): State<StubState>) -> Json<Vec<Task>> {
    Json(state.store.tasks.list())
}

/// POST `/tasks`
async fn create_task(
    State(state): State<StubState>,
    auth: AuthUser,
    Json(input): Json<TaskInput>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    check_task(&state, &input)?;
    let task = Task {
        id: TaskId::new(),
        title: input.title.trim().to_string(),
        description: input.description,
        status: input.status,
        priority: input.priority,
        category: input.category.trim().to_string(),
        assignee: input.assignee,
        due_date: input.due_date,
        created_at: Utc::now(),
    };
    let task = state.store.tasks.insert(task.id, task);
    state.store.record(
        auth.email(),
        "created",
        ActivityKind::Task,
        format!("Task {} created", task.title),
    );
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT `/tasks/{id}`
async fn update_task(
    State(state): State<StubState>,
    auth: AuthUser,
    Path(id): Path<TaskId>,
    Json(input): Json<TaskInput>,
) -> ApiResult<Json<Task>> {
    check_task(&state, &input)?;
    let before = state
        .store
        .tasks
        .get(id)
        .ok_or_else(|| ApiError::not_found("Task"))?;
    let task = state
        .store
        .tasks
        .update(id, |t| {
            t.title = input.title.trim().to_string();
            t.description = input.description;
            t.status = input.status;
            t.priority = input.priority;
            t.category = input.category.trim().to_string();
            t.assignee = input.assignee;
            t.due_date = input.due_date;
        })
        .ok_or_else(|| ApiError::not_found("Task"))?;
    if task.status == TaskStatus::Done && before.status != TaskStatus::Done {
        state.store.record(
            auth.email(),
            "completed",
            ActivityKind::Task,
            format!("Task {} completed", task.title),
        );
    }
    Ok(Json(task))
}

/// DELETE `/tasks/{id}`
async fn delete_task(
    State(state): State<StubState>,
    Path(id): Path<TaskId>,
) -> ApiResult<StatusCode> {
    state
        .store
        .tasks
        .remove(id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ApiError::not_found("Task"))
}
