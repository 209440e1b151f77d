//! Applies armed faults before requests reach their handler.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use businessos_shared::AppError;
use tracing::debug;

use crate::StubState;
use crate::error::ApiError;

/// Answers with an injected failure or delay when a fault matches.
pub async fn fault_middleware(
    State(state): State<StubState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(fault) = state.faults.check(request.method(), request.uri().path()) else {
        return next.run(request).await;
    };

    debug!(path = %request.uri().path(), ?fault, "injecting fault");
    if let Some(delay) = fault.delay {
        tokio::time::sleep(delay).await;
    }
    match fault.status {
        Some(status) => ApiError(AppError::from_status(status, fault.detail)).into_response(),
        None => next.run(request).await,
    }
}
