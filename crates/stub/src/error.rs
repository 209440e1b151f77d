//! Error responses.
//!
//! Errors are rendered the way the real backend does: a JSON body with a
//! `detail` field. Validation failures carry a list of `{msg}` entries.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use businessos_shared::AppError;
use serde_json::json;
use tracing::warn;

/// Handler error wrapping [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Handler result.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// 404 for a missing resource.
    pub fn not_found(what: &str) -> Self {
        Self(AppError::NotFound(format!("{what} not found")))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ref other => StatusCode::from_u16(other.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };
        warn!(status = status.as_u16(), error = %self.0, "request rejected");

        let body = match &self.0 {
            AppError::Validation(detail) => json!({
                "error": self.0.error_code(),
                "detail": detail
                    .split("; ")
                    .map(|msg| json!({ "msg": msg }))
                    .collect::<Vec<_>>(),
            }),
            other => json!({
                "error": other.error_code(),
                "detail": other.user_message(),
            }),
        };
        (status, Json(body)).into_response()
    }
}
