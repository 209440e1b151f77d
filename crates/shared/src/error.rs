//! Application-wide error types.
//!
//! Every service call either returns its parsed payload or one of these
//! errors. View-models turn them into a single toast via [`AppError::user_message`].

use serde_json::Value;
use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    /// No signed-in session; raised before any network call is made.
    #[error("No active session")]
    NoActiveSession,

    /// The backend rejected the bearer token.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error, either local form validation or a 400/422 from the backend.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict (e.g., duplicate entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-2xx response.
    #[error("Request failed with status {status}: {detail}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message taken from the response body's `detail` field.
        detail: String,
    },

    /// Transport failure (connection refused, timeout, TLS).
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Blob storage failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Maps a non-2xx status and its `detail` message to an error variant.
    #[must_use]
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        match status {
            401 => Self::Unauthorized(detail),
            403 => Self::Forbidden(detail),
            404 => Self::NotFound(detail),
            400 | 422 => Self::Validation(detail),
            409 => Self::Conflict(detail),
            _ => Self::Api { status, detail },
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NoActiveSession | Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Api { status, .. } => *status,
            Self::Network(_) => 503,
            Self::Decode(_) => 502,
            Self::Storage(_) | Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses and logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoActiveSession => "NO_ACTIVE_SESSION",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Api { .. } => "API_ERROR",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message suitable for a toast.
    ///
    /// Backend-provided details are shown as-is; transport and decoding
    /// failures collapse into a generic message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NoActiveSession => "Please sign in to continue.".to_string(),
            Self::Unauthorized(detail)
            | Self::Forbidden(detail)
            | Self::NotFound(detail)
            | Self::Validation(detail)
            | Self::Conflict(detail)
            | Self::Api { detail, .. } => detail.clone(),
            Self::Network(_) | Self::Decode(_) | Self::Storage(_) | Self::Config(_)
            | Self::Internal(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Extracts a human-readable message from an error response body.
///
/// Accepts `{"detail": "..."}`, `{"detail": [{"msg": "..."}, ...]}`, then
/// falls back to `message` and the auth server's `error_description`.
/// Returns `None` when the body carries no message.
#[must_use]
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail") {
        Some(Value::String(detail)) => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }
    ["message", "error_description"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(401, "UNAUTHORIZED")]
    #[case(403, "FORBIDDEN")]
    #[case(404, "NOT_FOUND")]
    #[case(400, "VALIDATION_ERROR")]
    #[case(422, "VALIDATION_ERROR")]
    #[case(409, "CONFLICT")]
    #[case(500, "API_ERROR")]
    #[case(502, "API_ERROR")]
    fn test_from_status(#[case] status: u16, #[case] code: &str) {
        let err = AppError::from_status(status, "boom");
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_api_error_keeps_status() {
        let err = AppError::from_status(503, "maintenance");
        assert_eq!(err.status_code(), 503);
        assert_eq!(
            err.to_string(),
            "Request failed with status 503: maintenance"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(AppError::NoActiveSession.to_string(), "No active session");
        assert_eq!(
            AppError::Unauthorized("msg".into()).to_string(),
            "Authentication failed: msg"
        );
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::Network("msg".into()).to_string(),
            "Network error: msg"
        );
    }

    #[test]
    fn test_user_message() {
        assert_eq!(
            AppError::Validation("Name is required".into()).user_message(),
            "Name is required"
        );
        assert_eq!(
            AppError::Network("connection refused".into()).user_message(),
            "Something went wrong. Please try again."
        );
        assert_eq!(
            AppError::NoActiveSession.user_message(),
            "Please sign in to continue."
        );
    }

    #[rstest]
    #[case(br#"{"detail":"Budget not found"}"#.as_slice(), Some("Budget not found"))]
    #[case(
        br#"{"detail":[{"loc":["body","name"],"msg":"field required"},{"msg":"bad amount"}]}"#.as_slice(),
        Some("field required; bad amount")
    )]
    #[case(br#"{"message":"nope"}"#.as_slice(), Some("nope"))]
    #[case(
        br#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#.as_slice(),
        Some("Invalid login credentials")
    )]
    #[case(br#"{"detail":[]}"#.as_slice(), None)]
    #[case(b"<html>oops</html>".as_slice(), None)]
    fn test_extract_detail(#[case] body: &[u8], #[case] expected: Option<&str>) {
        assert_eq!(extract_detail(body).as_deref(), expected);
    }
}
