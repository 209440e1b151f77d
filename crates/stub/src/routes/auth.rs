//! Supabase-style auth endpoints.
//!
//! `POST /auth/v1/token?grant_type=password|refresh_token` issues a session,
//! `POST /auth/v1/logout` revokes the caller's refresh tokens and
//! `GET /auth/v1/user` reports the signed-in user. Every call needs the
//! `apikey` header.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use businessos_core::admin::UserStatus;
use businessos_shared::types::UserId;
use businessos_shared::{AuthUserInfo, Claims, PasswordGrant, RefreshGrant, TokenResponse};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};
use uuid::Uuid;

use crate::StubState;
use crate::middleware::auth::extract_bearer_token;

/// Creates the auth routes.
pub fn routes() -> Router<StubState> {
    Router::new()
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/logout", post(logout))
        .route("/auth/v1/user", get(current_user))
}

#[derive(Debug, Deserialize)]
struct GrantQuery {
    grant_type: String,
}

fn auth_error(status: StatusCode, error: &str, description: &str) -> Response {
    (
        status,
        Json(json!({ "error": error, "error_description": description })),
    )
        .into_response()
}

fn check_api_key(state: &StubState, headers: &HeaderMap) -> Result<(), Response> {
    let key = headers.get("apikey").and_then(|v| v.to_str().ok());
    if key == Some(&*state.anon_key) {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid API key" })),
        )
            .into_response())
    }
}

fn bearer_claims(state: &StubState, headers: &HeaderMap) -> Result<Claims, Response> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .and_then(|token| state.jwt.validate(token).ok())
        .ok_or_else(|| {
            auth_error(
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid or expired access token",
            )
        })
}

fn issue_session(state: &StubState, user_id: UserId, email: &str) -> Response {
    let (access_token, claims) = match state.jwt.issue(user_id.into_inner(), email) {
        Ok(issued) => issued,
        Err(e) => {
            error!(error = %e, "failed to sign access token");
            return auth_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "server_error",
                "Could not issue a session",
            );
        }
    };
    let refresh_token = Uuid::new_v4().simple().to_string();
    state
        .store
        .refresh_tokens
        .insert(refresh_token.clone(), user_id);

    Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.jwt.expires_in_secs(),
        expires_at: Some(claims.exp),
        refresh_token,
        user: AuthUserInfo {
            id: user_id.into_inner(),
            email: email.to_string(),
        },
    })
    .into_response()
}

/// POST `/auth/v1/token` - Password sign-in or refresh.
async fn token(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<GrantQuery>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = check_api_key(&state, &headers) {
        return response;
    }

    match query.grant_type.as_str() {
        "password" => {
            let Ok(grant) = serde_json::from_value::<PasswordGrant>(body) else {
                return auth_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_request",
                    "email and password are required",
                );
            };
            let account = state
                .store
                .accounts
                .get(&grant.email.to_lowercase())
                .map(|a| a.value().clone());
            let Some(account) = account.filter(|a| a.password == grant.password) else {
                return auth_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_grant",
                    "Invalid login credentials",
                );
            };
            let Some(profile) = state.store.users.get(account.user_id) else {
                return auth_error(StatusCode::BAD_REQUEST, "invalid_grant", "User not found");
            };
            if profile.status == UserStatus::Inactive {
                return auth_error(StatusCode::BAD_REQUEST, "invalid_grant", "User is disabled");
            }
            info!(email = %profile.email, "password sign-in");
            issue_session(&state, profile.id, &profile.email)
        }
        "refresh_token" => {
            let Ok(grant) = serde_json::from_value::<RefreshGrant>(body) else {
                return auth_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_request",
                    "refresh_token is required",
                );
            };
            let Some((_, user_id)) = state.store.refresh_tokens.remove(&grant.refresh_token) else {
                return auth_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_grant",
                    "Invalid Refresh Token: Refresh Token Not Found",
                );
            };
            let Some(profile) = state.store.users.get(user_id) else {
                return auth_error(StatusCode::BAD_REQUEST, "invalid_grant", "User not found");
            };
            issue_session(&state, profile.id, &profile.email)
        }
        other => auth_error(
            StatusCode::BAD_REQUEST,
            "unsupported_grant_type",
            &format!("Unsupported grant type: {other}"),
        ),
    }
}

/// POST `/auth/v1/logout` - Revokes every refresh token of the caller.
async fn logout(State(state): State<StubState>, headers: HeaderMap) -> Response {
    if let Err(response) = check_api_key(&state, &headers) {
        return response;
    }
    let claims = match bearer_claims(&state, &headers) {
        Ok(claims) => claims,
        Err(response) => return response,
    };
    let user_id = UserId::from_uuid(claims.user_id());
    state
        .store
        .refresh_tokens
        .retain(|_, owner| *owner != user_id);
    StatusCode::NO_CONTENT.into_response()
}

/// GET `/auth/v1/user` - The signed-in user.
async fn current_user(State(state): State<StubState>, headers: HeaderMap) -> Response {
    if let Err(response) = check_api_key(&state, &headers) {
        return response;
    }
    match bearer_claims(&state, &headers) {
        Ok(claims) => Json(AuthUserInfo {
            id: claims.user_id(),
            email: claims.email,
        })
        .into_response(),
        Err(response) => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{DEMO_EMAIL, DEMO_PASSWORD};
    use axum::body::Body;
    use axum::http::Request;
    use businessos_shared::JwtService;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const ANON_KEY: &str = "anon-test-key";

    fn app() -> (Router, StubState) {
        let state = StubState::demo(JwtService::new("test-secret", 3600), ANON_KEY);
        (crate::create_router(state.clone()), state)
    }

    fn token_request(grant: &str, body: &Value, api_key: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/auth/v1/token?grant_type={grant}"))
            .header("apikey", api_key)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_password_grant_issues_valid_token() {
        let (app, state) = app();
        let body = json!({ "email": DEMO_EMAIL, "password": DEMO_PASSWORD });

        let response = app
            .oneshot(token_request("password", &body, ANON_KEY))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let session: TokenResponse = serde_json::from_value(json_body(response).await).unwrap();
        assert_eq!(session.user.email, DEMO_EMAIL);
        assert_eq!(session.expires_in, 3600);
        let claims = state.jwt.validate(&session.access_token).unwrap();
        assert_eq!(claims.user_id(), session.user.id);
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let (app, _) = app();
        let body = json!({ "email": DEMO_EMAIL, "password": "nope" });

        let response = app
            .oneshot(token_request("password", &body, ANON_KEY))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error_description"], "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_missing_api_key_rejected() {
        let (app, _) = app();
        let body = json!({ "email": DEMO_EMAIL, "password": DEMO_PASSWORD });

        let response = app
            .oneshot(token_request("password", &body, "wrong"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refresh_token_is_single_use() {
        let (app, _) = app();
        let body = json!({ "email": DEMO_EMAIL, "password": DEMO_PASSWORD });
        let response = app
            .clone()
            .oneshot(token_request("password", &body, ANON_KEY))
            .await
            .unwrap();
        let session: TokenResponse = serde_json::from_value(json_body(response).await).unwrap();

        let refresh = json!({ "refresh_token": session.refresh_token });
        let first = app
            .clone()
            .oneshot(token_request("refresh_token", &refresh, ANON_KEY))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(token_request("refresh_token", &refresh, ANON_KEY))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    }
}
