//! Request helpers shared by the route tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use businessos_shared::JwtService;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::StubState;
use crate::seed::DEMO_EMAIL;

pub const ANON_KEY: &str = "anon-test-key";

pub fn app() -> (Router, StubState) {
    let state = StubState::demo(JwtService::new("test-secret", 3600), ANON_KEY);
    (crate::create_router(state.clone()), state)
}

/// Access token for the demo administrator.
pub fn admin_token(state: &StubState) -> String {
    token_for(state, DEMO_EMAIL)
}

pub fn token_for(state: &StubState, email: &str) -> String {
    let user_id = state.store.accounts.get(email).unwrap().user_id;
    state.jwt.issue(user_id.into_inner(), email).unwrap().0
}

pub fn request(method: &str, uri: &str, token: &str, body: Option<&Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends a request; empty bodies decode as `Value::Null`.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
