//! Liveness probe.
//!
//! Public, so test harnesses can poll it before signing in. Reports how
//! many faults are armed so a stuck test run is easy to spot.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::StubState;

/// Probe body.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while serving.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Accounts that can sign in.
    pub accounts: usize,
    /// Injected failures not yet used up.
    pub armed_faults: usize,
}

/// GET `/health`
async fn health(State(state): State<StubState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        accounts: state.store.accounts.len(),
        armed_faults: state.faults.armed(),
    })
}

/// Creates the probe route.
pub fn routes() -> Router<StubState> {
    Router::new().route("/health", get(health))
}
