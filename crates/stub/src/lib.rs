//! In-memory stand-in for the BusinessOS backend.
//!
//! This crate provides:
//! - The `/api/...` REST routes the client services call
//! - A Supabase-style `/auth/v1` token endpoint issuing real JWTs
//! - Demo data and failure injection for integration tests
//!
//! State lives in memory and is lost when the process exits.

pub mod error;
pub mod faults;
pub mod middleware;
pub mod routes;
pub mod seed;
pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use businessos_shared::JwtService;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::faults::Faults;
use crate::store::Store;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct StubState {
    /// Tables.
    pub store: Arc<Store>,
    /// Issues and validates access tokens.
    pub jwt: Arc<JwtService>,
    /// Expected `apikey` header on auth routes.
    pub anon_key: Arc<str>,
    /// Armed failures.
    pub faults: Arc<Faults>,
}

impl StubState {
    /// State over an existing store.
    pub fn new(store: Store, jwt: JwtService, anon_key: &str) -> Self {
        Self {
            store: Arc::new(store),
            jwt: Arc::new(jwt),
            anon_key: Arc::from(anon_key),
            faults: Arc::new(Faults::default()),
        }
    }

    /// State preloaded with the demo data set.
    pub fn demo(jwt: JwtService, anon_key: &str) -> Self {
        Self::new(seed::demo_store(), jwt, anon_key)
    }
}

/// Creates the main application router.
pub fn create_router(state: StubState) -> Router {
    routes::all_routes(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serves the router on `listener` until the task is dropped.
pub async fn serve(listener: TcpListener, state: StubState) -> std::io::Result<()> {
    axum::serve(listener, create_router(state)).await
}

/// Binds an ephemeral local port and serves in the background.
///
/// Returns the bound address; used by integration tests in other crates.
pub async fn spawn_local(state: StubState) -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    info!(%addr, "stub backend listening");
    tokio::spawn(async move {
        if let Err(e) = serve(listener, state).await {
            tracing::error!(error = %e, "stub backend stopped");
        }
    });
    Ok(addr)
}
