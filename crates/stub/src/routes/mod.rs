//! Route definitions.

use axum::{Router, middleware};

use crate::StubState;
use crate::middleware::{auth_middleware, fault_middleware};

pub mod activity;
pub mod admin;
pub mod auth;
pub mod calendar;
pub mod chat;
pub mod documents;
pub mod finance;
pub mod health;
pub mod hr;
pub mod tasks;

#[cfg(test)]
pub(crate) mod testing;

/// Creates every route: public health/auth plus the protected `/api` tree.
///
/// Fault injection wraps everything so tests can fail auth calls too.
#[allow(clippy::needless_pass_by_value)]
pub fn all_routes(state: StubState) -> Router<StubState> {
    let protected = Router::new()
        .merge(admin::routes())
        .merge(finance::routes())
        .merge(hr::routes())
        .merge(documents::routes())
        .merge(tasks::routes())
        .merge(calendar::routes())
        .merge(activity::routes())
        .merge(chat::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .nest("/api", protected)
        .layer(middleware::from_fn_with_state(state, fault_middleware))
}
