//! Activity feed route.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use businessos_core::activity::{ActivityFilter, ActivityItem, feed};
use serde::Deserialize;

use crate::StubState;

const DEFAULT_LIMIT: usize = 50;

/// Creates the activity routes.
pub fn routes() -> Router<StubState> {
    Router::new().route("/activity", get(list_activity))
}

#[derive(Debug, Default, Deserialize)]
struct ActivityQuery {
    limit: Option<usize>,
}

/// GET `/activity` - Newest first, capped at `limit` (default 50).
async fn list_activity(
    State(state): State<StubState>,
    Query(query): Query<ActivityQuery>,
) -> Json<Vec<ActivityItem>> {
    let mut items = feed(&state.store.activity.list(), &ActivityFilter::default());
    items.truncate(query.limit.unwrap_or(DEFAULT_LIMIT));
    Json(items)
}
