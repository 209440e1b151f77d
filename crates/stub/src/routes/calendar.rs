//! Calendar event routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use businessos_core::calendar::{CalendarEvent, CalendarEventInput};
use businessos_core::validate_input;
use businessos_shared::types::EventId;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::StubState;
use crate::error::{ApiError, ApiResult};

/// Creates the calendar routes.
pub fn routes() -> Router<StubState> {
    Router::new()
        .route("/calendar/events", get(list_events).post(create_event))
        .route(
            "/calendar/events/{id}",
            put(update_event).delete(delete_event),
        )
}

/// Optional inclusive date window on the event start.
#[derive(Debug, Default, Deserialize)]
struct EventQuery {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

/// GET `/calendar/events` - Ordered by start.
async fn list_events(
    State(state): State<StubState>,
    Query(query): Query<EventQuery>,
) -> Json<Vec<CalendarEvent>> {
    let mut events = state.store.events.filter(|e| {
        let day = e.start.date();
        query.from.is_none_or(|from| day >= from) && query.to.is_none_or(|to| day <= to)
    });
    events.sort_by_key(|e| e.start);
    Json(events)
}

fn build(id: EventId, input: CalendarEventInput) -> CalendarEvent {
    CalendarEvent {
        id,
        title: input.title.trim().to_string(),
        start: input.start,
        end: input.end,
        all_day: input.all_day,
        location: input.location,
        kind: input.kind,
    }
}

/// POST `/calendar/events`
async fn create_event(
    State(state): State<StubState>,
    Json(input): Json<CalendarEventInput>,
) -> ApiResult<(StatusCode, Json<CalendarEvent>)> {
    validate_input(&input)?;
    let id = EventId::new();
    Ok((
        StatusCode::CREATED,
        Json(state.store.events.insert(id, build(id, input))),
    ))
}

/// PUT `/calendar/events/{id}`
async fn update_event(
    State(state): State<StubState>,
    Path(id): Path<EventId>,
    Json(input): Json<CalendarEventInput>,
) -> ApiResult<Json<CalendarEvent>> {
    validate_input(&input)?;
    let rebuilt = build(id, input);
    state
        .store
        .events
        .update(id, |e| *e = rebuilt)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Event"))
}

/// DELETE `/calendar/events/{id}`
async fn delete_event(
    State(state): State<StubState>,
    Path(id): Path<EventId>,
) -> ApiResult<StatusCode> {
    state
        .store
        .events
        .remove(id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ApiError::not_found("Event"))
}
