//! Chat routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use businessos_core::chat::{ChatChannel, ChatMessage, NewMessage, thread};
use businessos_core::validate_input;
use businessos_shared::types::{ChannelId, MessageId};
use chrono::Utc;

use crate::StubState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

/// Creates the chat routes.
pub fn routes() -> Router<StubState> {
    Router::new()
        .route("/chat/channels", get(list_channels))
        .route(
            "/chat/channels/{id}/messages",
            get(list_messages).post(send_message),
        )
}

/// GET `/chat/channels`
async fn list_channels(State(state): State<StubState>) -> Json<Vec<ChatChannel>> {
    Json(state.store.channels.list())
}

/// GET `/chat/channels/{id}/messages` - Oldest first.
async fn list_messages(
    State(state): State<StubState>,
    Path(id): Path<ChannelId>,
) -> ApiResult<Json<Vec<ChatMessage>>> {
    if !state.store.channels.contains(id) {
        return Err(ApiError::not_found("Channel"));
    }
    Ok(Json(thread(
        &state.store.messages.filter(|m| m.channel_id == id),
    )))
}

/// POST `/chat/channels/{id}/messages` - Authored as the caller's profile name.
async fn send_message(
    State(state): State<StubState>,
    auth: AuthUser,
    Path(id): Path<ChannelId>,
    Json(input): Json<NewMessage>,
) -> ApiResult<(StatusCode, Json<ChatMessage>)> {
    validate_input(&input)?;
    if !state.store.channels.contains(id) {
        return Err(ApiError::not_found("Channel"));
    }
    let author = state
        .store
        .users
        .get(auth.user_id())
        .map_or_else(|| auth.email().to_string(), |p| p.name);
    let message = ChatMessage {
        id: MessageId::new(),
        channel_id: id,
        author,
        body: input.body.trim().to_string(),
        sent_at: Utc::now(),
    };
    Ok((
        StatusCode::CREATED,
        Json(state.store.messages.insert(message.id, message)),
    ))
}
