//! Document share and version routes.
//!
//! Documents themselves live in blob storage; the stub only keeps their
//! share list and version history, keyed by document ID.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use businessos_core::activity::ActivityKind;
use businessos_core::documents::{
    DocumentShare, DocumentVersion, NewVersionInput, ShareInput, UpdateShareInput, history,
    share_for,
};
use businessos_core::validate_input;
use businessos_shared::AppError;
use businessos_shared::types::{DocumentId, DocumentShareId, DocumentVersionId};
use chrono::Utc;

use crate::StubState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

/// Creates the document routes.
pub fn routes() -> Router<StubState> {
    Router::new()
        .route("/documents/{id}/shares", get(list_shares).post(create_share))
        .route(
            "/documents/{id}/shares/{share_id}",
            put(update_share).delete(revoke_share),
        )
        .route(
            "/documents/{id}/versions",
            get(list_versions).post(add_version),
        )
        .route(
            "/documents/{id}/versions/{version_id}/restore",
            post(restore_version),
        )
}

/// GET `/documents/{id}/shares`
async fn list_shares(
    State(state): State<StubState>,
    Path(id): Path<DocumentId>,
) -> Json<Vec<DocumentShare>> {
    Json(state.store.shares.filter(|s| s.document_id == id))
}

/// POST `/documents/{id}/shares` - One share per recipient.
async fn create_share(
    State(state): State<StubState>,
    auth: AuthUser,
    Path(id): Path<DocumentId>,
    Json(input): Json<ShareInput>,
) -> ApiResult<(StatusCode, Json<DocumentShare>)> {
    validate_input(&input)?;
    let existing = state.store.shares.filter(|s| s.document_id == id);
    if share_for(&existing, &input.shared_with).is_some() {
        return Err(AppError::Conflict(format!(
            "Document is already shared with {}",
            input.shared_with.trim()
        ))
        .into());
    }
    let share = DocumentShare {
        id: DocumentShareId::new(),
        document_id: id,
        shared_with: input.shared_with.trim().to_lowercase(),
        permission_level: input.permission_level,
        created_at: Utc::now(),
    };
    let share = state.store.shares.insert(share.id, share);
    state.store.record(
        auth.email(),
        "shared",
        ActivityKind::Document,
        format!("Document shared with {}", share.shared_with),
    );
    Ok((StatusCode::CREATED, Json(share)))
}

fn require_share(state: &StubState, id: DocumentId, share_id: DocumentShareId) -> ApiResult<()> {
    match state.store.shares.get(share_id) {
        Some(share) if share.document_id == id => Ok(()),
        _ => Err(ApiError::not_found("Share")),
    }
}

/// PUT `/documents/{id}/shares/{share_id}`
async fn update_share(
    State(state): State<StubState>,
    Path((id, share_id)): Path<(DocumentId, DocumentShareId)>,
    Json(input): Json<UpdateShareInput>,
) -> ApiResult<Json<DocumentShare>> {
    require_share(&state, id, share_id)?;
    state
        .store
        .shares
        .update(share_id, |s| s.permission_level = input.permission_level)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Share"))
}

/// DELETE `/documents/{id}/shares/{share_id}`
async fn revoke_share(
    State(state): State<StubState>,
    auth: AuthUser,
    Path((id, share_id)): Path<(DocumentId, DocumentShareId)>,
) -> ApiResult<StatusCode> {
    require_share(&state, id, share_id)?;
    if let Some(share) = state.store.shares.remove(share_id) {
        state.store.record(
            auth.email(),
            "revoked access of",
            ActivityKind::Document,
            format!("{} can no longer open the document", share.shared_with),
        );
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/documents/{id}/versions` - Newest first.
async fn list_versions(
    State(state): State<StubState>,
    Path(id): Path<DocumentId>,
) -> Json<Vec<DocumentVersion>> {
    Json(history(&state.store.versions.filter(|v| v.document_id == id)))
}

fn next_version_number(state: &StubState, id: DocumentId) -> u32 {
    state
        .store
        .versions
        .filter(|v| v.document_id == id)
        .iter()
        .map(|v| v.version_number)
        .max()
        .unwrap_or(0)
        + 1
}

fn store_version(
    state: &StubState,
    auth: &AuthUser,
    id: DocumentId,
    storage_path: String,
    size_bytes: u64,
    comment: Option<String>,
) -> DocumentVersion {
    let version = DocumentVersion {
        id: DocumentVersionId::new(),
        document_id: id,
        version_number: next_version_number(state, id),
        storage_path,
        size_bytes,
        created_by: Some(auth.user_id()),
        created_at: Utc::now(),
        comment,
    };
    let version = state.store.versions.insert(version.id, version);
    state.store.record(
        auth.email(),
        "uploaded",
        ActivityKind::Document,
        format!("Version {} saved", version.version_number),
    );
    version
}

/// POST `/documents/{id}/versions` - Numbers are assigned here, never by the caller.
async fn add_version(
    State(state): State<StubState>,
    auth: AuthUser,
    Path(id): Path<DocumentId>,
    Json(input): Json<NewVersionInput>,
) -> ApiResult<(StatusCode, Json<DocumentVersion>)> {
    validate_input(&input)?;
    let version = store_version(
        &state,
        &auth,
        id,
        input.storage_path,
        input.size_bytes,
        input.comment,
    );
    Ok((StatusCode::CREATED, Json(version)))
}

/// POST `/documents/{id}/versions/{version_id}/restore` - Copies an old
/// version forward as the newest one.
async fn restore_version(
    State(state): State<StubState>,
    auth: AuthUser,
    Path((id, version_id)): Path<(DocumentId, DocumentVersionId)>,
) -> ApiResult<(StatusCode, Json<DocumentVersion>)> {
    let source = state
        .store
        .versions
        .get(version_id)
        .filter(|v| v.document_id == id)
        .ok_or_else(|| ApiError::not_found("Version"))?;
    let version = store_version(
        &state,
        &auth,
        id,
        source.storage_path,
        source.size_bytes,
        Some(format!("Restored from version {}", source.version_number)),
    );
    Ok((StatusCode::CREATED, Json(version)))
}
