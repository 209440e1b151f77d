//! User, role and permission routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use businessos_core::activity::ActivityKind;
use businessos_core::admin::{
    Permission, Profile, Role, RoleInput, RolePermission, RoleUser, SetRolePermissionsInput,
    UpdateProfileInput, UpdateUserStatusInput,
};
use businessos_core::validate_input;
use businessos_shared::AppError;
use businessos_shared::types::{RoleId, UserId};

use crate::StubState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

/// Creates the admin routes (auth applied by the caller).
pub fn routes() -> Router<StubState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}", get(get_user).put(update_user))
        .route("/admin/users/{id}/status", axum::routing::put(update_status))
        .route("/admin/roles", get(list_roles).post(create_role))
        .route(
            "/admin/roles/{id}",
            get(get_role).put(update_role).delete(delete_role),
        )
        .route(
            "/admin/roles/{id}/permissions",
            get(role_permissions).put(set_role_permissions),
        )
        .route("/admin/roles/{id}/users", get(role_users))
        .route("/admin/permissions", get(list_permissions))
}

/// GET `/admin/users`
async fn list_users(State(state): State<StubState>) -> Json<Vec<Profile>> {
    Json(state.store.users.list())
}

/// GET `/admin/users/{id}`
async fn get_user(
    State(state): State<StubState>,
    Path(id): Path<UserId>,
) -> ApiResult<Json<Profile>> {
    state
        .store
        .users
        .get(id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User"))
}

/// PUT `/admin/users/{id}` - Partial update; absent fields are kept.
async fn update_user(
    State(state): State<StubState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
    Json(input): Json<UpdateProfileInput>,
) -> ApiResult<Json<Profile>> {
    validate_input(&input)?;
    let updated = state
        .store
        .users
        .update(id, |user| {
            let UpdateProfileInput {
                name,
                email,
                company,
                role,
                department,
                contact_info,
                preferences,
                avatar_url,
            } = input;
            if let Some(name) = name {
                user.name = name;
            }
            if let Some(email) = email {
                user.email = email;
            }
            if company.is_some() {
                user.company = company;
            }
            if role.is_some() {
                user.role = role;
            }
            if department.is_some() {
                user.department = department;
            }
            if let Some(contact_info) = contact_info {
                user.contact_info = contact_info;
            }
            if let Some(preferences) = preferences {
                user.preferences = preferences;
            }
            if avatar_url.is_some() {
                user.avatar_url = avatar_url;
            }
        })
        .ok_or_else(|| ApiError::not_found("User"))?;
    state.store.record(
        auth.email(),
        "updated",
        ActivityKind::Admin,
        format!("Profile of {} updated", updated.name),
    );
    Ok(Json(updated))
}

/// PUT `/admin/users/{id}/status`
async fn update_status(
    State(state): State<StubState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
    Json(input): Json<UpdateUserStatusInput>,
) -> ApiResult<Json<Profile>> {
    if id == auth.user_id() {
        return Err(AppError::Conflict("You cannot change your own status".into()).into());
    }
    let updated = state
        .store
        .users
        .update(id, |user| user.status = input.status)
        .ok_or_else(|| ApiError::not_found("User"))?;
    state.store.record(
        auth.email(),
        "changed status of",
        ActivityKind::Admin,
        format!("{} is now {:?}", updated.name, updated.status),
    );
    Ok(Json(updated))
}

/// GET `/admin/roles`
async fn list_roles(State(state): State<StubState>) -> Json<Vec<Role>> {
    Json(state.store.roles.list())
}

/// GET `/admin/roles/{id}`
async fn get_role(State(state): State<StubState>, Path(id): Path<RoleId>) -> ApiResult<Json<Role>> {
    state
        .store
        .roles
        .get(id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Role"))
}

fn ensure_unique_role_name(state: &StubState, name: &str, except: Option<RoleId>) -> ApiResult<()> {
    let taken = state
        .store
        .roles
        .filter(|r| Some(r.id) != except && r.name.eq_ignore_ascii_case(name.trim()));
    if taken.is_empty() {
        Ok(())
    } else {
        Err(AppError::Conflict(format!("A role named {} already exists", name.trim())).into())
    }
}

/// POST `/admin/roles`
async fn create_role(
    State(state): State<StubState>,
    auth: AuthUser,
    Json(input): Json<RoleInput>,
) -> ApiResult<(StatusCode, Json<Role>)> {
    validate_input(&input)?;
    ensure_unique_role_name(&state, &input.name, None)?;
    let role = Role {
        id: RoleId::new(),
        name: input.name.trim().to_string(),
        description: input.description,
        is_system: false,
    };
    state.store.role_permissions.insert(role.id, Vec::new());
    state.store.role_members.insert(role.id, Vec::new());
    let role = state.store.roles.insert(role.id, role);
    state.store.record(
        auth.email(),
        "created",
        ActivityKind::Admin,
        format!("Role {} created", role.name),
    );
    Ok((StatusCode::CREATED, Json(role)))
}

/// PUT `/admin/roles/{id}`
async fn update_role(
    State(state): State<StubState>,
    Path(id): Path<RoleId>,
    Json(input): Json<RoleInput>,
) -> ApiResult<Json<Role>> {
    validate_input(&input)?;
    let existing = state
        .store
        .roles
        .get(id)
        .ok_or_else(|| ApiError::not_found("Role"))?;
    if existing.is_system {
        return Err(AppError::Conflict("System roles cannot be modified".into()).into());
    }
    ensure_unique_role_name(&state, &input.name, Some(id))?;
    state
        .store
        .roles
        .update(id, |role| {
            role.name = input.name.trim().to_string();
            role.description = input.description;
        })
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Role"))
}

/// DELETE `/admin/roles/{id}`
async fn delete_role(
    State(state): State<StubState>,
    auth: AuthUser,
    Path(id): Path<RoleId>,
) -> ApiResult<StatusCode> {
    let existing = state
        .store
        .roles
        .get(id)
        .ok_or_else(|| ApiError::not_found("Role"))?;
    if existing.is_system {
        return Err(AppError::Conflict("System roles cannot be deleted".into()).into());
    }
    state.store.roles.remove(id);
    state.store.role_permissions.remove(&id);
    state.store.role_members.remove(&id);
    state.store.record(
        auth.email(),
        "deleted",
        ActivityKind::Admin,
        format!("Role {} deleted", existing.name),
    );
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/admin/permissions`
async fn list_permissions(State(state): State<StubState>) -> Json<Vec<Permission>> {
    Json(state.store.permissions.list())
}

/// GET `/admin/roles/{id}/permissions`
async fn role_permissions(
    State(state): State<StubState>,
    Path(id): Path<RoleId>,
) -> ApiResult<Json<Vec<RolePermission>>> {
    if !state.store.roles.contains(id) {
        return Err(ApiError::not_found("Role"));
    }
    let granted = state
        .store
        .role_permissions
        .get(&id)
        .map(|ids| ids.value().clone())
        .unwrap_or_default();
    Ok(Json(
        granted
            .into_iter()
            .map(|permission_id| RolePermission {
                role_id: id,
                permission_id,
            })
            .collect(),
    ))
}

/// PUT `/admin/roles/{id}/permissions` - Replaces the granted set.
async fn set_role_permissions(
    State(state): State<StubState>,
    auth: AuthUser,
    Path(id): Path<RoleId>,
    Json(input): Json<SetRolePermissionsInput>,
) -> ApiResult<StatusCode> {
    let role = state
        .store
        .roles
        .get(id)
        .ok_or_else(|| ApiError::not_found("Role"))?;
    if let Some(unknown) = input
        .permission_ids
        .iter()
        .find(|p| !state.store.permissions.contains(**p))
    {
        return Err(AppError::Validation(format!("Unknown permission {unknown}")).into());
    }
    let mut ids = input.permission_ids;
    ids.sort_unstable();
    ids.dedup();
    let count = ids.len();
    state.store.role_permissions.insert(id, ids);
    state.store.record(
        auth.email(),
        "updated permissions of",
        ActivityKind::Admin,
        format!("Role {} now grants {count} permissions", role.name),
    );
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/admin/roles/{id}/users`
async fn role_users(
    State(state): State<StubState>,
    Path(id): Path<RoleId>,
) -> ApiResult<Json<Vec<RoleUser>>> {
    if !state.store.roles.contains(id) {
        return Err(ApiError::not_found("Role"));
    }
    let members = state
        .store
        .role_members
        .get(&id)
        .map(|ids| ids.value().clone())
        .unwrap_or_default();
    Ok(Json(
        members
            .into_iter()
            .filter_map(|user_id| state.store.users.get(user_id))
            .map(|user| RoleUser {
                role_id: id,
                user_id: user.id,
                name: user.name,
                email: user.email,
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{admin_token, app, request, send};
    use serde_json::json;

    fn role_named(state: &StubState, name: &str) -> Role {
        state
            .store
            .roles
            .filter(|r| r.name == name)
            .pop()
            .unwrap()
    }

    #[tokio::test]
    async fn test_requires_bearer_token() {
        let (app, _) = app();
        let (status, body) = send(&app, request("GET", "/api/admin/users", "garbage", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid_token");
    }

    #[tokio::test]
    async fn test_list_users_in_seed_order() {
        let (app, state) = app();
        let token = admin_token(&state);
        let (status, body) = send(&app, request("GET", "/api/admin/users", &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Alex Admin", "Maria Lopez", "Sam Carter"]);
    }

    #[tokio::test]
    async fn test_set_role_permissions_replaces_set() {
        let (app, state) = app();
        let token = admin_token(&state);
        let viewer = role_named(&state, "Viewer");
        let share = state
            .store
            .permissions
            .filter(|p| p.name == "documents.share")
            .pop()
            .unwrap();

        let uri = format!("/api/admin/roles/{}/permissions", viewer.id);
        let body = json!({ "permission_ids": [share.id, share.id] });
        let (status, _) = send(&app, request("PUT", &uri, &token, Some(&body))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, request("GET", &uri, &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["permission_id"], share.id.to_string());
    }

    #[tokio::test]
    async fn test_unknown_permission_is_validation_error() {
        let (app, state) = app();
        let token = admin_token(&state);
        let viewer = role_named(&state, "Viewer");
        let uri = format!("/api/admin/roles/{}/permissions", viewer.id);
        let body = json!({ "permission_ids": [businessos_shared::types::PermissionId::new()] });

        let (status, body) = send(&app, request("PUT", &uri, &token, Some(&body))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"][0]["msg"].as_str().unwrap().starts_with("Unknown permission"));
    }

    #[tokio::test]
    async fn test_system_role_cannot_be_deleted() {
        let (app, state) = app();
        let token = admin_token(&state);
        let admin_role = role_named(&state, "Administrator");
        let uri = format!("/api/admin/roles/{}", admin_role.id);

        let (status, body) = send(&app, request("DELETE", &uri, &token, None)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["detail"], "System roles cannot be deleted");
        assert!(state.store.roles.contains(admin_role.id));
    }

    #[tokio::test]
    async fn test_create_role_rejects_duplicate_name() {
        let (app, state) = app();
        let token = admin_token(&state);
        let body = json!({ "name": "Auditor", "description": "Read-only finance" });

        let create = request("POST", "/api/admin/roles", &token, Some(&body));
        let (status, created) = send(&app, create).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["is_system"], false);

        let dup = json!({ "name": "auditor" });
        let (status, _) = send(&app, request("POST", "/api/admin/roles", &token, Some(&dup))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_cannot_change_own_status() {
        let (app, state) = app();
        let token = admin_token(&state);
        let me = state.store.users.filter(|u| u.name == "Alex Admin").pop().unwrap();
        let uri = format!("/api/admin/users/{}/status", me.id);
        let body = json!({ "status": "inactive" });

        let (status, _) = send(&app, request("PUT", &uri, &token, Some(&body))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_role_users_lists_members() {
        let (app, state) = app();
        let token = admin_token(&state);
        let manager = role_named(&state, "Finance Manager");
        let uri = format!("/api/admin/roles/{}/users", manager.id);

        let (status, body) = send(&app, request("GET", &uri, &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["email"], "maria@businessos.dev");
    }
}
