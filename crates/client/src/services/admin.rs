//! `/api/admin` service.

use async_trait::async_trait;
use businessos_core::admin::{
    Permission, Profile, Role, RoleInput, RolePermission, RoleUser, SetRolePermissionsInput,
    UpdateProfileInput, UpdateUserStatusInput, UserStatus,
};
use businessos_core::ports::AdminApi;
use businessos_shared::AppResult;
use businessos_shared::types::{PermissionId, RoleId, UserId};

use crate::http::ApiClient;

/// Users, roles and permissions over REST.
#[derive(Debug, Clone)]
pub struct AdminService {
    api: ApiClient,
}

impl AdminService {
    /// Creates the service.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AdminApi for AdminService {
    async fn list_users(&self) -> AppResult<Vec<Profile>> {
        self.api.get("/api/admin/users").await
    }

    async fn get_user(&self, id: UserId) -> AppResult<Profile> {
        self.api.get(&format!("/api/admin/users/{id}")).await
    }

    async fn update_user(&self, id: UserId, input: &UpdateProfileInput) -> AppResult<Profile> {
        self.api.put(&format!("/api/admin/users/{id}"), input).await
    }

    async fn set_user_status(&self, id: UserId, status: UserStatus) -> AppResult<Profile> {
        self.api
            .put(
                &format!("/api/admin/users/{id}/status"),
                &UpdateUserStatusInput { status },
            )
            .await
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.api.get("/api/admin/roles").await
    }

    async fn get_role(&self, id: RoleId) -> AppResult<Role> {
        self.api.get(&format!("/api/admin/roles/{id}")).await
    }

    async fn create_role(&self, input: &RoleInput) -> AppResult<Role> {
        self.api.post("/api/admin/roles", input).await
    }

    async fn update_role(&self, id: RoleId, input: &RoleInput) -> AppResult<Role> {
        self.api.put(&format!("/api/admin/roles/{id}"), input).await
    }

    async fn delete_role(&self, id: RoleId) -> AppResult<()> {
        self.api.delete(&format!("/api/admin/roles/{id}")).await
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        self.api.get("/api/admin/permissions").await
    }

    async fn role_permissions(&self, id: RoleId) -> AppResult<Vec<RolePermission>> {
        self.api
            .get(&format!("/api/admin/roles/{id}/permissions"))
            .await
    }

    async fn set_role_permissions(
        &self,
        id: RoleId,
        permission_ids: &[PermissionId],
    ) -> AppResult<()> {
        let body = SetRolePermissionsInput {
            permission_ids: permission_ids.to_vec(),
        };
        self.api
            .put_no_content(&format!("/api/admin/roles/{id}/permissions"), &body)
            .await
    }

    async fn role_users(&self, id: RoleId) -> AppResult<Vec<RoleUser>> {
        self.api.get(&format!("/api/admin/roles/{id}/users")).await
    }
}
