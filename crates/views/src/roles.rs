//! Roles page and the role-permissions dialog.

use std::collections::BTreeSet;
use std::sync::Arc;

use businessos_core::admin::{
    Permission, Role, RoleInput, RoleUser, filter_permissions, group_by_category,
    permission_categories, toggle_permission,
};
use businessos_core::ports::AdminApi;
use businessos_core::validate_input;
use businessos_shared::types::{PermissionId, RoleId};
use tracing::info;

use crate::notify::Notifier;
use crate::scope::ViewScope;

/// Role list with create, rename and delete.
pub struct RolesView {
    api: Arc<dyn AdminApi>,
    scope: ViewScope,
    roles: Vec<Role>,
}

impl RolesView {
    /// Empty page.
    pub fn new(api: Arc<dyn AdminApi>, notifier: Notifier) -> Self {
        Self {
            api,
            scope: ViewScope::new(notifier),
            roles: Vec::new(),
        }
    }

    /// Lifetime of the page.
    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Roles as last fetched.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Fetches the roles.
    pub async fn load(&mut self) -> bool {
        match self
            .scope
            .run("Failed to load roles", self.api.list_roles())
            .await
        {
            Some(roles) => {
                self.roles = roles;
                true
            }
            None => false,
        }
    }

    /// Creates a role and re-fetches.
    pub async fn create(&mut self, input: RoleInput) -> bool {
        const TITLE: &str = "Failed to create role";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        let Some(role) = self.scope.run(TITLE, self.api.create_role(&input)).await else {
            return false;
        };
        self.scope
            .notifier()
            .success("Role created", format!("{} is ready to configure", role.name));
        self.load().await
    }

    /// Renames or re-describes a role and re-fetches.
    pub async fn update(&mut self, id: RoleId, input: RoleInput) -> bool {
        const TITLE: &str = "Failed to update role";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        if self
            .scope
            .run(TITLE, self.api.update_role(id, &input))
            .await
            .is_none()
        {
            return false;
        }
        self.scope.notifier().success("Role updated", input.name);
        self.load().await
    }

    /// Deletes a role and re-fetches.
    pub async fn delete(&mut self, id: RoleId) -> bool {
        if self
            .scope
            .run("Failed to delete role", self.api.delete_role(id))
            .await
            .is_none()
        {
            return false;
        }
        self.scope.notifier().success("Role deleted", "The role was removed");
        self.load().await
    }

    /// Opens the permissions dialog for `role`, tied to this page's lifetime.
    pub async fn edit_permissions(&self, role: RoleId) -> RolePermissionsDialog {
        let mut dialog =
            RolePermissionsDialog::new(Arc::clone(&self.api), role, self.scope.child());
        dialog.open().await;
        dialog
    }
}

/// Role-permissions dialog.
///
/// Opening fetches the role, the permission catalogue, the current grants
/// and the members together. If any of them fails the dialog shows one
/// toast and closes.
pub struct RolePermissionsDialog {
    api: Arc<dyn AdminApi>,
    scope: ViewScope,
    role_id: RoleId,
    role: Option<Role>,
    permissions: Vec<Permission>,
    selected: BTreeSet<PermissionId>,
    users: Vec<RoleUser>,
    category: String,
}

impl RolePermissionsDialog {
    /// Closed-until-opened dialog for `role`.
    pub fn new(api: Arc<dyn AdminApi>, role: RoleId, scope: ViewScope) -> Self {
        Self {
            api,
            scope,
            role_id: role,
            role: None,
            permissions: Vec::new(),
            selected: BTreeSet::new(),
            users: Vec::new(),
            category: String::new(),
        }
    }

    /// Fetches everything the dialog shows. Returns false and closes on failure.
    pub async fn open(&mut self) -> bool {
        let id = self.role_id;
        let api = &self.api;
        let fetched = self
            .scope
            .run("Failed to load role permissions", async {
                tokio::try_join!(
                    api.get_role(id),
                    api.list_permissions(),
                    api.role_permissions(id),
                    api.role_users(id),
                )
            })
            .await;
        let Some((role, permissions, granted, users)) = fetched else {
            self.scope.close();
            return false;
        };
        self.role = Some(role);
        self.permissions = permissions;
        self.selected = granted.into_iter().map(|g| g.permission_id).collect();
        self.users = users;
        true
    }

    /// True while the dialog is shown.
    pub fn is_open(&self) -> bool {
        !self.scope.is_closed() && self.role.is_some()
    }

    /// The role being edited.
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Members of the role.
    pub fn users(&self) -> &[RoleUser] {
        &self.users
    }

    /// Current selection.
    pub fn selected(&self) -> &BTreeSet<PermissionId> {
        &self.selected
    }

    /// Category tabs in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        permission_categories(&self.permissions)
    }

    /// Shows one category, or everything for `"all"`.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// Permissions in the current category, catalogue order.
    pub fn visible(&self) -> Vec<Permission> {
        filter_permissions(&self.permissions, &self.category)
    }

    /// Catalogue grouped by category.
    pub fn grouped(&self) -> Vec<(String, Vec<Permission>)> {
        group_by_category(&self.permissions)
    }

    /// Flips one checkbox. Returns true if now selected.
    pub fn toggle(&mut self, id: PermissionId) -> bool {
        toggle_permission(&mut self.selected, id)
    }

    /// Selects or clears every permission in the current category.
    pub fn set_all_visible(&mut self, on: bool) {
        for permission in filter_permissions(&self.permissions, &self.category) {
            if on {
                self.selected.insert(permission.id);
            } else {
                self.selected.remove(&permission.id);
            }
        }
    }

    /// Saves the selection and closes. On failure the dialog stays open with
    /// the selection intact.
    pub async fn save(&mut self) -> bool {
        let ids: Vec<PermissionId> = self.selected.iter().copied().collect();
        if self
            .scope
            .run(
                "Failed to update permissions",
                self.api.set_role_permissions(self.role_id, &ids),
            )
            .await
            .is_none()
        {
            return false;
        }
        let name = self.role.as_ref().map_or("Role", |r| r.name.as_str());
        info!(role = %self.role_id, count = ids.len(), "role permissions saved");
        self.scope
            .notifier()
            .success("Permissions updated", format!("{name} now has {} permission(s)", ids.len()));
        self.scope.close();
        true
    }

    /// Closes without saving.
    pub fn close(&self) {
        self.scope.close();
    }
}
