//! Users, roles and permissions.

pub mod filter;
pub mod types;

pub use filter::{
    UserFilter, filter_permissions, filter_users, group_by_category, permission_categories,
    toggle_permission,
};
pub use types::{
    Permission, Profile, Role, RoleInput, RolePermission, RoleUser, SetRolePermissionsInput,
    UpdateProfileInput, UpdateUserStatusInput, UserStatus,
};
