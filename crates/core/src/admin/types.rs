//! User, role and permission data types.

use std::collections::HashMap;

use businessos_shared::types::{PermissionId, RoleId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::validation::not_blank;

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Can sign in.
    #[default]
    Active,
    /// Disabled by an administrator.
    Inactive,
}

/// A user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile ID (same as the auth user ID).
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Company name.
    #[serde(default)]
    pub company: Option<String>,
    /// Job role label.
    #[serde(default)]
    pub role: Option<String>,
    /// Department name.
    #[serde(default)]
    pub department: Option<String>,
    /// Free-form contact details (phone, address, ...).
    #[serde(default)]
    pub contact_info: HashMap<String, String>,
    /// UI preferences.
    #[serde(default)]
    pub preferences: HashMap<String, Value>,
    /// Account status.
    #[serde(default)]
    pub status: UserStatus,
    /// Public avatar URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Input for updating a profile. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileInput {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    /// Company name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Job role label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Department name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Contact details, replaced wholesale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<HashMap<String, String>>,
    /// Preferences, replaced wholesale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<HashMap<String, Value>>,
    /// Avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// A role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role ID.
    pub id: RoleId,
    /// Role name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Built-in roles cannot be renamed or deleted.
    #[serde(default)]
    pub is_system: bool,
}

/// Input for creating or updating a role.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoleInput {
    /// Role name.
    #[validate(custom(function = "not_blank", message = "Role name is required"))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// A permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Permission ID.
    pub id: PermissionId,
    /// Permission name, e.g. `finance.budgets.write`.
    pub name: String,
    /// Grouping category, e.g. `finance`.
    pub category: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Role-to-permission link (read-only projection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermission {
    /// Role ID.
    pub role_id: RoleId,
    /// Permission ID.
    pub permission_id: PermissionId,
}

/// Role member (read-only projection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleUser {
    /// Role ID.
    pub role_id: RoleId,
    /// User ID.
    pub user_id: UserId,
    /// User display name.
    #[serde(default)]
    pub name: String,
    /// User email.
    #[serde(default)]
    pub email: String,
}

/// Body for replacing a role's permission set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRolePermissionsInput {
    /// Full permission set after the update.
    pub permission_ids: Vec<PermissionId>,
}

/// Body for changing a user's status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateUserStatusInput {
    /// New status.
    pub status: UserStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_input;

    #[test]
    fn test_profile_defaults_missing_fields() {
        let json = serde_json::json!({
            "id": "0191a3b0-0000-7000-8000-000000000001",
            "name": "Ana",
            "email": "ana@example.com"
        });
        let profile: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.status, UserStatus::Active);
        assert!(profile.contact_info.is_empty());
        assert!(profile.department.is_none());
    }

    #[test]
    fn test_update_profile_skips_unset_fields() {
        let input = UpdateProfileInput {
            department: Some("Finance".into()),
            ..UpdateProfileInput::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, serde_json::json!({ "department": "Finance" }));
    }

    #[test]
    fn test_update_profile_rejects_bad_email() {
        let input = UpdateProfileInput {
            email: Some("not-an-email".into()),
            ..UpdateProfileInput::default()
        };
        assert!(validate_input(&input).is_err());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&UserStatus::Inactive).unwrap(),
            "\"inactive\""
        );
    }
}
