//! Permission and user list filtering for the admin dialogs.

use std::collections::BTreeSet;

use businessos_shared::types::PermissionId;

use super::types::{Permission, Profile, UserStatus};
use crate::listing::{any_field_matches, category_matches};

/// Filters permissions by category, preserving input order.
///
/// `"all"` (or an empty filter) returns the full input.
#[must_use]
pub fn filter_permissions(permissions: &[Permission], category: &str) -> Vec<Permission> {
    permissions
        .iter()
        .filter(|p| category_matches(&p.category, category))
        .cloned()
        .collect()
}

/// Distinct categories in first-seen order.
#[must_use]
pub fn permission_categories(permissions: &[Permission]) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for permission in permissions {
        if !seen.iter().any(|c| c == &permission.category) {
            seen.push(permission.category.clone());
        }
    }
    seen
}

/// Groups permissions under their category, categories in first-seen order.
#[must_use]
pub fn group_by_category(permissions: &[Permission]) -> Vec<(String, Vec<Permission>)> {
    permission_categories(permissions)
        .into_iter()
        .map(|category| {
            let members = permissions
                .iter()
                .filter(|p| p.category == category)
                .cloned()
                .collect();
            (category, members)
        })
        .collect()
}

/// Adds or removes a permission from a selection. Returns true if now selected.
pub fn toggle_permission(selected: &mut BTreeSet<PermissionId>, id: PermissionId) -> bool {
    if selected.remove(&id) {
        false
    } else {
        selected.insert(id);
        true
    }
}

/// Filter for the user directory.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Matches name, email or department.
    pub search: String,
    /// Restricts to one status.
    pub status: Option<UserStatus>,
}

impl UserFilter {
    /// True if the profile passes the filter.
    #[must_use]
    pub fn matches(&self, user: &Profile) -> bool {
        if self.status.is_some_and(|status| status != user.status) {
            return false;
        }
        any_field_matches(
            [
                user.name.as_str(),
                user.email.as_str(),
                user.department.as_deref().unwrap_or_default(),
            ],
            &self.search,
        )
    }
}

/// Filters users, sorted by name (case-insensitive, stable).
#[must_use]
pub fn filter_users(users: &[Profile], filter: &UserFilter) -> Vec<Profile> {
    let mut out: Vec<Profile> = users.iter().filter(|u| filter.matches(u)).cloned().collect();
    out.sort_by_cached_key(|u| u.name.to_lowercase());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use businessos_shared::types::UserId;
    use std::collections::HashMap;

    fn perm(name: &str, category: &str) -> Permission {
        Permission {
            id: PermissionId::new(),
            name: name.to_string(),
            category: category.to_string(),
            description: None,
        }
    }

    fn user(name: &str, department: Option<&str>, status: UserStatus) -> Profile {
        Profile {
            id: UserId::new(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            company: None,
            role: None,
            department: department.map(ToString::to_string),
            contact_info: HashMap::new(),
            preferences: HashMap::new(),
            status,
            avatar_url: None,
            created_at: None,
        }
    }

    #[test]
    fn test_filter_all_returns_input() {
        let perms = vec![perm("a", "finance"), perm("b", "hr"), perm("c", "finance")];
        assert_eq!(filter_permissions(&perms, "all"), perms);
    }

    #[test]
    fn test_filter_category_preserves_order() {
        let perms = vec![perm("a", "finance"), perm("b", "hr"), perm("c", "finance")];
        let names: Vec<_> = filter_permissions(&perms, "finance")
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_group_by_category() {
        let perms = vec![perm("a", "hr"), perm("b", "finance"), perm("c", "hr")];
        let groups = group_by_category(&perms);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "hr");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "finance");
    }

    #[test]
    fn test_toggle_permission() {
        let mut selected = BTreeSet::new();
        let id = PermissionId::new();
        assert!(toggle_permission(&mut selected, id));
        assert!(selected.contains(&id));
        assert!(!toggle_permission(&mut selected, id));
        assert!(selected.is_empty());
    }

    #[test]
    fn test_filter_users() {
        let users = vec![
            user("Zoe", Some("Finance"), UserStatus::Active),
            user("adam", Some("HR"), UserStatus::Inactive),
            user("Bea", Some("Finance"), UserStatus::Active),
        ];
        let filter = UserFilter {
            search: "finance".into(),
            status: Some(UserStatus::Active),
        };
        let names: Vec<_> = filter_users(&users, &filter)
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, ["Bea", "Zoe"]);

        let everyone = filter_users(&users, &UserFilter::default());
        assert_eq!(everyone[0].name, "adam");
    }
}
