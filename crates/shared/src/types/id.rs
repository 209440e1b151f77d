//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `RoleId` where a `UserId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user profile.");
typed_id!(RoleId, "Unique identifier for a role.");
typed_id!(PermissionId, "Unique identifier for a permission.");
typed_id!(BudgetId, "Unique identifier for a budget.");
typed_id!(BudgetCategoryId, "Unique identifier for a budget category.");
typed_id!(InvoiceId, "Unique identifier for an invoice.");
typed_id!(ClientId, "Unique identifier for a billing client.");
typed_id!(TransactionId, "Unique identifier for a transaction.");
typed_id!(EmployeeId, "Unique identifier for an employee.");
typed_id!(DepartmentId, "Unique identifier for a department.");
typed_id!(DocumentId, "Unique identifier for a document.");
typed_id!(DocumentShareId, "Unique identifier for a document share.");
typed_id!(DocumentVersionId, "Unique identifier for a document version.");
typed_id!(TaskId, "Unique identifier for a task.");
typed_id!(EventId, "Unique identifier for a calendar event.");
typed_id!(ActivityId, "Unique identifier for an activity feed entry.");
typed_id!(ChannelId, "Unique identifier for a chat channel.");
typed_id!(MessageId, "Unique identifier for a chat message.");
