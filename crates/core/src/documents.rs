//! Document sharing and version history.
//!
//! Both are pass-through CRUD: the backend assigns version numbers and
//! enforces share uniqueness. The helpers here only order and look up what
//! the backend returned.

use businessos_shared::types::{DocumentId, DocumentShareId, DocumentVersionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Access tier granted by a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// Read only.
    #[default]
    View,
    /// Read and comment.
    Comment,
    /// Read and write.
    Edit,
}

impl PermissionLevel {
    /// True if this level includes `other`.
    #[must_use]
    pub fn includes(self, other: Self) -> bool {
        self >= other
    }
}

/// A document shared with someone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentShare {
    /// Share ID.
    pub id: DocumentShareId,
    /// Shared document.
    pub document_id: DocumentId,
    /// Recipient email.
    pub shared_with: String,
    /// Granted level.
    pub permission_level: PermissionLevel,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}

/// Input for sharing a document.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShareInput {
    /// Recipient email.
    #[validate(email(message = "Enter a valid email address"))]
    pub shared_with: String,
    /// Granted level.
    pub permission_level: PermissionLevel,
}

/// Input for changing a share's level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateShareInput {
    /// New level.
    pub permission_level: PermissionLevel,
}

/// One stored version of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentVersion {
    /// Version ID.
    pub id: DocumentVersionId,
    /// Owning document.
    pub document_id: DocumentId,
    /// Monotonic per document, assigned by the backend.
    pub version_number: u32,
    /// Blob path in storage.
    pub storage_path: String,
    /// Blob size.
    #[serde(default)]
    pub size_bytes: u64,
    /// Uploader.
    #[serde(default)]
    pub created_by: Option<UserId>,
    /// Upload time.
    pub created_at: DateTime<Utc>,
    /// Change note.
    #[serde(default)]
    pub comment: Option<String>,
}

/// Metadata for a newly uploaded version; the backend assigns the number.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewVersionInput {
    /// Blob path returned by the upload.
    #[validate(length(min = 1, message = "Storage path is required"))]
    pub storage_path: String,
    /// Blob size.
    pub size_bytes: u64,
    /// Change note.
    #[validate(length(max = 500, message = "Comment is too long"))]
    pub comment: Option<String>,
}

/// Version history, newest first.
#[must_use]
pub fn history(versions: &[DocumentVersion]) -> Vec<DocumentVersion> {
    let mut out = versions.to_vec();
    out.sort_by(|a, b| b.version_number.cmp(&a.version_number));
    out
}

/// Highest-numbered version, if any.
#[must_use]
pub fn latest(versions: &[DocumentVersion]) -> Option<&DocumentVersion> {
    versions.iter().max_by_key(|v| v.version_number)
}

/// Existing share for `email`, compared case-insensitively.
#[must_use]
pub fn share_for<'a>(shares: &'a [DocumentShare], email: &str) -> Option<&'a DocumentShare> {
    shares
        .iter()
        .find(|s| s.shared_with.eq_ignore_ascii_case(email.trim()))
}

/// Storage key for a document version blob.
#[must_use]
pub fn version_storage_path(
    document: DocumentId,
    version: DocumentVersionId,
    filename: &str,
) -> String {
    format!("documents/{document}/{version}/{filename}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_input;
    use chrono::TimeZone;

    fn version(document: DocumentId, number: u32) -> DocumentVersion {
        DocumentVersion {
            id: DocumentVersionId::new(),
            document_id: document,
            version_number: number,
            storage_path: format!("documents/{document}/v{number}"),
            size_bytes: 10,
            created_by: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            comment: None,
        }
    }

    #[test]
    fn test_history_newest_first() {
        let doc = DocumentId::new();
        let versions = vec![version(doc, 2), version(doc, 3), version(doc, 1)];
        let numbers: Vec<_> = history(&versions).iter().map(|v| v.version_number).collect();
        assert_eq!(numbers, vec![3, 2, 1]);
        assert_eq!(latest(&versions).map(|v| v.version_number), Some(3));
        assert!(latest(&[]).is_none());
    }

    #[test]
    fn test_permission_levels() {
        assert!(PermissionLevel::Edit.includes(PermissionLevel::Comment));
        assert!(PermissionLevel::Comment.includes(PermissionLevel::View));
        assert!(!PermissionLevel::View.includes(PermissionLevel::Edit));
        assert_eq!(
            serde_json::to_string(&PermissionLevel::Comment).unwrap(),
            "\"comment\""
        );
    }

    #[test]
    fn test_share_lookup_case_insensitive() {
        let doc = DocumentId::new();
        let shares = vec![DocumentShare {
            id: DocumentShareId::new(),
            document_id: doc,
            shared_with: "Ana@Example.com".into(),
            permission_level: PermissionLevel::Edit,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }];
        assert!(share_for(&shares, " ana@example.com ").is_some());
        assert!(share_for(&shares, "bob@example.com").is_none());
    }

    #[test]
    fn test_share_input_requires_email() {
        let input = ShareInput {
            shared_with: "not-an-email".into(),
            permission_level: PermissionLevel::View,
        };
        assert!(validate_input(&input).is_err());
    }
}
