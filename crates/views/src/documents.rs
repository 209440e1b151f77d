//! Sharing and version history of one document.

use std::sync::Arc;

use businessos_client::BlobStore;
use businessos_core::documents::{
    DocumentShare, DocumentVersion, PermissionLevel, ShareInput, history, latest, share_for,
};
use businessos_core::ports::DocumentApi;
use businessos_core::validate_input;
use businessos_shared::AppError;
use businessos_shared::types::{DocumentId, DocumentShareId, DocumentVersionId};

use crate::notify::Notifier;
use crate::scope::ViewScope;

/// Share and version panels of a document.
pub struct DocumentView {
    api: Arc<dyn DocumentApi>,
    scope: ViewScope,
    document: DocumentId,
    shares: Vec<DocumentShare>,
    versions: Vec<DocumentVersion>,
}

impl DocumentView {
    /// Panels for `document`, empty until loaded.
    pub fn new(api: Arc<dyn DocumentApi>, document: DocumentId, notifier: Notifier) -> Self {
        Self {
            api,
            scope: ViewScope::new(notifier),
            document,
            shares: Vec::new(),
            versions: Vec::new(),
        }
    }

    /// Lifetime of the panels.
    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Document shown.
    pub const fn document(&self) -> DocumentId {
        self.document
    }

    /// Current shares.
    pub fn shares(&self) -> &[DocumentShare] {
        &self.shares
    }

    /// Share held by `email`, if any.
    pub fn share_of(&self, email: &str) -> Option<&DocumentShare> {
        share_for(&self.shares, email)
    }

    /// Version history, newest first.
    pub fn history(&self) -> Vec<DocumentVersion> {
        history(&self.versions)
    }

    /// Newest version.
    pub fn latest(&self) -> Option<&DocumentVersion> {
        latest(&self.versions)
    }

    /// Fetches shares and versions together.
    pub async fn load(&mut self) -> bool {
        let (api, document) = (&self.api, self.document);
        let fetched = self
            .scope
            .run("Failed to load document", async {
                tokio::try_join!(api.list_shares(document), api.list_versions(document))
            })
            .await;
        let Some((shares, versions)) = fetched else {
            return false;
        };
        self.shares = shares;
        self.versions = versions;
        true
    }

    /// Shares the document and re-fetches.
    pub async fn share(&mut self, input: ShareInput) -> bool {
        const TITLE: &str = "Failed to share document";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        let Some(share) = self
            .scope
            .run(TITLE, self.api.share(self.document, &input))
            .await
        else {
            return false;
        };
        self.scope
            .notifier()
            .success("Document shared", format!("Shared with {}", share.shared_with));
        self.load().await
    }

    /// Changes a share's level and re-fetches.
    pub async fn set_level(&mut self, share: DocumentShareId, level: PermissionLevel) -> bool {
        if self
            .scope
            .run(
                "Failed to update access",
                self.api.update_share(self.document, share, level),
            )
            .await
            .is_none()
        {
            return false;
        }
        self.scope
            .notifier()
            .success("Access updated", "Permission level changed");
        self.load().await
    }

    /// Revokes a share and re-fetches.
    pub async fn revoke(&mut self, share: DocumentShareId) -> bool {
        if self
            .scope
            .run(
                "Failed to revoke access",
                self.api.revoke_share(self.document, share),
            )
            .await
            .is_none()
        {
            return false;
        }
        self.scope
            .notifier()
            .success("Access revoked", "The share was removed");
        self.load().await
    }

    /// Stores the blob, records it as the next version and re-fetches.
    ///
    /// Nothing is recorded when the blob upload fails, and the blob is
    /// deleted again when recording fails. Once started, both steps run to
    /// the end even if the view closes.
    pub async fn upload_version(
        &mut self,
        blobs: &BlobStore,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
        comment: Option<String>,
    ) -> bool {
        const TITLE: &str = "Failed to upload version";
        let (api, document) = (&self.api, self.document);
        let upload = async {
            let input = blobs
                .upload_document_version(document, filename, content_type, data, comment)
                .await
                .map_err(AppError::from)?;
            match api.add_version(document, &input).await {
                Ok(version) => Ok(version),
                Err(err) => {
                    blobs.discard(&input.storage_path).await;
                    Err(err)
                }
            }
        };
        let Some(version) = self.scope.run_to_end(TITLE, upload).await else {
            return false;
        };
        self.scope.notifier().success(
            "Version uploaded",
            format!("Version {} saved", version.version_number),
        );
        self.load().await
    }

    /// Copies an old version forward as the newest and re-fetches.
    pub async fn restore(&mut self, version: DocumentVersionId) -> bool {
        let Some(restored) = self
            .scope
            .run(
                "Failed to restore version",
                self.api.restore_version(self.document, version),
            )
            .await
        else {
            return false;
        };
        self.scope.notifier().success(
            "Version restored",
            format!("Saved as version {}", restored.version_number),
        );
        self.load().await
    }

    /// Closes the panels.
    pub fn close(&self) {
        self.scope.close();
    }
}
