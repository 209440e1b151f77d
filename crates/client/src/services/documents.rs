//! `/api/documents` service.

use async_trait::async_trait;
use businessos_core::documents::{
    DocumentShare, DocumentVersion, NewVersionInput, PermissionLevel, ShareInput,
    UpdateShareInput,
};
use businessos_core::ports::DocumentApi;
use businessos_shared::AppResult;
use businessos_shared::types::{DocumentId, DocumentShareId, DocumentVersionId};

use crate::http::ApiClient;

/// Document shares and versions over REST.
#[derive(Debug, Clone)]
pub struct DocumentService {
    api: ApiClient,
}

impl DocumentService {
    /// Creates the service.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DocumentApi for DocumentService {
    async fn list_shares(&self, document: DocumentId) -> AppResult<Vec<DocumentShare>> {
        self.api
            .get(&format!("/api/documents/{document}/shares"))
            .await
    }

    async fn share(&self, document: DocumentId, input: &ShareInput) -> AppResult<DocumentShare> {
        self.api
            .post(&format!("/api/documents/{document}/shares"), input)
            .await
    }

    async fn update_share(
        &self,
        document: DocumentId,
        share: DocumentShareId,
        level: PermissionLevel,
    ) -> AppResult<DocumentShare> {
        self.api
            .put(
                &format!("/api/documents/{document}/shares/{share}"),
                &UpdateShareInput {
                    permission_level: level,
                },
            )
            .await
    }

    async fn revoke_share(&self, document: DocumentId, share: DocumentShareId) -> AppResult<()> {
        self.api
            .delete(&format!("/api/documents/{document}/shares/{share}"))
            .await
    }

    async fn list_versions(&self, document: DocumentId) -> AppResult<Vec<DocumentVersion>> {
        self.api
            .get(&format!("/api/documents/{document}/versions"))
            .await
    }

    async fn add_version(
        &self,
        document: DocumentId,
        input: &NewVersionInput,
    ) -> AppResult<DocumentVersion> {
        self.api
            .post(&format!("/api/documents/{document}/versions"), input)
            .await
    }

    async fn restore_version(
        &self,
        document: DocumentId,
        version: DocumentVersionId,
    ) -> AppResult<DocumentVersion> {
        self.api
            .post_empty(&format!(
                "/api/documents/{document}/versions/{version}/restore"
            ))
            .await
    }
}
