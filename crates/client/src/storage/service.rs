//! OpenDAL-backed blob store.

use std::path::Path;

use businessos_core::documents::{NewVersionInput, version_storage_path};
use businessos_shared::types::{DocumentId, DocumentVersionId, UserId};
use businessos_shared::{StorageProviderSettings, StorageSettings};
use opendal::{Operator, services};
use tracing::{debug, info, warn};

use super::error::StorageError;

/// Image types accepted for avatars, whatever the document allow-list says.
pub const AVATAR_MIME_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/gif", "image/webp"];

const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// What was stored under a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobMetadata {
    /// Storage key.
    pub key: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Content type, when the provider records one.
    pub content_type: Option<String>,
}

/// Blob store for avatars and document versions.
#[derive(Debug, Clone)]
pub struct BlobStore {
    operator: Operator,
    provider: &'static str,
    public_base: String,
    max_file_size: u64,
    allowed_mime_types: Vec<String>,
}

impl BlobStore {
    /// Creates the store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be initialized.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let (operator, provider) = Self::create_operator(&settings.provider)?;
        let public_base = settings
            .public_base_url
            .clone()
            .unwrap_or_else(|| default_public_base(&settings.provider));
        Ok(Self {
            operator,
            provider,
            public_base,
            max_file_size: settings.max_file_size,
            allowed_mime_types: settings.allowed_mime_types.clone(),
        })
    }

    /// Local-directory store with default limits and no MIME restriction.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be used.
    pub fn local(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let settings = StorageProviderSettings::LocalFs {
            root: root.as_ref().to_path_buf(),
        };
        let (operator, provider) = Self::create_operator(&settings)?;
        Ok(Self {
            operator,
            provider,
            public_base: default_public_base(&settings),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_mime_types: Vec::new(),
        })
    }

    /// Set maximum upload size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set allowed MIME types for documents; empty allows all.
    #[must_use]
    pub fn with_allowed_mime_types(mut self, types: Vec<String>) -> Self {
        self.allowed_mime_types = types;
        self
    }

    fn create_operator(
        provider: &StorageProviderSettings,
    ) -> Result<(Operator, &'static str), StorageError> {
        match provider {
            StorageProviderSettings::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);
                let operator = Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish();
                Ok((operator, "s3"))
            }
            StorageProviderSettings::LocalFs { root } => {
                let root = root
                    .to_str()
                    .ok_or_else(|| StorageError::configuration("invalid path"))?;
                let operator = Operator::new(services::Fs::default().root(root))
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish();
                Ok((operator, "local"))
            }
        }
    }

    /// Provider name for logs.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider
    }

    /// Public URL of an object.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.public_base.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }

    /// Checks size and document MIME type.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is too large or its type is not allowed.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size > self.max_file_size {
            return Err(StorageError::file_too_large(size, self.max_file_size));
        }
        if !self.allowed_mime_types.is_empty()
            && !self.allowed_mime_types.iter().any(|t| t == content_type)
        {
            return Err(StorageError::invalid_mime_type(content_type));
        }
        Ok(())
    }

    /// Key of a user's avatar.
    #[must_use]
    pub fn avatar_key(user: UserId, filename: &str) -> String {
        format!("avatars/{user}/{}", sanitize_filename(filename))
    }

    /// Stores an avatar image and returns its metadata.
    ///
    /// # Errors
    ///
    /// Returns an error for non-image types, oversized files or a failed write.
    pub async fn upload_avatar(
        &self,
        user: UserId,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<BlobMetadata, StorageError> {
        if !AVATAR_MIME_TYPES.contains(&content_type) {
            return Err(StorageError::invalid_mime_type(content_type));
        }
        let size = byte_len(&data);
        if size > self.max_file_size {
            return Err(StorageError::file_too_large(size, self.max_file_size));
        }
        self.put(&Self::avatar_key(user, filename), content_type, data)
            .await
    }

    /// Stores a new document version and returns the input for recording it
    /// through the documents API.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the write fails.
    pub async fn upload_document_version(
        &self,
        document: DocumentId,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
        comment: Option<String>,
    ) -> Result<NewVersionInput, StorageError> {
        self.validate_upload(content_type, byte_len(&data))?;
        let key = version_storage_path(
            document,
            DocumentVersionId::new(),
            &sanitize_filename(filename),
        );
        let stored = self.put(&key, content_type, data).await?;
        Ok(NewVersionInput {
            storage_path: stored.key,
            size_bytes: stored.size_bytes,
            comment,
        })
    }

    /// Writes an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn put(
        &self,
        key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<BlobMetadata, StorageError> {
        let size = byte_len(&data);
        self.operator
            .write_with(key, data)
            .content_type(content_type)
            .await
            .map_err(|e| StorageError::from_opendal(key, &e))?;
        info!(provider = self.provider, key, size, "stored blob");
        Ok(BlobMetadata {
            key: key.to_string(),
            size_bytes: size,
            content_type: Some(content_type.to_string()),
        })
    }

    /// Reads an object.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for a missing key.
    pub async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        debug!(provider = self.provider, key, "reading blob");
        self.operator
            .read(key)
            .await
            .map(|buffer| buffer.to_vec())
            .map_err(|e| StorageError::from_opendal(key, &e))
    }

    /// Size and type of an object.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for a missing key.
    pub async fn stat(&self, key: &str) -> Result<BlobMetadata, StorageError> {
        let meta = self
            .operator
            .stat(key)
            .await
            .map_err(|e| StorageError::from_opendal(key, &e))?;
        Ok(BlobMetadata {
            key: key.to_string(),
            size_bytes: meta.content_length(),
            content_type: meta.content_type().map(String::from),
        })
    }

    /// Deletes an object; deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator
            .delete(key)
            .await
            .map_err(|e| StorageError::from_opendal(key, &e))
    }

    /// Deletes an object left behind by a write that was rolled back.
    /// Failures are logged, not returned.
    pub async fn discard(&self, key: &str) {
        match self.delete(key).await {
            Ok(()) => info!(provider = self.provider, key, "discarded blob"),
            Err(err) => {
                warn!(provider = self.provider, key, error = %err, "failed to discard blob");
            }
        }
    }

    /// True if the object exists.
    pub async fn exists(&self, key: &str) -> bool {
        self.operator.stat(key).await.is_ok()
    }
}

fn default_public_base(provider: &StorageProviderSettings) -> String {
    match provider {
        StorageProviderSettings::S3 {
            endpoint, bucket, ..
        } => format!("{}/{bucket}", endpoint.trim_end_matches('/')),
        StorageProviderSettings::LocalFs { root } => format!("file://{}", root.display()),
    }
}

fn byte_len(data: &[u8]) -> u64 {
    u64::try_from(data.len()).unwrap_or(u64::MAX)
}

/// Replaces anything but ASCII alphanumerics, `.`, `-` and `_` with `_`.
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_sanitized_filename_safe_chars(filename in ".*") {
            let sanitized = sanitize_filename(&filename);
            for c in sanitized.chars() {
                let is_safe = c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_';
                prop_assert!(is_safe, "unexpected character {}", c);
            }
            prop_assert!(!sanitized.contains('/'));
        }

        #[test]
        fn prop_file_size_validation(
            max_size in 1024u64..10_000_000,
            file_size in 0u64..20_000_000,
        ) {
            let store = BlobStore::local(std::env::temp_dir())
                .unwrap()
                .with_max_file_size(max_size);
            let result = store.validate_upload("application/pdf", file_size);
            if file_size <= max_size {
                prop_assert!(result.is_ok());
            } else {
                let too_large = matches!(result, Err(StorageError::FileTooLarge { .. }));
                prop_assert!(too_large);
            }
        }
    }
}
