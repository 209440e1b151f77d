//! Blob storage errors.

use businessos_shared::AppError;
use thiserror::Error;

/// Failure of an avatar or document blob operation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Upload larger than the configured limit.
    #[error("upload of {size} bytes is over the {max} byte limit")]
    FileTooLarge {
        /// Upload size.
        size: u64,
        /// Configured limit.
        max: u64,
    },

    /// Content type outside the allow-list.
    #[error("uploads of type '{mime_type}' are not accepted")]
    InvalidMimeType {
        /// Rejected content type.
        mime_type: String,
    },

    /// No blob under the key.
    #[error("no stored file at {key}")]
    NotFound {
        /// Requested key.
        key: String,
    },

    /// Provider could not be set up.
    #[error("blob storage is misconfigured: {0}")]
    Configuration(String),

    /// Any other OpenDAL failure.
    #[error("blob storage failed: {0}")]
    Operation(String),
}

impl StorageError {
    /// Upload over `max` bytes.
    #[must_use]
    pub fn file_too_large(size: u64, max: u64) -> Self {
        Self::FileTooLarge { size, max }
    }

    /// Content type refused.
    #[must_use]
    pub fn invalid_mime_type(mime_type: impl Into<String>) -> Self {
        Self::InvalidMimeType {
            mime_type: mime_type.into(),
        }
    }

    /// Provider setup failure.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Maps an OpenDAL error on `key`.
    #[must_use]
    pub fn from_opendal(key: &str, err: &opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: key.to_string(),
            },
            _ => Self::Operation(err.to_string()),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::FileTooLarge { .. } | StorageError::InvalidMimeType { .. } => {
                Self::Validation(err.to_string())
            }
            StorageError::NotFound { .. } => Self::NotFound(err.to_string()),
            StorageError::Configuration(msg) => Self::Config(msg),
            StorageError::Operation(msg) => Self::Storage(msg),
        }
    }
}
