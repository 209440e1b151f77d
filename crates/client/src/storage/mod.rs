//! Blob storage for avatars and document versions, through Apache OpenDAL.
//!
//! The same code talks to Supabase Storage (S3-compatible) in production and
//! a local directory in development:
//!
//! ```text
//! avatars/{user_id}/{file}                    <- profile pictures
//! documents/{document_id}/{version_id}/{file} <- one object per version
//! ```

mod error;
mod service;

pub use error::StorageError;
pub use service::{AVATAR_MIME_TYPES, BlobMetadata, BlobStore, sanitize_filename};
