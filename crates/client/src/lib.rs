//! HTTP side of BusinessOS.
//!
//! This crate provides:
//! - [`ApiClient`], the bearer-authenticated JSON transport
//! - One service per REST resource group, each implementing a port from
//!   `businessos_core::ports`
//! - [`SupabaseAuth`], the password/refresh-token session
//! - [`BlobStore`], OpenDAL-backed avatar and document storage

pub mod http;
pub mod services;
pub mod session;
pub mod storage;

pub use http::ApiClient;
pub use services::Services;
pub use session::{Session, SessionProvider, StaticSession, SupabaseAuth};
pub use storage::{BlobMetadata, BlobStore, StorageError};
