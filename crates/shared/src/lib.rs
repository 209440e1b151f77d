//! Shared types, errors, and configuration for BusinessOS.
//!
//! This crate provides common types used across all other crates:
//! - Money types with decimal precision and display formatting
//! - Typed IDs for type-safe entity references
//! - Application-wide error taxonomy
//! - Access-token claims and auth wire types
//! - Configuration management

pub mod config;
pub mod error;
pub mod jwt;
pub mod session;
pub mod types;

pub use config::{
    ApiConfig, AppConfig, StorageProviderSettings, StorageSettings, StubConfig, SupabaseConfig,
};
pub use error::{AppError, AppResult, extract_detail};
pub use jwt::{Claims, JwtError, JwtService, peek_claims};
pub use session::{AuthUserInfo, PasswordGrant, RefreshGrant, TokenResponse};
