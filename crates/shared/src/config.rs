//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// REST API configuration.
    pub api: ApiConfig,
    /// Supabase project configuration (auth).
    pub supabase: SupabaseConfig,
    /// Blob storage configuration (avatars, documents).
    #[serde(default)]
    pub storage: Option<StorageSettings>,
    /// Local stub backend configuration.
    #[serde(default)]
    pub stub: StubConfig,
}

/// REST API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL the `/api/...` paths are appended to.
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Supabase project configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Public anon key sent as the `apikey` header.
    pub anon_key: String,
}

/// Blob storage provider.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProviderSettings {
    /// S3-compatible endpoint (Supabase Storage, R2, AWS S3).
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// Bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        #[serde(default = "default_region")]
        region: String,
    },
    /// Local filesystem (development only).
    LocalFs {
        /// Root directory.
        root: PathBuf,
    },
}

fn default_region() -> String {
    "us-east-1".to_string()
}

/// Blob storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Provider backing the operator.
    pub provider: StorageProviderSettings,
    /// Maximum upload size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Allowed MIME types for document uploads. Empty allows all.
    #[serde(default)]
    pub allowed_mime_types: Vec<String>,
    /// Base that object keys are appended to when building public URLs.
    /// Defaults to the provider location.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

/// Stub backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StubConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Secret used to sign issued access tokens.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_token_expiry")]
    pub access_token_expiry_secs: i64,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            jwt_secret: default_jwt_secret(),
            access_token_expiry_secs: default_token_expiry(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_jwt_secret() -> String {
    "stub-secret-change-me".to_string()
}

fn default_token_expiry() -> i64 {
    3600
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Layers `config/default`, `config/{RUN_MODE}` and `BUSINESSOS__*`
    /// environment variables, later sources winning.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BUSINESSOS").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
