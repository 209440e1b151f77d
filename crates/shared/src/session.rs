//! Wire types of the Supabase-style auth endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `grant_type=password` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordGrant {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// `grant_type=refresh_token` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshGrant {
    /// Refresh token from the previous session.
    pub refresh_token: String,
}

/// Signed-in user as reported by the auth server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUserInfo {
    /// Auth user ID (also the profile ID).
    pub id: Uuid,
    /// Email.
    pub email: String,
}

/// Successful token response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for API calls.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    /// Access token expiry as a Unix timestamp.
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// Single-use refresh token.
    pub refresh_token: String,
    /// Signed-in user.
    pub user: AuthUserInfo,
}
