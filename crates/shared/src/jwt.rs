//! Access-token claims, signing and inspection.
//!
//! The client only needs to read `sub` and `exp` out of a Supabase access
//! token ([`peek_claims`]); the stub backend signs and verifies its own
//! tokens with [`JwtService`].

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Audience Supabase puts on user access tokens.
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// User email.
    #[serde(default)]
    pub email: String,
    /// Database role, `authenticated` for signed-in users.
    #[serde(default)]
    pub role: String,
    /// Audience.
    #[serde(default)]
    pub aud: String,
    /// Issued at timestamp.
    #[serde(default)]
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, email: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id,
            email: email.to_string(),
            role: AUTHENTICATED_AUDIENCE.to_string(),
            aud: AUTHENTICATED_AUDIENCE.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Expiry as a timestamp. Out-of-range values clamp to the epoch.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// True when the token expires within `leeway` of `now`.
    #[must_use]
    pub fn expires_within(&self, now: DateTime<Utc>, leeway: Duration) -> bool {
        self.expires_at() <= now + leeway
    }
}

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

/// Signs and verifies HS256 access tokens.
#[derive(Clone)]
pub struct JwtService {
    expires_in: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expires_in", &self.expires_in)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Creates a new JWT service.
    #[must_use]
    pub fn new(secret: &str, expires_in_secs: i64) -> Self {
        Self {
            expires_in: Duration::seconds(expires_in_secs),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues an access token for a user.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<(String, Claims), JwtError> {
        let claims = Claims::new(user_id, email, Utc::now() + self.expires_in);
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;
        Ok((token, claims))
    }

    /// Lifetime of issued tokens in seconds.
    #[must_use]
    pub fn expires_in_secs(&self) -> i64 {
        self.expires_in.num_seconds()
    }

    /// Validates and decodes a token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired.
    /// Returns `JwtError::DecodingError` if the token is malformed or the signature is wrong.
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUTHENTICATED_AUDIENCE]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }
}

/// Reads claims from a token without verifying its signature or expiry.
///
/// Only the backend can verify a Supabase token; the client just needs
/// `exp` to decide when to refresh.
///
/// # Errors
///
/// Returns `JwtError::DecodingError` if the token is not a well-formed JWT.
pub fn peek_claims(token: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| JwtError::DecodingError(e.to_string()))
}
