//! Auth session.
//!
//! [`SupabaseAuth`] signs in with a password grant, keeps the returned
//! session in memory and swaps it for a fresh one through the refresh-token
//! grant once the access token is within [`REFRESH_LEEWAY_SECS`] of expiry.
//! Refresh tokens are single-use, so refreshes are serialized behind the
//! session lock.

use std::time::Duration as StdDuration;

use async_trait::async_trait;
use businessos_shared::{
    AppError, AppResult, AuthUserInfo, PasswordGrant, RefreshGrant, SupabaseConfig,
    TokenResponse, peek_claims,
};
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::http::{status_error, transport_error};

/// Refresh this many seconds before the access token expires.
pub const REFRESH_LEEWAY_SECS: i64 = 60;

/// Source of the bearer token attached to every API request.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Current access token.
    ///
    /// # Errors
    ///
    /// `AppError::NoActiveSession` when nobody is signed in; auth errors if
    /// a needed refresh fails.
    async fn access_token(&self) -> AppResult<String>;
}

/// Fixed token, for tools and tests that obtain a token elsewhere.
#[derive(Debug, Clone)]
pub struct StaticSession(Option<String>);

impl StaticSession {
    /// Always hands out `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// No session at all.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self(None)
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn access_token(&self) -> AppResult<String> {
        self.0.clone().ok_or(AppError::NoActiveSession)
    }
}

/// A signed-in session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Bearer token for API calls.
    pub access_token: String,
    /// Single-use token for the next refresh.
    pub refresh_token: String,
    /// When the access token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// Signed-in user.
    pub user: AuthUserInfo,
}

impl Session {
    /// Builds a session from a token response.
    ///
    /// Expiry comes from the JWT `exp` claim; the response's own
    /// `expires_at`/`expires_in` are fallbacks for opaque tokens.
    #[must_use]
    pub fn from_response(response: TokenResponse, now: DateTime<Utc>) -> Self {
        let expires_at = peek_claims(&response.access_token)
            .map(|claims| claims.expires_at())
            .ok()
            .or_else(|| {
                response
                    .expires_at
                    .and_then(|ts| DateTime::from_timestamp(ts, 0))
            })
            .unwrap_or_else(|| now + Duration::seconds(response.expires_in));
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at,
            user: response.user,
        }
    }

    /// True once the token is inside the refresh window.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now + Duration::seconds(REFRESH_LEEWAY_SECS)
    }
}

/// Supabase Auth client holding the current session.
pub struct SupabaseAuth {
    http: Client,
    url: String,
    anon_key: String,
    session: Mutex<Option<Session>>,
}

impl std::fmt::Debug for SupabaseAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseAuth")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl SupabaseAuth {
    /// Builds the auth client for a Supabase project.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the HTTP client cannot be constructed.
    pub fn new(config: &SupabaseConfig, timeout: StdDuration) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("HTTP client: {e}")))?;
        Ok(Self::with_client(http, &config.url, &config.anon_key))
    }

    /// Wraps an existing reqwest client.
    pub fn with_client(http: Client, url: &str, anon_key: &str) -> Self {
        Self {
            http,
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            session: Mutex::new(None),
        }
    }

    /// Signs in with email and password, replacing any current session.
    ///
    /// # Errors
    ///
    /// `AppError::Unauthorized` for rejected credentials, transport errors
    /// otherwise.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthUserInfo> {
        let grant = PasswordGrant {
            email: email.to_string(),
            password: password.to_string(),
        };
        let session = self.token_grant("password", &grant).await?;
        let user = session.user.clone();
        info!(email = %user.email, "signed in");
        *self.session.lock().await = Some(session);
        Ok(user)
    }

    /// Revokes the refresh tokens server-side and drops the local session.
    ///
    /// The local session is dropped even if the server call fails.
    ///
    /// # Errors
    ///
    /// `AppError::NoActiveSession` if nobody is signed in, or the logout
    /// call's error.
    pub async fn sign_out(&self) -> AppResult<()> {
        let session = self
            .session
            .lock()
            .await
            .take()
            .ok_or(AppError::NoActiveSession)?;
        let response = self
            .http
            .post(format!("{}/auth/v1/logout", self.url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            info!(email = %session.user.email, "signed out");
            return Ok(());
        }
        let body = response.bytes().await.map_err(transport_error)?;
        Err(auth_error(status, &body))
    }

    /// Forces a refresh-token exchange now.
    ///
    /// # Errors
    ///
    /// `AppError::NoActiveSession` if nobody is signed in; on a rejected
    /// refresh the session is dropped and the error returned.
    pub async fn refresh(&self) -> AppResult<()> {
        let mut guard = self.session.lock().await;
        let refresh_token = guard
            .as_ref()
            .map(|s| s.refresh_token.clone())
            .ok_or(AppError::NoActiveSession)?;
        *guard = Some(self.exchange_refresh(&mut guard, refresh_token).await?);
        Ok(())
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Option<Session> {
        self.session.lock().await.clone()
    }

    /// Signed-in user, if any.
    pub async fn current_user(&self) -> Option<AuthUserInfo> {
        self.session.lock().await.as_ref().map(|s| s.user.clone())
    }

    async fn exchange_refresh(
        &self,
        slot: &mut Option<Session>,
        refresh_token: String,
    ) -> AppResult<Session> {
        match self
            .token_grant("refresh_token", &RefreshGrant { refresh_token })
            .await
        {
            Ok(session) => {
                debug!(expires_at = %session.expires_at, "session refreshed");
                Ok(session)
            }
            Err(err) => {
                warn!(error = %err, "session refresh failed, signing out");
                *slot = None;
                Err(err)
            }
        }
    }

    async fn token_grant<G: Serialize + Sync>(
        &self,
        grant_type: &str,
        grant: &G,
    ) -> AppResult<Session> {
        let response = self
            .http
            .post(format!("{}/auth/v1/token", self.url))
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.anon_key)
            .json(grant)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(auth_error(status, &body));
        }
        let token: TokenResponse =
            serde_json::from_slice(&body).map_err(|e| AppError::Decode(e.to_string()))?;
        Ok(Session::from_response(token, Utc::now()))
    }
}

#[async_trait]
impl SessionProvider for SupabaseAuth {
    async fn access_token(&self) -> AppResult<String> {
        let mut guard = self.session.lock().await;
        let session = guard.as_ref().ok_or(AppError::NoActiveSession)?;
        if !session.needs_refresh(Utc::now()) {
            return Ok(session.access_token.clone());
        }
        debug!("access token near expiry");
        let refresh_token = session.refresh_token.clone();
        let fresh = self.exchange_refresh(&mut guard, refresh_token).await?;
        let token = fresh.access_token.clone();
        *guard = Some(fresh);
        Ok(token)
    }
}

/// The auth server answers bad credentials and dead refresh tokens with 400.
fn auth_error(status: StatusCode, body: &[u8]) -> AppError {
    match status_error(status, body) {
        AppError::Validation(detail) => AppError::Unauthorized(detail),
        other => other,
    }
}
