//! Bearer-authenticated JSON transport.
//!
//! Every request fetches a token from the [`SessionProvider`] first, so a
//! missing session fails with [`AppError::NoActiveSession`] before anything
//! touches the network. Non-2xx responses become typed errors carrying the
//! body's `detail`. Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use businessos_shared::{ApiConfig, AppError, AppResult, extract_detail};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::session::SessionProvider;

/// JSON client for the `/api/...` routes.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Arc<str>,
    session: Arc<dyn SessionProvider>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Builds a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig, session: Arc<dyn SessionProvider>) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("HTTP client: {e}")))?;
        Ok(Self::with_client(http, &config.base_url, session))
    }

    /// Wraps an existing reqwest client.
    pub fn with_client(http: Client, base_url: &str, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            session,
        }
    }

    /// Absolute URL for an `/api/...` path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET and decode.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let body = self.execute(Method::GET, path, None::<&()>).await?;
        decode(&body)
    }

    /// POST a JSON body and decode the response.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.execute(Method::POST, path, Some(body)).await?;
        decode(&body)
    }

    /// POST without a body and decode the response.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let body = self.execute(Method::POST, path, None::<&()>).await?;
        decode(&body)
    }

    /// PUT a JSON body and decode the response.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.execute(Method::PUT, path, Some(body)).await?;
        decode(&body)
    }

    /// PUT a JSON body, ignoring any response body.
    pub async fn put_no_content<B>(&self, path: &str, body: &B) -> AppResult<()>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.execute(Method::PUT, path, Some(body)).await.map(drop)
    }

    /// DELETE, ignoring any response body.
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        self.execute(Method::DELETE, path, None::<&()>)
            .await
            .map(drop)
    }

    async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> AppResult<Vec<u8>>
    where
        B: Serialize + Sync + ?Sized,
    {
        let token = self.session.access_token().await?;
        let url = self.url(path);
        debug!(%method, %url, "api request");

        let mut request = self.http.request(method.clone(), &url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;
        if !status.is_success() {
            let err = status_error(status, &bytes);
            warn!(%method, %url, status = status.as_u16(), error = %err, "api request failed");
            return Err(err);
        }
        Ok(bytes.to_vec())
    }
}

/// Maps a non-2xx response to an error, preferring the body's message over
/// the reason phrase.
pub(crate) fn status_error(status: StatusCode, body: &[u8]) -> AppError {
    let detail = extract_detail(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    });
    AppError::from_status(status.as_u16(), detail)
}

pub(crate) fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_decode() {
        AppError::Decode(err.to_string())
    } else {
        AppError::Network(err.to_string())
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|e| AppError::Decode(e.to_string()))
}
