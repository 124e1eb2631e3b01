//! Low-level HTTP client for the artfeed backend.
//!
//! [`ApiClient`] wraps the HTTP verbs the access layers need, attaches the
//! bearer token read from the [`CredentialStore`] on every request, and maps
//! transport and status failures into the crate error taxonomy. It knows
//! nothing about endpoints or payload shapes; those live in the typed access
//! layers ([`ContentClient`](crate::api::ContentClient) and friends).
//!
//! # Retry
//!
//! Idempotent GETs are retried a bounded number of times with exponential
//! backoff when the failure is transient (transport error or 5xx). POSTs are
//! never retried here; a caller that wants to resubmit a mutation does so
//! explicitly.

use crate::domain::error::{ArtfeedError, Result};
use crate::storage::CredentialStore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Structured error body the backend attaches to 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    /// Human-readable rejection message.
    message: Option<String>,

    /// Offending field for validation rejections.
    field: Option<String>,
}

/// Bounded-retry policy for idempotent requests.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt.
    pub attempts: u32,

    /// Backoff before the first retry; doubles on each subsequent one.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: 2, base_delay: Duration::from_millis(250) }
    }
}

/// HTTP client with bearer auth and error mapping.
///
/// Cheap to share behind an `Arc`; the credential store is read on every
/// request so a login or logout is picked up immediately.
pub struct ApiClient {
    /// Underlying connection pool.
    http: reqwest::Client,

    /// Backend origin, e.g. `http://192.168.65.36:3000`.
    base_url: String,

    /// Token slot read before every request.
    credentials: Arc<dyn CredentialStore>,

    /// Retry policy applied to GETs.
    retry: RetryPolicy,
}

impl ApiClient {
    /// Creates a client for the given backend origin.
    ///
    /// Trailing slashes on `base_url` are trimmed so paths can always start
    /// with `/`.
    #[must_use]
    pub fn new(base_url: &str, credentials: Arc<dyn CredentialStore>, retry: RetryPolicy) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            retry,
        }
    }

    /// The credential store this client reads from.
    #[must_use]
    pub fn credentials(&self) -> Arc<dyn CredentialStore> {
        Arc::clone(&self.credentials)
    }

    /// Issues a GET and decodes the JSON response, retrying transient failures.
    ///
    /// # Errors
    ///
    /// Returns the last error once the retry budget is exhausted, or the
    /// first non-transient error immediately.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut attempt: u32 = 0;
        loop {
            match self.get_once(path, query).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.retry.attempts => {
                    let delay = self.retry.base_delay * 2u32.saturating_pow(attempt);
                    attempt += 1;
                    tracing::debug!(
                        path = path,
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient GET failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    tracing::debug!(path = path, error = %err, "GET failed");
                    return Err(err);
                }
            }
        }
    }

    /// Issues a POST with a JSON body and decodes the JSON response.
    ///
    /// Single-attempt: POSTs are not assumed idempotent.
    ///
    /// # Errors
    ///
    /// Returns the mapped transport or server error.
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.authorized(self.http.post(self.url(path)))?.json(body);
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Issues a POST with a JSON body, ignoring any response body.
    ///
    /// # Errors
    ///
    /// Returns the mapped transport or server error.
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.authorized(self.http.post(self.url(path)))?.json(body);
        let response = request.send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Issues a bodyless POST, ignoring any response body.
    ///
    /// # Errors
    ///
    /// Returns the mapped transport or server error.
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        let request = self.authorized(self.http.post(self.url(path)))?;
        let response = request.send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// One GET attempt, no retry.
    async fn get_once<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let request = self.authorized(self.http.get(self.url(path)))?.query(query);
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Attaches the bearer token when one is stored.
    fn authorized(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        match self.credentials.token()? {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Ok(request),
        }
    }

    /// Joins a path onto the backend origin.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps non-2xx responses to [`ArtfeedError`].
    ///
    /// The body is parsed as the backend's structured rejection shape; a body
    /// that names a field becomes a `Validation` error, otherwise `Server`
    /// with the body message (or the status text when the body is opaque).
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let fallback = status.canonical_reason().unwrap_or("request failed").to_string();
        let text = response.text().await.unwrap_or_default();
        let body: Option<ErrorBody> = serde_json::from_str(&text).ok();

        let (message, field) = match body {
            Some(body) => (body.message.unwrap_or(fallback), body.field),
            None => (fallback, None),
        };

        Err(ArtfeedError::from_rejection(status.as_u16(), message, field))
    }
}
