//! Authentication and profile access.
//!
//! Login and signup persist the returned token through the
//! [`CredentialStore`] before they return, so every request issued after a
//! successful call reads the new token — the store is the single writer
//! slot, not an ad-hoc global.

use crate::api::client::ApiClient;
use crate::domain::error::Result;
use crate::domain::{ProfileUpdate, UserProfile};
use crate::storage::CredentialStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Account summary returned alongside a fresh token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Display name.
    pub name: String,

    /// Account email.
    pub email: String,
}

/// A successful login or signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent requests.
    pub token: String,

    /// The signed-in account.
    pub user: AuthUser,
}

/// Body for the login endpoint.
#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Body for the signup endpoint.
#[derive(Debug, Serialize)]
struct SignupBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Typed access to the auth endpoints.
#[derive(Clone)]
pub struct AuthClient {
    api: Arc<ApiClient>,
    credentials: Arc<dyn CredentialStore>,
}

impl AuthClient {
    /// Wraps an [`ApiClient`], writing tokens through its credential store.
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        let credentials = api.credentials();
        Self { api, credentials }
    }

    /// Signs in with email and password.
    ///
    /// The token is persisted before this returns.
    ///
    /// # Errors
    ///
    /// Auth rejections surface as `Server`/`Validation` errors; these are
    /// shown to the user in the login UI's error slot.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let _span = tracing::debug_span!("login").entered();

        let session: AuthSession =
            self.api.post_json("/api/auth/login", &LoginBody { email, password }).await?;
        self.credentials.set_token(&session.token)?;

        tracing::debug!(user = %session.user.name, "signed in");
        Ok(session)
    }

    /// Creates an account and signs in.
    ///
    /// The token is persisted before this returns.
    ///
    /// # Errors
    ///
    /// Field-level rejections (e.g. email already registered) come back as
    /// `Validation` errors and are surfaced inline.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<AuthSession> {
        let _span = tracing::debug_span!("signup").entered();

        let session: AuthSession =
            self.api.post_json("/api/auth/signup", &SignupBody { name, email, password }).await?;
        self.credentials.set_token(&session.token)?;

        tracing::debug!(user = %session.user.name, "account created");
        Ok(session)
    }

    /// Signs out by clearing the persisted token.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential slot cannot be cleared.
    pub fn logout(&self) -> Result<()> {
        self.credentials.clear_token()?;
        tracing::debug!("signed out");
        Ok(())
    }

    /// Whether a token is currently stored.
    ///
    /// Read on app start to decide the initial route (feed vs. login).
    ///
    /// # Errors
    ///
    /// Returns an error if the credential slot cannot be read.
    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.credentials.token()?.is_some())
    }

    /// Fetches the authenticated user's profile and their creations.
    ///
    /// # Errors
    ///
    /// Propagates the mapped transport or server error.
    pub async fn profile(&self) -> Result<UserProfile> {
        let _span = tracing::debug_span!("profile").entered();
        self.api.get_json("/api/auth/profile", &[]).await
    }

    /// Updates display name, handle, and avatar.
    ///
    /// # Errors
    ///
    /// A taken handle comes back as a `Validation` error naming the
    /// `handle` field, surfaced inline near the input.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
        let _span = tracing::debug_span!("update_profile").entered();
        self.api.post_unit("/api/auth/update-profile", update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::RetryPolicy;
    use crate::storage::MemoryCredentialStore;

    #[test]
    fn is_authenticated_reflects_stored_token() {
        let store = Arc::new(MemoryCredentialStore::with_token("tok"));
        let api = Arc::new(ApiClient::new("http://127.0.0.1:1", store, RetryPolicy::default()));
        let auth = AuthClient::new(api);

        assert!(auth.is_authenticated().unwrap());
        auth.logout().unwrap();
        assert!(!auth.is_authenticated().unwrap());
    }
}
