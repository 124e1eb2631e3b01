//! Credential store abstraction.
//!
//! This module defines the [`CredentialStore`] trait that abstracts over the
//! persisted authentication token slot. Every outgoing request reads the
//! token through this seam, and login/logout write through it; the provider
//! is handed to the API client at construction rather than read from a
//! global.
//!
//! # Consistency
//!
//! The slot is single-writer, multiple-reader: implementations must make a
//! completed [`set_token`](CredentialStore::set_token) visible to every
//! subsequent [`token`](CredentialStore::token) call, including across
//! process restarts for persistent backends. Writes persist before they
//! return.

use crate::domain::Result;

/// Abstraction over the persisted authentication token slot.
///
/// Implementations take `&self` and manage their own interior locking so a
/// single store can be shared between the API client (reader) and the auth
/// client (writer).
pub trait CredentialStore: Send + Sync {
    /// Reads the current token, `None` when no user is signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing slot cannot be read.
    fn token(&self) -> Result<Option<String>>;

    /// Stores a new token, persisting it before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be persisted; the previous token
    /// remains in effect in that case.
    fn set_token(&self, token: &str) -> Result<()>;

    /// Clears the stored token (logout).
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be cleared.
    fn clear_token(&self) -> Result<()>;
}
