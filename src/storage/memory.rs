//! In-memory credential store.
//!
//! Holds the token in a process-local slot with no persistence. Used by
//! tests and by callers that manage their own session lifetime.

use crate::domain::error::{ArtfeedError, Result};
use crate::storage::backend::CredentialStore;
use std::sync::RwLock;

/// Credential store backed by a plain in-memory slot.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    /// Creates an empty, signed-out store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with a token.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { token: RwLock::new(Some(token.to_string())) }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn token(&self) -> Result<Option<String>> {
        let slot = self
            .token
            .read()
            .map_err(|_| ArtfeedError::Storage("credential slot lock poisoned".to_string()))?;
        Ok(slot.clone())
    }

    fn set_token(&self, token: &str) -> Result<()> {
        let mut slot = self
            .token
            .write()
            .map_err(|_| ArtfeedError::Storage("credential slot lock poisoned".to_string()))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        let mut slot = self
            .token
            .write()
            .map_err(|_| ArtfeedError::Storage("credential slot lock poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }
}
