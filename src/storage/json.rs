//! JSON file-based credential store.
//!
//! Persists the authentication token in a small human-readable JSON file,
//! using atomic file writes (write-to-temp + rename) so a crash mid-write
//! can never leave a corrupt or half-written credential file behind.

use crate::domain::error::{ArtfeedError, Result};
use crate::storage::backend::CredentialStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::RwLock;

/// On-disk container format.
///
/// Versioned so the layout can migrate without guessing; unknown future
/// fields are ignored on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// The bearer token, absent when no user is signed in.
    #[serde(default)]
    token: Option<String>,

    /// Unix timestamp of the last write, for debugging stale sessions.
    #[serde(default)]
    saved_at: Option<i64>,
}

impl Default for CredentialData {
    fn default() -> Self {
        Self { version: 1, token: None, saved_at: None }
    }
}

/// JSON file credential store.
///
/// The token is cached in memory behind an `RwLock`; reads never touch the
/// filesystem after construction, and writes persist through the lock before
/// returning, which gives the read-after-write consistency the API client
/// relies on.
#[derive(Debug)]
pub struct JsonCredentialStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory slot, loaded on creation.
    data: RwLock<CredentialData>,
}

impl JsonCredentialStore {
    /// Creates or opens a credential store at the given path.
    ///
    /// If the file exists, loads the stored token. Otherwise starts empty.
    /// Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but contains invalid JSON
    /// - File permissions prevent reading
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing credential store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no credential file, starting signed out");
            CredentialData::default()
        };

        tracing::debug!(signed_in = data.token.is_some(), "credential store initialized");

        Ok(Self { file_path, data: RwLock::new(data) })
    }

    /// Loads the credential container from a JSON file.
    fn load_from_file(path: &PathBuf) -> Result<CredentialData> {
        let contents = std::fs::read_to_string(path)?;
        let data: CredentialData = serde_json::from_str(&contents)
            .map_err(|e| ArtfeedError::Storage(format!("failed to parse credential file: {e}")))?;

        tracing::debug!(version = data.version, "loaded credential file");
        Ok(data)
    }

    /// Saves the container to disk using atomic write.
    ///
    /// Writes to a temporary file first, then atomically renames it onto the
    /// target path, so the file is never observable in a half-written state.
    fn save_to_file(&self, data: &CredentialData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| ArtfeedError::Storage(format!("failed to serialize credentials: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "credentials saved");
        Ok(())
    }

    /// Locks the slot for writing, converting a poisoned lock to an error.
    fn write_slot(&self) -> Result<std::sync::RwLockWriteGuard<'_, CredentialData>> {
        self.data
            .write()
            .map_err(|_| ArtfeedError::Storage("credential slot lock poisoned".to_string()))
    }
}

impl CredentialStore for JsonCredentialStore {
    fn token(&self) -> Result<Option<String>> {
        let data = self
            .data
            .read()
            .map_err(|_| ArtfeedError::Storage("credential slot lock poisoned".to_string()))?;
        Ok(data.token.clone())
    }

    fn set_token(&self, token: &str) -> Result<()> {
        let mut data = self.write_slot()?;

        let mut next = data.clone();
        next.token = Some(token.to_string());
        next.saved_at = Some(chrono::Utc::now().timestamp());

        // Persist first; the in-memory slot only changes once the file did.
        self.save_to_file(&next)?;
        *data = next;

        tracing::debug!("token stored");
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        let mut data = self.write_slot()?;

        let mut next = data.clone();
        next.token = None;
        next.saved_at = Some(chrono::Utc::now().timestamp());

        self.save_to_file(&next)?;
        *data = next;

        tracing::debug!("token cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_token_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let store = JsonCredentialStore::new(path.clone()).unwrap();
        assert_eq!(store.token().unwrap(), None);

        store.set_token("tok-123").unwrap();
        assert_eq!(store.token().unwrap(), Some("tok-123".to_string()));

        // A fresh store over the same file sees the persisted token.
        drop(store);
        let reopened = JsonCredentialStore::new(path).unwrap();
        assert_eq!(reopened.token().unwrap(), Some("tok-123".to_string()));
    }

    #[test]
    fn clear_token_signs_out_persistently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let store = JsonCredentialStore::new(path.clone()).unwrap();
        store.set_token("tok-123").unwrap();
        store.clear_token().unwrap();
        assert_eq!(store.token().unwrap(), None);

        let reopened = JsonCredentialStore::new(path).unwrap();
        assert_eq!(reopened.token().unwrap(), None);
    }

    #[test]
    fn write_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let store = JsonCredentialStore::new(path.clone()).unwrap();
        store.set_token("tok-123").unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_file_is_reported_as_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonCredentialStore::new(path).unwrap_err();
        assert!(matches!(err, ArtfeedError::Storage(_)));
    }
}
