//! artfeed: a client library for an AI-image social feed.
//!
//! artfeed is the client side of a social-media backend for AI image
//! generation. It provides:
//! - A typed, bearer-token-authenticated API client for the backend REST API
//! - Pure controllers for the paginated feed, debounced search overlay,
//!   comment threads, and optimistic like toggling
//! - A tokio-based driver that executes controller effects and feeds
//!   outcomes back as events
//! - Persistent credentials backed by JSON file storage with atomic writes
//!
//! # Architecture
//!
//! The crate follows a unidirectional event/effect architecture:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI Shim (main.rs)                                 │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Controllers (app/)                                 │  ← State machines
//! │  - Feed pagination / refresh                        │  ← Pure, no I/O
//! │  - Debounced search overlay                         │
//! │  - Comment threads, optimistic likes                │
//! └─────────────────────────────────────────────────────┘
//!         │ effects                         ▲ events
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← Only real time
//! │  - Effect execution, debounce timers                │    and I/O
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌───────────────┐
//! │ API Layer     │   │ Storage Layer │
//! │ (api/)        │   │ (storage/)    │
//! │ - HTTP verbs  │   │ - Token slot  │
//! │ - Retry       │   │ - Atomic JSON │
//! │ - Error map   │   │ - Trait seam  │
//! └───────────────┘   └───────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Models, page cursor, error taxonomy              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: feed/search/comment/like controllers and their effect protocol
//! - [`api`]: HTTP client and typed access layers
//! - [`domain`]: core domain types (models, cursor, errors)
//! - [`storage`]: persisted credential slot
//! - [`runtime`]: async effect driver and event protocol
//! - `observability`: tracing initialization
//!
//! # Key Design Decisions
//!
//! ## Controllers Emit Effects
//!
//! Controllers never touch the network or a clock. They return [`Effect`]
//! values (fetch this page, schedule this timer) and consume
//! [`AppEvent`](runtime::AppEvent)s; the driver is the only place real time
//! and I/O exist. Every ordering property — single in-flight page fetch,
//! last-issued-wins search, optimistic like reverts — is therefore testable
//! with plain synchronous code.
//!
//! ## Staleness by Tagging
//!
//! Every request-shaped effect carries a generation or sequence tag that its
//! outcome echoes back. Resets bump the tag, so slow responses from a state
//! that no longer exists are recognized and discarded instead of corrupting
//! newer state.
//!
//! ## Explicit Credential Provider
//!
//! Every outgoing request reads the token from a [`CredentialStore`] handed
//! to the API client at construction; login/logout write through the same
//! seam and persist before returning. No global token slot.

pub mod api;
pub mod app;
pub mod domain;
pub mod runtime;
pub mod storage;

pub mod observability;

pub use api::{ApiClient, AuthClient, ContentClient, RetryPolicy, SearchClient};
pub use app::{CommentThread, Effect, FeedController, LikeBook, SearchOverlayController};
pub use domain::{ArtfeedError, Creation, PageCursor, Result};
pub use runtime::{AppEvent, Driver};
pub use storage::{CredentialStore, JsonCredentialStore, MemoryCredentialStore};

use serde::Deserialize;
use std::time::Duration;

/// Environment variable naming the optional config file.
const CONFIG_PATH_VAR: &str = "ARTFEED_CONFIG";

/// Client configuration.
///
/// Resolution order: built-in defaults, then an optional TOML file, then
/// environment overrides. Unparseable values fall back rather than fail;
/// only an unreadable config file is an error.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin, e.g. `http://192.168.65.36:3000`.
    pub base_url: String,

    /// Search debounce quiet period in milliseconds. Default: 500
    pub debounce_ms: u64,

    /// Retries after the initial attempt for idempotent GETs. Default: 2
    pub retry_attempts: u32,

    /// Backoff before the first retry, doubling per retry. Default: 250 ms
    pub retry_base_delay_ms: u64,

    /// Path of the persisted credential file.
    ///
    /// `None` leaves the choice to the application; the bundled binary falls
    /// back to a per-user data path, library users typically pass an explicit
    /// [`CredentialStore`].
    pub credentials_path: Option<String>,

    /// Tracing filter directive, e.g. `"info"` or
    /// `"info,artfeed::api=debug"`. Default: `"info"`
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            debounce_ms: 500,
            retry_attempts: 2,
            retry_base_delay_ms: 250,
            credentials_path: None,
            log_level: None,
        }
    }
}

/// TOML file shape: every field optional, merged over the defaults.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    debounce_ms: Option<u64>,
    retry_attempts: Option<u32>,
    retry_base_delay_ms: Option<u64>,
    credentials_path: Option<String>,
    log_level: Option<String>,
}

impl Config {
    /// Loads configuration: defaults, then the file named by
    /// `ARTFEED_CONFIG` (when set), then `ARTFEED_*` env overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the named config file cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_env_pairs(std::env::vars());
        Ok(config)
    }

    /// Loads configuration from a TOML file merged over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses TOML configuration merged over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(contents)
            .map_err(|e| ArtfeedError::Config(format!("invalid config file: {e}")))?;

        let defaults = Self::default();
        Ok(Self {
            base_url: file.base_url.unwrap_or(defaults.base_url),
            debounce_ms: file.debounce_ms.unwrap_or(defaults.debounce_ms),
            retry_attempts: file.retry_attempts.unwrap_or(defaults.retry_attempts),
            retry_base_delay_ms: file
                .retry_base_delay_ms
                .unwrap_or(defaults.retry_base_delay_ms),
            credentials_path: file.credentials_path,
            log_level: file.log_level,
        })
    }

    /// Applies `ARTFEED_*` overrides from an environment-shaped iterator.
    ///
    /// Unparseable numeric values are ignored, keeping the prior value.
    fn apply_env_pairs<I: IntoIterator<Item = (String, String)>>(&mut self, vars: I) {
        for (key, value) in vars {
            match key.as_str() {
                "ARTFEED_BASE_URL" => self.base_url = value,
                "ARTFEED_DEBOUNCE_MS" => {
                    if let Ok(parsed) = value.parse() {
                        self.debounce_ms = parsed;
                    }
                }
                "ARTFEED_RETRY_ATTEMPTS" => {
                    if let Ok(parsed) = value.parse() {
                        self.retry_attempts = parsed;
                    }
                }
                "ARTFEED_RETRY_BASE_DELAY_MS" => {
                    if let Ok(parsed) = value.parse() {
                        self.retry_base_delay_ms = parsed;
                    }
                }
                "ARTFEED_CREDENTIALS_PATH" => self.credentials_path = Some(value),
                "ARTFEED_LOG_LEVEL" => self.log_level = Some(value),
                _ => {}
            }
        }
    }

    /// The retry policy for the API client.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.retry_attempts,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
        }
    }

    /// The search debounce quiet period.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.retry_attempts, 2);
        assert!(config.credentials_path.is_none());
    }

    #[test]
    fn toml_merges_over_defaults() {
        let config = Config::from_toml(
            r#"
            base_url = "http://10.0.0.5:3000"
            debounce_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://10.0.0.5:3000");
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.retry_attempts, 2, "unset fields keep defaults");
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = Config::from_toml("base_url = [").unwrap_err();
        assert!(matches!(err, ArtfeedError::Config(_)));
    }

    #[test]
    fn env_overrides_win_and_ignore_garbage() {
        let mut config = Config::default();
        config.apply_env_pairs(vec![
            ("ARTFEED_BASE_URL".to_string(), "http://box:4000".to_string()),
            ("ARTFEED_DEBOUNCE_MS".to_string(), "750".to_string()),
            ("ARTFEED_RETRY_ATTEMPTS".to_string(), "many".to_string()),
            ("UNRELATED".to_string(), "x".to_string()),
        ]);
        assert_eq!(config.base_url, "http://box:4000");
        assert_eq!(config.debounce_ms, 750);
        assert_eq!(config.retry_attempts, 2, "garbage numeric override ignored");
    }
}
