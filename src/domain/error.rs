//! Error types for the artfeed client.
//!
//! This module defines the centralized error type [`ArtfeedError`] and a type
//! alias [`Result`] for convenient error handling throughout the crate. All
//! errors are implemented using the `thiserror` crate.
//!
//! # Taxonomy
//!
//! Failures from the backend fall into three families:
//!
//! - [`Network`](ArtfeedError::Network): the request never produced a
//!   response (DNS failure, refused connection, timeout).
//! - [`Server`](ArtfeedError::Server): the backend answered with a 4xx/5xx
//!   status; the message is extracted from the structured response body when
//!   one is present.
//! - [`Validation`](ArtfeedError::Validation): a field-level rejection (for
//!   example a handle that is already taken), surfaced inline near the
//!   offending field by callers.
//!
//! Access layers never swallow errors — they log and propagate. Controllers
//! decide per operation whether a failure is surfaced or absorbed.

use thiserror::Error;

/// The main error type for artfeed client operations.
#[derive(Debug, Error)]
pub enum ArtfeedError {
    /// The request failed at the transport level, with no server response.
    ///
    /// Maps to the user-facing "Network error" message.
    #[error("Network error: {0}")]
    Network(String),

    /// The server rejected the request with a structured error response.
    ///
    /// `message` holds the message extracted from the response body, falling
    /// back to the HTTP status text when the body is missing or unreadable.
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code of the rejection.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// A field-level validation rejection, e.g. a handle that is taken.
    #[error("Validation error on `{field}`: {message}")]
    Validation {
        /// Name of the offending field.
        field: String,
        /// Human-readable description of the rejection.
        message: String,
    },

    /// The credential store could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ArtfeedError {
    /// Classifies a server rejection body into `Validation` or `Server`.
    ///
    /// Bodies that name an offending field become [`ArtfeedError::Validation`];
    /// everything else is a plain [`ArtfeedError::Server`].
    #[must_use]
    pub fn from_rejection(status: u16, message: String, field: Option<String>) -> Self {
        match field {
            Some(field) => Self::Validation { field, message },
            None => Self::Server { status, message },
        }
    }

    /// True when retrying the same request could plausibly succeed.
    ///
    /// Transport failures and 5xx responses are transient; 4xx rejections and
    /// local failures are not. Only idempotent requests consult this.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ArtfeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// A specialized `Result` type for artfeed operations.
pub type Result<T> = std::result::Result<T, ArtfeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_with_field_becomes_validation() {
        let err =
            ArtfeedError::from_rejection(409, "handle already taken".into(), Some("handle".into()));
        assert!(matches!(err, ArtfeedError::Validation { ref field, .. } if field == "handle"));
    }

    #[test]
    fn rejection_without_field_becomes_server() {
        let err = ArtfeedError::from_rejection(500, "boom".into(), None);
        assert!(matches!(err, ArtfeedError::Server { status: 500, .. }));
    }

    #[test]
    fn transience_covers_transport_and_5xx_only() {
        assert!(ArtfeedError::Network("refused".into()).is_transient());
        assert!(ArtfeedError::Server { status: 503, message: "unavailable".into() }.is_transient());
        assert!(!ArtfeedError::Server { status: 404, message: "missing".into() }.is_transient());
        assert!(
            !ArtfeedError::Validation { field: "handle".into(), message: "taken".into() }
                .is_transient()
        );
    }
}
