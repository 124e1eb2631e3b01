//! Persisted client state: the authentication token slot.
//!
//! The only state this client persists is one bearer token, read on startup
//! to decide the initial route (feed vs. login) and attached to every
//! request. [`CredentialStore`] is the seam; [`JsonCredentialStore`] is the
//! file-backed default and [`MemoryCredentialStore`] the ephemeral one.

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::CredentialStore;
pub use json::JsonCredentialStore;
pub use memory::MemoryCredentialStore;
