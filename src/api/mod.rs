//! HTTP access to the artfeed backend.
//!
//! [`ApiClient`] owns the transport concerns (bearer auth, error mapping,
//! bounded GET retry); the typed clients own endpoint paths and payload
//! shapes. All of them are explicitly constructed and shared via `Arc` from
//! the application's composition root — there are no process-wide
//! singletons.

pub mod auth;
pub mod client;
pub mod content;
pub mod search;

pub use auth::{AuthClient, AuthSession, AuthUser};
pub use client::{ApiClient, RetryPolicy};
pub use content::{CommentPage, ContentClient, CreationPage, NewCreation};
pub use search::{SearchClient, SearchResults};
