//! Core domain types: models, pagination cursor, and errors.
//!
//! Everything here is plain data. The models mirror the backend's camelCase
//! wire format via serde and carry no behavior beyond display helpers;
//! network and state live in [`crate::api`] and [`crate::app`].

pub mod comment;
pub mod creation;
pub mod error;
pub mod page;
pub mod user;

pub use comment::{Comment, CommentAuthor};
pub use creation::{CreatedBy, Creation, CreationImage};
pub use error::{ArtfeedError, Result};
pub use page::PageCursor;
pub use user::{Handle, ProfileUpdate, ProfileUser, User, UserProfile};
