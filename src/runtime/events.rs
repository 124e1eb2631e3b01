//! Events flowing from the runtime back into the controllers.
//!
//! Each variant is the outcome of one [`Effect`](crate::app::Effect) and
//! echoes the generation or sequence tag the effect carried, so the
//! receiving controller can discard outcomes that are no longer current.

use crate::api::{CommentPage, CreationPage, SearchResults};
use crate::app::TimerHandle;
use crate::domain::Comment;

/// Outcome of an executed effect.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A feed page arrived.
    PageLoaded {
        /// Generation of the request that produced this page.
        generation: u64,
        /// The page itself.
        page: CreationPage,
    },

    /// A feed page fetch failed.
    PageFailed {
        /// Generation of the failed request.
        generation: u64,
        /// Human-readable failure message.
        message: String,
    },

    /// A search dispatch resolved.
    SearchResolved {
        /// Sequence number of the dispatch.
        seq: u64,
        /// Matching users and creations.
        results: SearchResults,
    },

    /// A search dispatch failed.
    SearchFailed {
        /// Sequence number of the failed dispatch.
        seq: u64,
        /// Human-readable failure message.
        message: String,
    },

    /// A debounce timer ran its full quiet period.
    DebounceFired {
        /// Handle of the timer that fired.
        handle: TimerHandle,
    },

    /// A like toggle settled.
    LikeSettled {
        /// The creation that was toggled.
        creation_id: String,
        /// Toggle generation the request carried.
        generation: u64,
        /// Whether the server accepted the toggle.
        ok: bool,
    },

    /// A comment page arrived.
    CommentsLoaded {
        /// The creation whose thread was fetched.
        creation_id: String,
        /// The page itself.
        page: CommentPage,
    },

    /// A comment page fetch failed.
    CommentsFailed {
        /// The creation whose thread was fetched.
        creation_id: String,
        /// Human-readable failure message.
        message: String,
    },

    /// A submitted comment was stored.
    CommentPosted {
        /// The creation that was commented on.
        creation_id: String,
        /// The stored comment, as returned by the server.
        comment: Comment,
    },

    /// A comment submission failed.
    CommentPostFailed {
        /// The creation that was commented on.
        creation_id: String,
        /// Human-readable failure message.
        message: String,
    },
}
