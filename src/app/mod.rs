//! Application controllers: pure state machines over the feed, search
//! overlay, comment threads, and like toggles.
//!
//! Controllers never perform I/O. They mutate their own state in response to
//! user input and runtime events, and return [`Effect`]s describing the
//! network requests and timers they need; the [`runtime`](crate::runtime)
//! driver executes those and feeds outcomes back. Stale outcomes are
//! discarded by generation or sequence tags carried on every effect.

pub mod comments;
pub mod effects;
pub mod feed;
pub mod like;
pub mod search;

pub use comments::CommentThread;
pub use effects::{Effect, TimerHandle};
pub use feed::FeedController;
pub use like::LikeBook;
pub use search::{SearchOverlayController, DEFAULT_DEBOUNCE};
