//! Effects emitted by the controllers for the runtime to execute.
//!
//! Controllers are pure state machines: they mutate their own state and
//! return [`Effect`] values describing the side effects they need — network
//! requests and debounce timers. The runtime driver executes effects and
//! feeds the outcomes back as [`AppEvent`](crate::runtime::AppEvent)s. This
//! boundary is what lets every ordering property be tested without timers or
//! a network.

use std::time::Duration;

/// Identity of one scheduled debounce timer.
///
/// Handles are issued by the controller that owns the timer and never
/// reused, so a fired handle that no longer matches the owner's pending
/// handle is recognizably stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// A side effect requested by a controller.
///
/// Every request-shaped effect carries the tag (generation or sequence
/// number) its response event must echo back, so the controller can discard
/// outcomes that no longer correspond to its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one page of feed creations.
    FetchPage {
        /// 1-based page number to request.
        page: u32,
        /// Search term filter; `None` for the unfiltered feed.
        search: Option<String>,
        /// Feed generation this request belongs to.
        generation: u64,
    },

    /// Run a combined user/creation search.
    DispatchSearch {
        /// The query text.
        query: String,
        /// Dispatch sequence number; only the latest wins.
        seq: u64,
    },

    /// Schedule a debounce timer.
    ScheduleDebounce {
        /// Handle the fired event must carry.
        handle: TimerHandle,
        /// Quiet period before firing.
        delay: Duration,
    },

    /// Cancel a previously scheduled debounce timer.
    ///
    /// Cancelling a timer that already fired is harmless; the stale handle
    /// is ignored when it comes back.
    CancelDebounce {
        /// Handle returned by the matching schedule.
        handle: TimerHandle,
    },

    /// Toggle the like state of a creation on the server.
    SendLike {
        /// The creation being toggled.
        creation_id: String,
        /// Toggle generation of the optimistic flip that caused this.
        generation: u64,
    },

    /// Fetch one page of comments for a creation.
    FetchComments {
        /// The creation whose thread is open.
        creation_id: String,
        /// 1-based page number to request.
        page: u32,
    },

    /// Post a comment on a creation.
    SubmitComment {
        /// The creation being commented on.
        creation_id: String,
        /// Comment text.
        text: String,
    },
}
