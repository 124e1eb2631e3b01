//! Debounced search overlay controller.
//!
//! [`SearchOverlayController`] owns the query text, the single pending
//! debounce timer, and the ephemeral result set shown in the overlay. It is
//! independent of the feed controller's accumulated list: closing the
//! overlay drops the results without disturbing the feed.
//!
//! # Debounce
//!
//! Keystrokes store the text immediately (for input echo) and schedule a
//! debounce timer with a fixed quiet period, cancelling the previous one, so
//! only the last keystroke inside the window dispatches a request. The timer
//! is an explicit [`ScheduleDebounce`](Effect::ScheduleDebounce) /
//! [`CancelDebounce`](Effect::CancelDebounce) pair executed by the runtime;
//! tests deliver [`on_debounce_fired`](SearchOverlayController::on_debounce_fired)
//! directly and never wait on real time.
//!
//! # Staleness
//!
//! Every dispatch carries a monotonic sequence number. A response whose
//! sequence is not the latest issued is discarded, so a slow response for an
//! old query can never overwrite a newer query's results.

use crate::api::SearchResults;
use crate::app::effects::{Effect, TimerHandle};
use std::time::Duration;

/// Quiet period between the last keystroke and the dispatch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// State machine for the search overlay.
#[derive(Debug)]
pub struct SearchOverlayController {
    /// Current query text, updated on every keystroke.
    query: String,

    /// The one pending debounce timer, if any.
    pending_timer: Option<TimerHandle>,

    /// Source of never-reused timer handles.
    next_timer: u64,

    /// Sequence number of the latest issued dispatch.
    latest_seq: u64,

    /// Results currently shown; `None` renders the empty overlay.
    results: Option<SearchResults>,

    /// Quiet period for the debounce timer.
    debounce: Duration,
}

impl SearchOverlayController {
    /// Creates a controller with the standard 500 ms quiet period.
    #[must_use]
    pub fn new() -> Self {
        Self::with_debounce(DEFAULT_DEBOUNCE)
    }

    /// Creates a controller with a custom quiet period.
    #[must_use]
    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            query: String::new(),
            pending_timer: None,
            next_timer: 0,
            latest_seq: 0,
            results: None,
            debounce,
        }
    }

    /// Records a keystroke.
    ///
    /// Stores the text immediately and reschedules the debounce timer.
    /// Trimmed-empty text clears the results synchronously and cancels any
    /// pending dispatch instead of scheduling one.
    pub fn on_query_change(&mut self, text: &str) -> Vec<Effect> {
        self.query = text.to_string();

        let mut effects = Vec::with_capacity(2);
        if let Some(handle) = self.pending_timer.take() {
            effects.push(Effect::CancelDebounce { handle });
        }

        if text.trim().is_empty() {
            tracing::debug!("query cleared");
            self.results = None;
            // Invalidate any dispatch still on the wire.
            self.latest_seq += 1;
            return effects;
        }

        let handle = TimerHandle(self.next_timer);
        self.next_timer += 1;
        self.pending_timer = Some(handle);
        effects.push(Effect::ScheduleDebounce { handle, delay: self.debounce });
        effects
    }

    /// Handles a fired debounce timer.
    ///
    /// Only the currently pending handle dispatches; anything else is a
    /// timer that was superseded after it fired and is ignored.
    pub fn on_debounce_fired(&mut self, handle: TimerHandle) -> Option<Effect> {
        if self.pending_timer != Some(handle) {
            tracing::debug!(handle = handle.0, "stale debounce fire ignored");
            return None;
        }

        self.pending_timer = None;
        self.latest_seq += 1;
        tracing::debug!(seq = self.latest_seq, "dispatching search");
        Some(Effect::DispatchSearch { query: self.query.clone(), seq: self.latest_seq })
    }

    /// Applies resolved search results.
    ///
    /// Discarded unless `seq` is the latest issued dispatch.
    pub fn on_results(&mut self, seq: u64, results: SearchResults) {
        if seq != self.latest_seq {
            tracing::debug!(stale = seq, current = self.latest_seq, "discarding stale results");
            return;
        }
        tracing::debug!(
            users = results.users.len(),
            creations = results.creations.len(),
            "results applied"
        );
        self.results = Some(results);
    }

    /// Records a failed dispatch; prior results stay on screen.
    pub fn on_search_failed(&mut self, seq: u64, message: &str) {
        tracing::debug!(seq = seq, error = %message, "search failed");
    }

    /// Tears the overlay down: cancels the pending timer, clears everything.
    ///
    /// Called on overlay close and on unmount.
    pub fn close(&mut self) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(1);
        if let Some(handle) = self.pending_timer.take() {
            effects.push(Effect::CancelDebounce { handle });
        }
        self.query.clear();
        self.results = None;
        self.latest_seq += 1;
        effects
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Results currently shown, if any.
    #[must_use]
    pub fn results(&self) -> Option<&SearchResults> {
        self.results.as_ref()
    }
}

impl Default for SearchOverlayController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Handle, User};
    use chrono::Utc;

    fn user(name: &str) -> User {
        User {
            id: format!("u-{name}"),
            name: name.into(),
            handles: vec![Handle { handle: name.into() }],
            profile_url: None,
            created_at: Utc::now(),
        }
    }

    fn results_for(name: &str) -> SearchResults {
        SearchResults { users: vec![user(name)], creations: vec![] }
    }

    fn scheduled_handle(effects: &[Effect]) -> TimerHandle {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::ScheduleDebounce { handle, .. } => Some(*handle),
                _ => None,
            })
            .expect("a debounce should have been scheduled")
    }

    #[test]
    fn five_keystrokes_dispatch_exactly_one_request_with_last_text() {
        let mut search = SearchOverlayController::new();

        let mut last = None;
        for text in ["c", "ca", "cat", "cats", "cats!"] {
            let effects = search.on_query_change(text);
            // Every keystroke after the first cancels the previous timer.
            last = Some(scheduled_handle(&effects));
        }

        // Earlier timers were cancelled; even if one fired late it is stale.
        assert_eq!(search.on_debounce_fired(TimerHandle(0)), None);
        assert_eq!(search.on_debounce_fired(TimerHandle(3)), None);

        let dispatch = search.on_debounce_fired(last.unwrap()).unwrap();
        assert_eq!(dispatch, Effect::DispatchSearch { query: "cats!".into(), seq: 1 });

        // The quiet window produced exactly one dispatch.
        assert_eq!(search.on_debounce_fired(last.unwrap()), None);
    }

    #[test]
    fn stale_response_never_overwrites_newer_results() {
        let mut search = SearchOverlayController::new();

        let effects = search.on_query_change("cat");
        let cat_dispatch = search.on_debounce_fired(scheduled_handle(&effects)).unwrap();
        let Effect::DispatchSearch { seq: cat_seq, .. } = cat_dispatch else { unreachable!() };

        let effects = search.on_query_change("dog");
        let dog_dispatch = search.on_debounce_fired(scheduled_handle(&effects)).unwrap();
        let Effect::DispatchSearch { seq: dog_seq, .. } = dog_dispatch else { unreachable!() };

        // "dog" resolves first, then "cat" limps in late.
        search.on_results(dog_seq, results_for("dog"));
        search.on_results(cat_seq, results_for("cat"));

        let shown = search.results().unwrap();
        assert_eq!(shown.users[0].name, "dog");
    }

    #[test]
    fn empty_query_clears_results_and_cancels_pending_dispatch() {
        let mut search = SearchOverlayController::new();

        let effects = search.on_query_change("cat");
        let handle = scheduled_handle(&effects);
        let dispatch = search.on_debounce_fired(handle).unwrap();
        let Effect::DispatchSearch { seq, .. } = dispatch else { unreachable!() };
        search.on_results(seq, results_for("cat"));
        assert!(search.results().is_some());

        let effects = search.on_query_change("   ");
        assert!(search.results().is_none(), "cleared synchronously");
        assert!(
            !effects.iter().any(|e| matches!(e, Effect::ScheduleDebounce { .. })),
            "no dispatch for a blank query"
        );

        // A response for the old query arriving after the clear is stale.
        search.on_results(seq, results_for("cat"));
        assert!(search.results().is_none());
    }

    #[test]
    fn keystroke_cancels_previous_timer() {
        let mut search = SearchOverlayController::new();

        let first = search.on_query_change("a");
        let first_handle = scheduled_handle(&first);

        let second = search.on_query_change("ab");
        assert!(second.contains(&Effect::CancelDebounce { handle: first_handle }));
    }

    #[test]
    fn failure_leaves_prior_results() {
        let mut search = SearchOverlayController::new();

        let effects = search.on_query_change("cat");
        let dispatch = search.on_debounce_fired(scheduled_handle(&effects)).unwrap();
        let Effect::DispatchSearch { seq, .. } = dispatch else { unreachable!() };
        search.on_results(seq, results_for("cat"));

        let effects = search.on_query_change("dog");
        let dispatch = search.on_debounce_fired(scheduled_handle(&effects)).unwrap();
        let Effect::DispatchSearch { seq, .. } = dispatch else { unreachable!() };
        search.on_search_failed(seq, "Network error: timed out");

        assert_eq!(search.results().unwrap().users[0].name, "cat");
    }

    #[test]
    fn close_cancels_timer_and_clears_state() {
        let mut search = SearchOverlayController::new();

        let effects = search.on_query_change("cat");
        let handle = scheduled_handle(&effects);

        let effects = search.close();
        assert!(effects.contains(&Effect::CancelDebounce { handle }));
        assert_eq!(search.query(), "");
        assert!(search.results().is_none());
        assert_eq!(search.on_debounce_fired(handle), None, "fired-after-close is stale");
    }
}
