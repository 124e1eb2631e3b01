//! Paginated feed controller.
//!
//! [`FeedController`] owns the feed's pagination cursor, the accumulated
//! creation list, and the loading/refresh/error flags. It merges incremental
//! pages in request order and exposes the exact guard semantics the feed
//! screen relies on:
//!
//! - at most one page fetch is in flight at a time;
//! - `trigger_load_more` is a no-op while loading or when the server has
//!   announced no further pages;
//! - refresh (and a search-term change) replaces the list wholesale;
//! - a failed fetch leaves every prior item and the cursor untouched, and
//!   records the failure in `last_error` instead of surfacing retry UI.
//!
//! # Ordering
//!
//! Every request carries the feed's current **generation**. Any reset
//! (refresh, new search term) bumps the generation, so a slow response from
//! before the reset is recognizably stale and discarded on arrival.
//! Combined with the single-in-flight guard, pages are applied in exactly
//! the order they were requested.

use crate::api::CreationPage;
use crate::app::effects::Effect;
use crate::domain::{Creation, PageCursor};

/// The request currently on the wire, if any.
#[derive(Debug, Clone, Copy)]
struct InFlight {
    /// Generation the request was issued under.
    generation: u64,

    /// Whether the response replaces the accumulated list.
    replace: bool,
}

/// State machine for the incremental feed.
#[derive(Debug)]
pub struct FeedController {
    /// Accumulated creations, insertion order = server page order, no dedup.
    items: Vec<Creation>,

    /// Pagination position, synced from every successful response.
    cursor: PageCursor,

    /// The page fetch currently in flight.
    in_flight: Option<InFlight>,

    /// True from `trigger_refresh` until its response settles; drives the
    /// pull-to-refresh spinner, distinct from the load-more footer spinner.
    is_refreshing: bool,

    /// Search term the feed is filtered by; empty = unfiltered.
    search_term: String,

    /// Bumped on every reset; stale responses fail the comparison.
    generation: u64,

    /// Message of the most recent failed fetch, cleared on success.
    last_error: Option<String>,
}

impl FeedController {
    /// Creates an empty feed, as on screen mount.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: vec![],
            cursor: PageCursor::new(),
            in_flight: None,
            is_refreshing: false,
            search_term: String::new(),
            generation: 0,
            last_error: None,
        }
    }

    /// Issues the initial page-1 fetch.
    ///
    /// Called once after mount; the response replaces the (empty) list.
    pub fn initial_load(&mut self) -> Effect {
        self.fetch(1, true)
    }

    /// Requests the next page, if one exists and nothing is in flight.
    ///
    /// Returns `None` — guaranteeing no second request is issued — while a
    /// fetch is pending or when the cursor has no further page.
    pub fn trigger_load_more(&mut self) -> Option<Effect> {
        if self.in_flight.is_some() {
            tracing::debug!("load more ignored, fetch already in flight");
            return None;
        }
        let next = self.cursor.next_page()?;
        Some(self.fetch(next, false))
    }

    /// Resets to page 1 and refetches; the response replaces the list.
    pub fn trigger_refresh(&mut self) -> Effect {
        self.generation += 1;
        self.cursor.reset();
        self.is_refreshing = true;
        tracing::debug!(generation = self.generation, "refreshing feed");
        self.fetch(1, true)
    }

    /// Switches the feed to a new search term (empty = unfiltered).
    ///
    /// Resets the cursor and refetches page 1; items are replaced when the
    /// filtered page arrives, not before, so the old list stays visible while
    /// loading.
    pub fn set_search_term(&mut self, term: &str) -> Effect {
        self.search_term = term.trim().to_string();
        self.generation += 1;
        self.cursor.reset();
        tracing::debug!(generation = self.generation, "feed search term changed");
        self.fetch(1, true)
    }

    /// Applies a successful page response.
    ///
    /// A response whose generation is not current is discarded outright — it
    /// belongs to a feed state that no longer exists.
    pub fn on_page_loaded(&mut self, generation: u64, page: CreationPage) {
        if generation != self.generation {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "discarding stale page response"
            );
            return;
        }

        let Some(in_flight) = self.in_flight.take() else {
            tracing::debug!("page response with no fetch in flight, discarding");
            return;
        };

        if in_flight.replace {
            self.items = page.creations;
        } else {
            self.items.extend(page.creations);
        }

        self.cursor.sync(page.current_page, page.total_pages);
        self.is_refreshing = false;
        self.last_error = None;

        tracing::debug!(
            items = self.items.len(),
            page = page.current_page,
            total_pages = page.total_pages,
            has_more = self.cursor.has_more(),
            "page applied"
        );
    }

    /// Applies a failed page response.
    ///
    /// Prior items and the cursor are left untouched; the failure is only
    /// recorded in [`last_error`](Self::last_error). Stale failures are
    /// discarded like stale successes.
    pub fn on_page_failed(&mut self, generation: u64, message: String) {
        if generation != self.generation {
            tracing::debug!(stale = generation, "discarding stale page failure");
            return;
        }

        self.in_flight = None;
        self.is_refreshing = false;
        tracing::debug!(error = %message, "page fetch failed");
        self.last_error = Some(message);
    }

    /// Builds the fetch effect and records it as in flight.
    fn fetch(&mut self, page: u32, replace: bool) -> Effect {
        self.in_flight = Some(InFlight { generation: self.generation, replace });
        Effect::FetchPage {
            page,
            search: (!self.search_term.is_empty()).then(|| self.search_term.clone()),
            generation: self.generation,
        }
    }

    /// The accumulated creations, in server page order.
    #[must_use]
    pub fn items(&self) -> &[Creation] {
        &self.items
    }

    /// Whether the server has announced pages beyond the current one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.cursor.has_more()
    }

    /// Whether a page fetch is currently in flight.
    #[must_use]
    pub fn is_loading_page(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether a refresh is currently in flight.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.is_refreshing
    }

    /// The current search term; empty when the feed is unfiltered.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Message of the most recent failed fetch, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The pagination cursor.
    #[must_use]
    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }
}

impl Default for FeedController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreatedBy, CreationImage};
    use chrono::Utc;

    fn creation(id: &str) -> Creation {
        Creation {
            id: id.into(),
            created_at: Utc::now(),
            created_by: CreatedBy { id: "u".into(), name: "u".into(), profile_url: None },
            display_image: None,
            image: CreationImage {
                id: format!("img-{id}"),
                url: format!("https://img/{id}.png"),
                is_premium: false,
                prompt: String::new(),
            },
            is_liked: false,
        }
    }

    fn page(ids: &[&str], current: u32, total: u32) -> CreationPage {
        CreationPage {
            creations: ids.iter().map(|id| creation(id)).collect(),
            current_page: current,
            total_creations: 0,
            total_pages: total,
        }
    }

    fn generation_of(effect: &Effect) -> u64 {
        match effect {
            Effect::FetchPage { generation, .. } => *generation,
            other => panic!("expected FetchPage, got {other:?}"),
        }
    }

    #[test]
    fn pages_accumulate_without_loss_or_dedup() {
        let mut feed = FeedController::new();

        let gen = generation_of(&feed.initial_load());
        feed.on_page_loaded(gen, page(&["a", "b"], 1, 3));
        assert_eq!(feed.items().len(), 2);
        assert!(feed.has_more());

        let gen = generation_of(&feed.trigger_load_more().unwrap());
        feed.on_page_loaded(gen, page(&["c", "b"], 2, 3));
        assert_eq!(feed.items().len(), 4, "repeated ids are kept as-is");

        let gen = generation_of(&feed.trigger_load_more().unwrap());
        feed.on_page_loaded(gen, page(&["d"], 3, 3));
        assert_eq!(feed.items().len(), 5);
        assert!(!feed.has_more());
        assert!(feed.trigger_load_more().is_none(), "no page beyond the last");
    }

    #[test]
    fn load_more_is_noop_while_loading_or_exhausted() {
        let mut feed = FeedController::new();

        let gen = generation_of(&feed.initial_load());
        assert!(feed.is_loading_page());
        assert!(feed.trigger_load_more().is_none(), "no second request while pending");

        feed.on_page_loaded(gen, page(&["a"], 1, 1));
        assert!(!feed.has_more());
        assert!(feed.trigger_load_more().is_none(), "no request when has_more is false");
    }

    #[test]
    fn refresh_resets_to_page_one_and_replaces() {
        let mut feed = FeedController::new();

        let gen = generation_of(&feed.initial_load());
        feed.on_page_loaded(gen, page(&["a", "b"], 1, 2));
        let gen = generation_of(&feed.trigger_load_more().unwrap());
        feed.on_page_loaded(gen, page(&["c"], 2, 2));
        assert_eq!(feed.items().len(), 3);

        let effect = feed.trigger_refresh();
        assert!(matches!(effect, Effect::FetchPage { page: 1, .. }));
        assert!(feed.is_refreshing());

        feed.on_page_loaded(generation_of(&effect), page(&["x"], 1, 2));
        assert_eq!(feed.items().len(), 1, "refresh replaces, never appends");
        assert_eq!(feed.items()[0].id, "x");
        assert!(!feed.is_refreshing());
    }

    #[test]
    fn stale_response_after_refresh_is_discarded() {
        let mut feed = FeedController::new();

        let gen = generation_of(&feed.initial_load());
        feed.on_page_loaded(gen, page(&["a"], 1, 3));
        let old_gen = generation_of(&feed.trigger_load_more().unwrap());

        // Refresh before the load-more resolves.
        let refresh = feed.trigger_refresh();
        let new_gen = generation_of(&refresh);
        assert_ne!(old_gen, new_gen);

        // The old page 2 arrives late: nothing changes.
        feed.on_page_loaded(old_gen, page(&["b", "c"], 2, 3));
        assert_eq!(feed.items().len(), 1);
        assert!(feed.is_loading_page(), "refresh fetch is still pending");

        feed.on_page_loaded(new_gen, page(&["fresh"], 1, 1));
        assert_eq!(feed.items().len(), 1);
        assert_eq!(feed.items()[0].id, "fresh");
    }

    #[test]
    fn failure_leaves_prior_state_and_records_error() {
        let mut feed = FeedController::new();

        let gen = generation_of(&feed.initial_load());
        feed.on_page_loaded(gen, page(&["a"], 1, 3));
        let before = feed.cursor();

        let gen = generation_of(&feed.trigger_load_more().unwrap());
        feed.on_page_failed(gen, "Network error: timed out".into());

        assert_eq!(feed.items().len(), 1);
        assert_eq!(feed.cursor(), before, "cursor only moves on success");
        assert!(!feed.is_loading_page());
        assert_eq!(feed.last_error(), Some("Network error: timed out"));

        // A later success clears the error.
        let gen = generation_of(&feed.trigger_load_more().unwrap());
        feed.on_page_loaded(gen, page(&["b"], 2, 3));
        assert!(feed.last_error().is_none());
    }

    #[test]
    fn search_term_change_resets_and_filters_requests() {
        let mut feed = FeedController::new();

        let gen = generation_of(&feed.initial_load());
        feed.on_page_loaded(gen, page(&["a", "b"], 1, 2));

        let effect = feed.set_search_term("  foxes ");
        let Effect::FetchPage { page: p, search, generation } = effect else {
            panic!("expected FetchPage");
        };
        assert_eq!(p, 1);
        assert_eq!(search.as_deref(), Some("foxes"));

        // Old items stay visible until the filtered page lands.
        assert_eq!(feed.items().len(), 2);
        feed.on_page_loaded(generation, page(&["f1"], 1, 1));
        assert_eq!(feed.items().len(), 1);

        // Clearing the term goes back to the unfiltered feed.
        let effect = feed.set_search_term("");
        assert!(matches!(effect, Effect::FetchPage { search: None, .. }));
    }
}
