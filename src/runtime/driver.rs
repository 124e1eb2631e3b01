//! Async executor for controller effects.
//!
//! [`Driver`] is the only place real time and real I/O exist. It executes
//! [`Effect`]s — network requests through the access layers, debounce timers
//! as abortable tokio sleep tasks — and emits the outcomes as [`AppEvent`]s
//! on an unbounded channel for the event loop to feed back into the
//! controllers. Failures become failure events, never panics: the
//! controllers decide what a failure means.

use crate::api::{ContentClient, SearchClient};
use crate::app::{Effect, TimerHandle};
use crate::runtime::events::AppEvent;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Executes effects and emits their outcomes.
///
/// Cloneable; all clones feed the same event channel and share the same
/// timer table, so a timer scheduled through one clone can be cancelled
/// through another.
#[derive(Clone)]
pub struct Driver {
    content: ContentClient,
    search: SearchClient,
    events: mpsc::UnboundedSender<AppEvent>,
    timers: Arc<Mutex<HashMap<u64, AbortHandle>>>,
}

impl Driver {
    /// Creates a driver and the event channel the caller should drain.
    #[must_use]
    pub fn new(
        content: ContentClient,
        search: SearchClient,
    ) -> (Self, mpsc::UnboundedReceiver<AppEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let driver = Self { content, search, events, timers: Arc::new(Mutex::new(HashMap::new())) };
        (driver, receiver)
    }

    /// Executes one effect.
    ///
    /// Network effects run as spawned tasks so the event loop never blocks
    /// on the wire; timer effects manipulate the shared timer table.
    pub fn dispatch(&self, effect: Effect) {
        tracing::debug!(effect = ?effect, "dispatching effect");
        match effect {
            Effect::ScheduleDebounce { handle, delay } => self.schedule(handle, delay),
            Effect::CancelDebounce { handle } => self.cancel(handle),
            network => {
                let content = self.content.clone();
                let search = self.search.clone();
                let events = self.events.clone();
                tokio::spawn(async move {
                    let event = run_network(&content, &search, network).await;
                    if events.send(event).is_err() {
                        tracing::debug!("event receiver gone, dropping outcome");
                    }
                });
            }
        }
    }

    /// Executes a batch of effects in order.
    pub fn dispatch_all<I: IntoIterator<Item = Effect>>(&self, effects: I) {
        for effect in effects {
            self.dispatch(effect);
        }
    }

    /// Starts a debounce timer that fires once after `delay`.
    fn schedule(&self, handle: TimerHandle, delay: std::time::Duration) {
        let events = self.events.clone();
        let timers = Arc::clone(&self.timers);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Ok(mut timers) = timers.lock() {
                timers.remove(&handle.0);
            }
            let _ = events.send(AppEvent::DebounceFired { handle });
        });

        if let Ok(mut timers) = self.timers.lock() {
            timers.insert(handle.0, task.abort_handle());
        }
    }

    /// Aborts a pending debounce timer. Unknown handles already fired.
    fn cancel(&self, handle: TimerHandle) {
        if let Ok(mut timers) = self.timers.lock() {
            if let Some(task) = timers.remove(&handle.0) {
                task.abort();
            }
        }
    }
}

/// Runs one network effect to completion and wraps the outcome.
async fn run_network(content: &ContentClient, search: &SearchClient, effect: Effect) -> AppEvent {
    match effect {
        Effect::FetchPage { page, search: term, generation } => {
            match content.get_creations(page, term.as_deref()).await {
                Ok(page) => AppEvent::PageLoaded { generation, page },
                Err(e) => AppEvent::PageFailed { generation, message: e.to_string() },
            }
        }
        Effect::DispatchSearch { query, seq } => match search.search(&query).await {
            Ok(results) => AppEvent::SearchResolved { seq, results },
            Err(e) => AppEvent::SearchFailed { seq, message: e.to_string() },
        },
        Effect::SendLike { creation_id, generation } => {
            let ok = content.like_creation(&creation_id).await.is_ok();
            AppEvent::LikeSettled { creation_id, generation, ok }
        }
        Effect::FetchComments { creation_id, page } => {
            match content.get_comments(&creation_id, page).await {
                Ok(page) => AppEvent::CommentsLoaded { creation_id, page },
                Err(e) => AppEvent::CommentsFailed { creation_id, message: e.to_string() },
            }
        }
        Effect::SubmitComment { creation_id, text } => {
            match content.add_comment(&creation_id, &text).await {
                Ok(comment) => AppEvent::CommentPosted { creation_id, comment },
                Err(e) => AppEvent::CommentPostFailed { creation_id, message: e.to_string() },
            }
        }
        Effect::ScheduleDebounce { .. } | Effect::CancelDebounce { .. } => {
            unreachable!("timer effects are handled by the driver, not the network runner")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, RetryPolicy};
    use crate::storage::MemoryCredentialStore;
    use std::time::Duration;

    fn offline_driver() -> (Driver, mpsc::UnboundedReceiver<AppEvent>) {
        let api = Arc::new(ApiClient::new(
            "http://127.0.0.1:1",
            Arc::new(MemoryCredentialStore::new()),
            RetryPolicy { attempts: 0, base_delay: Duration::from_millis(1) },
        ));
        Driver::new(ContentClient::new(Arc::clone(&api)), SearchClient::new(api))
    }

    #[tokio::test(start_paused = true)]
    async fn scheduled_debounce_fires_after_quiet_period() {
        let (driver, mut events) = offline_driver();
        let handle = TimerHandle(7);

        driver.dispatch(Effect::ScheduleDebounce { handle, delay: Duration::from_millis(500) });
        tokio::time::advance(Duration::from_millis(501)).await;

        assert_eq!(events.recv().await, Some(AppEvent::DebounceFired { handle }));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_debounce_never_fires() {
        let (driver, mut events) = offline_driver();
        let handle = TimerHandle(7);

        driver.dispatch(Effect::ScheduleDebounce { handle, delay: Duration::from_millis(500) });
        driver.dispatch(Effect::CancelDebounce { handle });
        tokio::time::advance(Duration::from_millis(2_000)).await;

        assert!(events.try_recv().is_err(), "no event after cancel");
    }

    #[tokio::test]
    async fn failed_fetch_becomes_a_failure_event_with_generation() {
        let (driver, mut events) = offline_driver();

        driver.dispatch(Effect::FetchPage { page: 1, search: None, generation: 3 });

        match events.recv().await {
            Some(AppEvent::PageFailed { generation, .. }) => assert_eq!(generation, 3),
            other => panic!("expected PageFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_comment_fetch_resolves_offline() {
        let (driver, mut events) = offline_driver();

        driver.dispatch(Effect::FetchComments { creation_id: String::new(), page: 1 });

        match events.recv().await {
            Some(AppEvent::CommentsLoaded { page, .. }) => assert!(page.comments.is_empty()),
            other => panic!("expected CommentsLoaded, got {other:?}"),
        }
    }
}
