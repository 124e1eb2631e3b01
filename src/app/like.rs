//! Optimistic like state machine.
//!
//! The server owns the final like state of every creation; the client flips
//! a local boolean immediately so the heart responds to the tap, then sends
//! the toggle and reverts only if the request fails. [`LikeBook`] models
//! this explicitly per creation:
//!
//! ```text
//! Unliked --(optimistic)--> Liked --(confirmed)--> Liked
//! Liked --(optimistic)--> Unliked --(confirmed)--> Unliked
//! ```
//!
//! Each flip bumps a per-creation **toggle generation**. A failure reverts
//! the flip only while its generation is still current, so a failure
//! arriving after the user toggled again never clobbers the newer optimistic
//! state.

use crate::app::effects::Effect;
use std::collections::HashMap;

/// Local optimistic overlay for one creation.
#[derive(Debug, Clone, Copy)]
struct LikeState {
    /// The optimistic like value currently shown.
    liked: bool,

    /// Generation of the most recent flip.
    generation: u64,
}

/// Per-creation optimistic like overlay.
///
/// Server snapshots ([`Creation::is_liked`](crate::domain::Creation)) stay
/// read-only; this book layers local toggles on top and is consulted at
/// render time via [`is_liked`](Self::is_liked).
#[derive(Debug, Default)]
pub struct LikeBook {
    states: HashMap<String, LikeState>,
}

impl LikeBook {
    /// Creates an empty book with no local overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The like state to render: the local override, else the server value.
    #[must_use]
    pub fn is_liked(&self, creation_id: &str, server_liked: bool) -> bool {
        self.states.get(creation_id).map_or(server_liked, |s| s.liked)
    }

    /// Flips the like state optimistically and emits the server toggle.
    ///
    /// The flip is visible immediately through [`is_liked`](Self::is_liked).
    pub fn toggle(&mut self, creation_id: &str, server_liked: bool) -> Effect {
        let current = self.is_liked(creation_id, server_liked);
        let state = self
            .states
            .entry(creation_id.to_string())
            .or_insert(LikeState { liked: server_liked, generation: 0 });
        state.liked = !current;
        state.generation += 1;

        tracing::debug!(
            creation_id = %creation_id,
            liked = state.liked,
            generation = state.generation,
            "optimistic like flip"
        );

        Effect::SendLike { creation_id: creation_id.to_string(), generation: state.generation }
    }

    /// Double-tap entry: likes, never unlikes.
    ///
    /// Returns `None` when the creation is already liked, so a double tap on
    /// a liked image is inert.
    pub fn double_tap(&mut self, creation_id: &str, server_liked: bool) -> Option<Effect> {
        if self.is_liked(creation_id, server_liked) {
            tracing::debug!(creation_id = %creation_id, "double tap on liked creation ignored");
            return None;
        }
        Some(self.toggle(creation_id, server_liked))
    }

    /// Settles a toggle request.
    ///
    /// On success the server now agrees with the optimistic value and there
    /// is nothing to do. On failure the flip is reverted — but only if no
    /// newer flip happened while the request was pending.
    pub fn on_settled(&mut self, creation_id: &str, generation: u64, ok: bool) {
        if ok {
            tracing::debug!(creation_id = %creation_id, generation = generation, "like confirmed");
            return;
        }

        let Some(state) = self.states.get_mut(creation_id) else {
            return;
        };
        if state.generation != generation {
            tracing::debug!(
                creation_id = %creation_id,
                stale = generation,
                current = state.generation,
                "stale like failure ignored"
            );
            return;
        }

        state.liked = !state.liked;
        tracing::debug!(creation_id = %creation_id, reverted_to = state.liked, "like reverted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generation_of(effect: &Effect) -> u64 {
        match effect {
            Effect::SendLike { generation, .. } => *generation,
            other => panic!("expected SendLike, got {other:?}"),
        }
    }

    #[test]
    fn optimistic_flip_is_immediately_visible() {
        let mut likes = LikeBook::new();
        assert!(!likes.is_liked("c1", false));

        likes.toggle("c1", false);
        assert!(likes.is_liked("c1", false));
    }

    #[test]
    fn failure_reverts_to_pre_optimistic_state() {
        let mut likes = LikeBook::new();

        let effect = likes.toggle("c1", false);
        assert!(likes.is_liked("c1", false));

        likes.on_settled("c1", generation_of(&effect), false);
        assert!(!likes.is_liked("c1", false), "reverted to unliked");
    }

    #[test]
    fn second_toggle_during_pending_request_is_not_dropped() {
        let mut likes = LikeBook::new();

        let first = likes.toggle("c1", false);
        // User toggles again before the first request settles.
        let second = likes.toggle("c1", false);
        assert!(!likes.is_liked("c1", false));

        // The first request's failure arrives late: the newer flip wins.
        likes.on_settled("c1", generation_of(&first), false);
        assert!(!likes.is_liked("c1", false));

        // The second request settles fine.
        likes.on_settled("c1", generation_of(&second), true);
        assert!(!likes.is_liked("c1", false));
    }

    #[test]
    fn double_tap_only_ever_likes() {
        let mut likes = LikeBook::new();

        let effect = likes.double_tap("c1", false);
        assert!(effect.is_some());
        assert!(likes.is_liked("c1", false));

        assert!(likes.double_tap("c1", false).is_none(), "never unlikes");
        assert!(likes.is_liked("c1", false));

        // Server-liked creations are inert too.
        assert!(likes.double_tap("c2", true).is_none());
    }

    #[test]
    fn unlike_reverts_to_liked_on_failure() {
        let mut likes = LikeBook::new();

        let effect = likes.toggle("c1", true);
        assert!(!likes.is_liked("c1", true));

        likes.on_settled("c1", generation_of(&effect), false);
        assert!(likes.is_liked("c1", true));
    }
}
