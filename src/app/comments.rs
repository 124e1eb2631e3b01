//! Comment thread controller.
//!
//! One [`CommentThread`] exists per open comment sheet. It owns the thread's
//! page cursor and accumulated comments, guards load-more the same way the
//! feed does, and — unlike the feed — surfaces failures through an error
//! string because the sheet has a visible error slot. The thread is simply
//! dropped when the sheet closes.

use crate::api::CommentPage;
use crate::app::effects::Effect;
use crate::domain::{Comment, PageCursor};

/// State machine for one creation's comment sheet.
#[derive(Debug)]
pub struct CommentThread {
    /// The creation this thread belongs to.
    creation_id: String,

    /// Accumulated comments, newest first within each page.
    comments: Vec<Comment>,

    /// Pagination position, synced from every successful response.
    cursor: PageCursor,

    /// True while the initial page is loading.
    is_loading: bool,

    /// True while a further page is loading.
    is_loading_more: bool,

    /// True while a submitted comment is on the wire.
    is_submitting: bool,

    /// User-facing failure message; the sheet shows this inline.
    error: Option<String>,
}

impl CommentThread {
    /// Opens a thread and requests its first page.
    #[must_use]
    pub fn open(creation_id: &str) -> (Self, Effect) {
        let thread = Self {
            creation_id: creation_id.to_string(),
            comments: vec![],
            cursor: PageCursor::new(),
            is_loading: true,
            is_loading_more: false,
            is_submitting: false,
            error: None,
        };
        let effect = Effect::FetchComments { creation_id: creation_id.to_string(), page: 1 };
        (thread, effect)
    }

    /// Requests the next page, guarded like the feed's load-more.
    pub fn load_more(&mut self) -> Option<Effect> {
        if self.is_loading || self.is_loading_more {
            return None;
        }
        let page = self.cursor.next_page()?;
        self.is_loading_more = true;
        Some(Effect::FetchComments { creation_id: self.creation_id.clone(), page })
    }

    /// Submits a comment; trimmed-empty text is ignored.
    pub fn submit(&mut self, text: &str) -> Option<Effect> {
        if text.trim().is_empty() || self.is_submitting {
            return None;
        }
        self.is_submitting = true;
        self.error = None;
        Some(Effect::SubmitComment {
            creation_id: self.creation_id.clone(),
            text: text.to_string(),
        })
    }

    /// Applies a loaded comment page.
    ///
    /// Page 1 replaces the list; later pages append. Responses for another
    /// creation (a sheet that was reopened elsewhere) are discarded.
    pub fn on_page(&mut self, creation_id: &str, page: CommentPage) {
        if creation_id != self.creation_id {
            tracing::debug!(other = %creation_id, "comment page for another thread, discarding");
            return;
        }

        if page.current_page <= 1 {
            self.comments = page.comments;
        } else {
            self.comments.extend(page.comments);
        }
        self.cursor.sync(page.current_page, page.total_pages);
        self.is_loading = false;
        self.is_loading_more = false;
        self.error = None;

        tracing::debug!(
            creation_id = %self.creation_id,
            comments = self.comments.len(),
            has_more = self.cursor.has_more(),
            "comment page applied"
        );
    }

    /// Records a failed page load; the message is shown in the sheet.
    pub fn on_page_failed(&mut self, creation_id: &str, message: String) {
        if creation_id != self.creation_id {
            return;
        }
        self.is_loading = false;
        self.is_loading_more = false;
        tracing::debug!(error = %message, "comment load failed");
        self.error = Some(message);
    }

    /// Prepends a successfully posted comment.
    pub fn on_posted(&mut self, creation_id: &str, comment: Comment) {
        if creation_id != self.creation_id {
            return;
        }
        self.comments.insert(0, comment);
        self.is_submitting = false;
        self.error = None;
    }

    /// Records a failed submission; the message is shown in the sheet.
    pub fn on_post_failed(&mut self, creation_id: &str, message: String) {
        if creation_id != self.creation_id {
            return;
        }
        self.is_submitting = false;
        tracing::debug!(error = %message, "comment submit failed");
        self.error = Some(message);
    }

    /// The creation this thread belongs to.
    #[must_use]
    pub fn creation_id(&self) -> &str {
        &self.creation_id
    }

    /// Accumulated comments.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Whether the server has announced further pages.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.cursor.has_more()
    }

    /// True while the initial page is loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// True while a further page is loading.
    #[must_use]
    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    /// True while a submitted comment is on the wire.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// User-facing failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
