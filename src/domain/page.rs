//! Pagination cursor for server-driven page walks.
//!
//! The backend reports `currentPage`/`totalPages` with every page response;
//! the cursor tracks where the client is and whether another page exists.
//! The cursor never points more than one page past what the server last
//! reported, so the client cannot request pages the server never announced.

/// Position within a server-paginated collection.
///
/// Invariants, re-established after every mutation:
///
/// - `page_number >= 1` and `total_pages >= 1`
/// - `page_number <= total_pages + 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// The page the client most recently requested (1-based).
    page_number: u32,

    /// Total page count as last reported by the server.
    total_pages: u32,
}

impl PageCursor {
    /// Creates a cursor positioned at page 1 of an unknown collection.
    ///
    /// Until the first response arrives the server is assumed to have exactly
    /// one page; the first [`sync`](Self::sync) replaces the assumption.
    #[must_use]
    pub fn new() -> Self {
        Self { page_number: 1, total_pages: 1 }
    }

    /// The page the cursor currently points at (1-based).
    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Total page count as last reported by the server.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether the server has announced pages beyond the current one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// Records what the server reported alongside a page of results.
    ///
    /// Both values are clamped to at least 1; a misbehaving server cannot
    /// push the cursor into an invalid state.
    pub fn sync(&mut self, current_page: u32, total_pages: u32) {
        self.total_pages = total_pages.max(1);
        self.page_number = current_page.clamp(1, self.total_pages.saturating_add(1));
    }

    /// The next page to request, when the server has announced one.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        self.has_more().then(|| self.page_number + 1)
    }

    /// Resets to page 1, keeping the last reported total.
    pub fn reset(&mut self) {
        self.page_number = 1;
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}
