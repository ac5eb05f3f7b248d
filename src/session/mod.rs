//! Per-session pagination state
//!
//! One [`Session`] exists per first-page query and owns everything that must
//! be discarded when the query is superseded: the stored cursor, the
//! accumulated value list, and the exhausted latch. The pager creates a fresh
//! session on every new query, which is what makes supersession total -
//! nothing from the old session can leak into the new one.
//!
//! # Overview
//!
//! State transitions:
//! - `Session::new()` - cursor unset, list empty, not exhausted
//! - `apply_page()` - records the page's cursor and folds its values in
//! - `can_load_more()` - gates the next-page trigger
//!
//! The cursor always reflects the most recently *completed* fetch; it is
//! `None` until the session's first page resolves.

use crate::accumulate::Concater;
use crate::source::Page;

/// Outcome of applying a completed page to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page carried values; the cumulative list was updated.
    Applied,
    /// The page was empty; the session is now exhausted.
    Exhausted,
}

/// State owned by one pagination session.
#[derive(Debug)]
pub struct Session<C, V> {
    cursor: Option<C>,
    values: Vec<V>,
    exhausted: bool,
}

impl<C: Clone, V: Clone + PartialEq> Session<C, V> {
    /// Create a fresh session: no cursor, empty list, not exhausted
    pub fn new() -> Self {
        Self {
            cursor: None,
            values: Vec::new(),
            exhausted: false,
        }
    }

    /// The cursor of the most recently completed fetch, if any
    pub fn cursor(&self) -> Option<&C> {
        self.cursor.as_ref()
    }

    /// The cumulative value list
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Whether an empty page has latched this session exhausted
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Whether a "load more" event should issue a fetch.
    ///
    /// True only when a cursor exists and the session is not exhausted.
    /// Before the first page completes there is no cursor, so early
    /// "load more" events are silently dropped rather than queued.
    pub fn can_load_more(&self) -> bool {
        !self.exhausted && self.cursor.is_some()
    }

    /// Apply a completed page.
    ///
    /// The page's cursor replaces the stored one unconditionally (the store
    /// tracks the latest completed fetch). An empty value list latches the
    /// session exhausted and leaves the cumulative list untouched; otherwise
    /// the values are folded in through `concater`.
    pub fn apply_page(&mut self, page: Page<C, V>, concater: &Concater<V>) -> PageOutcome {
        self.cursor = page.cursor;
        if page.values.is_empty() {
            self.exhausted = true;
            return PageOutcome::Exhausted;
        }
        let existing = std::mem::take(&mut self.values);
        self.values = concater(existing, page.values);
        PageOutcome::Applied
    }
}

impl<C: Clone, V: Clone + PartialEq> Default for Session<C, V> {
    fn default() -> Self {
        Self::new()
    }
}
