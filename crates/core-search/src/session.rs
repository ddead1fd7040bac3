//! Search/replace session: the persistent cursor plus the call protocol.
//!
//! One `SearchSession` exists per search dialog (or equivalent surface) per
//! document. It threads a [`MatchCursor`] through the stateless scan in
//! [`crate::engine`] and enforces the protocol rules:
//!
//! * a non-empty search always marks the session as "has searched", except
//!   that a full-scan miss clears the flag again so a later replace cannot
//!   trust a match that never existed;
//! * the first replace of a session only locates and highlights, so the
//!   user sees the match before any text changes;
//! * a remembered match offset is re-validated against the current contents
//!   before the splice, and silently skipped when stale;
//! * every replace ends by searching again, advancing to the next hit.

use tracing::{debug, trace};

use crate::buffer::TextBuffer;
use crate::cursor::MatchCursor;
use crate::engine::{MatchResult, locate};
use crate::feedback::{FeedbackSink, SearchNotice};
use crate::query::SearchQuery;

/// Outcome of one `replace` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// Term was empty; nothing examined or mutated.
    EmptyQuery,
    /// No search had happened this session: the first match was located and
    /// highlighted, text untouched.
    FirstSearch(MatchResult),
    /// The remembered match was spliced out; `next` is the follow-up search.
    Replaced { next: MatchResult },
    /// The remembered range no longer read as the term; text untouched,
    /// `next` is the follow-up search.
    StaleSkipped { next: MatchResult },
}

impl ReplaceOutcome {
    /// Whether this call actually mutated the buffer.
    pub fn replaced(&self) -> bool {
        matches!(self, ReplaceOutcome::Replaced { .. })
    }

    /// The follow-up match this call left highlighted, if any.
    pub fn next_match(&self) -> Option<MatchResult> {
        match self {
            ReplaceOutcome::EmptyQuery => None,
            ReplaceOutcome::FirstSearch(r) => Some(*r),
            ReplaceOutcome::Replaced { next } | ReplaceOutcome::StaleSkipped { next } => {
                Some(*next)
            }
        }
    }
}

/// Session state for one search dialog over one document.
#[derive(Debug, Default)]
pub struct SearchSession {
    cursor: MatchCursor,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the cursor (hosts use this for enabling/disabling UI, tests
    /// for asserting the flag policy).
    pub fn cursor(&self) -> &MatchCursor {
        &self.cursor
    }

    /// Find the next occurrence of `query` starting at the buffer's caret,
    /// wrapping at the end.
    ///
    /// On success the caret moves to the match end and the match becomes the
    /// buffer's single highlight. On a full miss the session forgets that it
    /// ever searched, so the next replace restarts the first-call protocol.
    pub fn search(
        &mut self,
        buffer: &mut dyn TextBuffer,
        query: &SearchQuery,
        feedback: &mut dyn FeedbackSink,
    ) -> MatchResult {
        if query.is_empty() {
            feedback.notify(SearchNotice::EmptyQuery);
            return MatchResult::miss();
        }
        self.cursor.has_searched = true;

        let text = buffer.text();
        let result = locate(&text, query, buffer.caret());
        match result.span {
            Some(span) => {
                self.cursor.last_match_start = Some(span.start);
                if result.wrapped {
                    feedback.notify(SearchNotice::WrappedToStart);
                }
                buffer.clear_highlight();
                buffer.set_highlight(span.start, span.end);
                buffer.set_caret(span.end);
                debug!(
                    target: "search.session",
                    start = span.start,
                    end = span.end,
                    wrapped = result.wrapped,
                    "match"
                );
            }
            None => {
                feedback.notify(SearchNotice::NoMatches);
                self.cursor.last_match_start = None;
                self.cursor.has_searched = false;
                debug!(target: "search.session", term_bytes = query.term_len(), "no_matches");
            }
        }
        result
    }

    /// Replace the currently remembered match (if still valid) and advance
    /// to the next occurrence.
    ///
    /// The first call of a session never mutates text; it behaves exactly
    /// like `search` so the user sees the match before committing to it.
    pub fn replace(
        &mut self,
        buffer: &mut dyn TextBuffer,
        query: &SearchQuery,
        replacement: &str,
        feedback: &mut dyn FeedbackSink,
    ) -> ReplaceOutcome {
        if query.is_empty() {
            feedback.notify(SearchNotice::EmptyQuery);
            return ReplaceOutcome::EmptyQuery;
        }
        if !self.cursor.has_searched {
            let first = self.search(buffer, query, feedback);
            return ReplaceOutcome::FirstSearch(first);
        }

        // Re-validate the remembered range against the current contents; the
        // buffer may have been edited since the match was found.
        let replaced = match self.cursor.last_match_start {
            Some(start) => {
                let end = start + query.term_len();
                let text = buffer.text();
                let still_matches = text
                    .get(start..end)
                    .is_some_and(|fragment| query.matches_fragment(fragment));
                if still_matches {
                    buffer.splice(start, end, replacement);
                    debug!(
                        target: "search.session",
                        start,
                        end,
                        replacement_bytes = replacement.len(),
                        "replace"
                    );
                    true
                } else {
                    trace!(target: "search.session", start, "stale_match_skipped");
                    false
                }
            }
            None => false,
        };

        let next = self.search(buffer, query, feedback);
        if replaced {
            ReplaceOutcome::Replaced { next }
        } else {
            ReplaceOutcome::StaleSkipped { next }
        }
    }

    /// Close the session: forget the cursor and clear the buffer highlight.
    /// Called when the search UI is dismissed.
    pub fn reset(&mut self, buffer: &mut dyn TextBuffer) {
        self.cursor.reset();
        buffer.clear_highlight();
        debug!(target: "search.session", "session_reset");
    }
}
