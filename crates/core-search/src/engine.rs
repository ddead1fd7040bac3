//! Stateless matching layer: a caret-origin scan with wraparound.
//!
//! Pure functions over a text snapshot. Session policy (flags, highlights,
//! replace chaining) lives in [`crate::session`]; this module only answers
//! "where is the next occurrence".

use crate::query::{SearchQuery, fold_for_search};

/// A located occurrence, `[start, end)` in bytes of the unfolded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Outcome of one scan. `wrapped` is set when the tail scan came up empty
/// and the match was found by restarting from offset 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub span: Option<MatchSpan>,
    pub wrapped: bool,
}

impl MatchResult {
    pub fn found(&self) -> bool {
        self.span.is_some()
    }

    pub(crate) fn miss() -> Self {
        Self {
            span: None,
            wrapped: false,
        }
    }
}

/// Locate the next occurrence of `query` at or after `from`, restarting
/// from offset 0 when the tail scan misses.
///
/// Case-insensitive mode scans a lowercased copy of both term and text; the
/// fold preserves byte lengths, so returned offsets index the original
/// text. `from` must lie on a char boundary (callers pass the buffer caret,
/// which guarantees it).
pub fn locate(text: &str, query: &SearchQuery, from: usize) -> MatchResult {
    debug_assert!(!query.is_empty(), "empty terms are rejected upstream");
    let haystack = if query.case_sensitive {
        text.to_string()
    } else {
        fold_for_search(text)
    };
    let needle = query.needle();
    let from = from.min(haystack.len());

    if let Some(pos) = haystack[from..].find(&needle) {
        let start = from + pos;
        return MatchResult {
            span: Some(MatchSpan::new(start, start + needle.len())),
            wrapped: false,
        };
    }
    match haystack.find(&needle) {
        Some(start) => MatchResult {
            span: Some(MatchSpan::new(start, start + needle.len())),
            wrapped: true,
        },
        None => MatchResult::miss(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(term: &str, case_sensitive: bool) -> SearchQuery {
        SearchQuery::new(term, case_sensitive)
    }

    #[test]
    fn finds_from_offset() {
        let r = locate("cat dog cat", &q("cat", true), 3);
        assert_eq!(r.span, Some(MatchSpan::new(8, 11)));
        assert!(!r.wrapped);
    }

    #[test]
    fn wraps_when_tail_scan_misses() {
        let r = locate("cat dog cat", &q("cat", true), 11);
        assert_eq!(r.span, Some(MatchSpan::new(0, 3)));
        assert!(r.wrapped);
    }

    #[test]
    fn miss_reports_no_wrap() {
        let r = locate("cat dog", &q("bird", true), 0);
        assert_eq!(r.span, None);
        assert!(!r.wrapped);
    }

    #[test]
    fn case_insensitive_fold() {
        let r = locate("say hello world", &q("Hello", false), 0);
        assert_eq!(r.span, Some(MatchSpan::new(4, 9)));
        assert!(!r.wrapped);
    }

    #[test]
    fn case_sensitive_distinguishes() {
        let r = locate("say hello world", &q("Hello", true), 0);
        assert!(!r.found());
    }

    #[test]
    fn from_beyond_text_is_clamped() {
        let r = locate("abc", &q("abc", true), 99);
        assert_eq!(r.span, Some(MatchSpan::new(0, 3)));
        assert!(r.wrapped);
    }

    #[test]
    fn match_at_caret_is_not_a_wrap() {
        let r = locate("cat dog cat", &q("cat", true), 0);
        assert_eq!(r.span, Some(MatchSpan::new(0, 3)));
        assert!(!r.wrapped);
    }

    #[test]
    fn non_ascii_offsets_stay_valid() {
        let text = "héllo Héllo";
        let r = locate(text, &q("héllo", false), 1);
        let span = r.span.unwrap();
        assert_eq!(&text[span.start..span.end], "Héllo");
    }
}
