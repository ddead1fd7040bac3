//! Rope-based text buffer with caret and highlight tracking.
//!
//! This crate is the document side of the search/replace core: a `Buffer`
//! owns the character sequence, the caret (an absolute byte offset into the
//! sequence) and the single highlight span marking the currently active
//! match. Higher layers never touch the rope directly; they read `text()`
//! and issue caret / highlight / splice commands against this API.
//!
//! Offset discipline: every public offset is a byte index into the current
//! contents and is clamped onto a UTF-8 char boundary before use. A splice
//! re-clamps the caret and either shifts or drops the highlight, so the
//! invariants hold across arbitrary edit sequences without the callers
//! having to re-validate.

use anyhow::Result;
use ropey::Rope;
use tracing::trace;

pub mod stats;

/// The single `[start, end)` span visually marking the active match.
///
/// At most one span exists per buffer; setting a new one replaces the old.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
}

impl HighlightSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// A text buffer backed by a `ropey::Rope`, plus caret and highlight state.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
    caret: usize,
    highlight: Option<HighlightSpan>,
    pub name: String,
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice. Caret starts at 0.
    pub fn from_str(name: impl Into<String>, content: &str) -> Result<Self> {
        Ok(Self {
            rope: Rope::from_str(content),
            caret: 0,
            highlight: None,
            name: name.into(),
        })
    }

    /// Total length of the contents in bytes.
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Full contents as an owned `String`.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Current caret offset (always on a char boundary within the contents).
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Move the caret. Out-of-range or mid-codepoint offsets are clamped to
    /// the nearest preceding boundary rather than rejected.
    pub fn set_caret(&mut self, offset: usize) {
        self.caret = self.floor_boundary(offset);
    }

    pub fn highlight(&self) -> Option<HighlightSpan> {
        self.highlight
    }

    /// Mark `[start, end)`, replacing any prior span.
    pub fn set_highlight(&mut self, start: usize, end: usize) {
        let s = self.floor_boundary(start);
        let e = self.floor_boundary(end).max(s);
        self.highlight = Some(HighlightSpan::new(s, e));
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    /// Return the UTF-8 slice in the byte range `[start, end)` (clamped).
    pub fn slice(&self, start: usize, end: usize) -> String {
        let s = self.floor_boundary(start);
        let e = self.floor_boundary(end);
        if s >= e {
            return String::new();
        }
        let start_char = self.rope.byte_to_char(s);
        let end_char = self.rope.byte_to_char(e);
        self.rope.slice(start_char..end_char).to_string()
    }

    /// Replace the byte range `[start, end)` with `replacement`, returning
    /// the removed text.
    ///
    /// Caret and highlight survive the edit: offsets past the range shift by
    /// the length delta, a caret inside the range lands at the end of the
    /// inserted text, and a highlight overlapping the range is dropped.
    pub fn splice(&mut self, start: usize, end: usize, replacement: &str) -> String {
        let s = self.floor_boundary(start);
        let e = self.floor_boundary(end).max(s);
        let start_char = self.rope.byte_to_char(s);
        let end_char = self.rope.byte_to_char(e);
        debug_assert_eq!(self.rope.char_to_byte(start_char), s);
        debug_assert_eq!(self.rope.char_to_byte(end_char), e);
        let removed = self.rope.slice(start_char..end_char).to_string();
        self.rope.remove(start_char..end_char);
        self.rope.insert(start_char, replacement);
        trace!(
            target: "text.buffer",
            buffer = self.name.as_str(),
            start = s,
            end = e,
            removed_bytes = removed.len(),
            inserted_bytes = replacement.len(),
            "splice"
        );

        let removed_len = e - s;
        let inserted_len = replacement.len();
        self.caret = if self.caret >= e {
            self.caret - removed_len + inserted_len
        } else if self.caret > s {
            s + inserted_len
        } else {
            self.caret
        };
        self.caret = self.floor_boundary(self.caret);

        self.highlight = match self.highlight {
            Some(h) if h.end <= s => Some(h),
            Some(h) if h.start >= e => Some(HighlightSpan::new(
                h.start - removed_len + inserted_len,
                h.end - removed_len + inserted_len,
            )),
            _ => None,
        };

        removed
    }

    /// Clamp an offset into the contents and snap it back to the containing
    /// char's first byte.
    fn floor_boundary(&self, offset: usize) -> usize {
        let clamped = offset.min(self.rope.len_bytes());
        if clamped == self.rope.len_bytes() {
            return clamped;
        }
        let ch = self.rope.byte_to_char(clamped);
        self.rope.char_to_byte(ch)
    }
}
