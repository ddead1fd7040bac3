//! The buffer seam the engine drives.

use core_text::Buffer;

/// Collaborator interface the engine needs from a document: read contents
/// and caret, move the caret, splice a byte range, and manage the single
/// highlight span.
///
/// `core_text::Buffer` implements it directly; richer hosts (a document
/// that also records edit history, a test double) implement it by
/// delegation. Implementations are responsible for keeping offsets clamped
/// and on char boundaries; the engine only ever hands back offsets it
/// derived from `text()`.
pub trait TextBuffer {
    fn text(&self) -> String;
    fn len_bytes(&self) -> usize;
    fn caret(&self) -> usize;
    fn set_caret(&mut self, offset: usize);
    /// Replace `[start, end)` with `replacement`, returning the removed text.
    fn splice(&mut self, start: usize, end: usize, replacement: &str) -> String;
    fn set_highlight(&mut self, start: usize, end: usize);
    fn clear_highlight(&mut self);
}

impl TextBuffer for Buffer {
    fn text(&self) -> String {
        Buffer::text(self)
    }

    fn len_bytes(&self) -> usize {
        Buffer::len_bytes(self)
    }

    fn caret(&self) -> usize {
        Buffer::caret(self)
    }

    fn set_caret(&mut self, offset: usize) {
        Buffer::set_caret(self, offset);
    }

    fn splice(&mut self, start: usize, end: usize, replacement: &str) -> String {
        Buffer::splice(self, start, end, replacement)
    }

    fn set_highlight(&mut self, start: usize, end: usize) {
        Buffer::set_highlight(self, start, end);
    }

    fn clear_highlight(&mut self) {
        Buffer::clear_highlight(self);
    }
}
