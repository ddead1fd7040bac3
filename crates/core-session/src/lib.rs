//! Document and session layer.
//!
//! A [`Document`] wraps a `core_text::Buffer` together with the passive
//! [`history::EditHistory`] and a dirty flag. It implements the engine's
//! `TextBuffer` seam, recording a pre-edit snapshot on every splice: the
//! history observes replace operations as ordinary buffer edits without the
//! engine knowing it exists.
//!
//! An [`EditorSession`] adds the search dialog lifecycle on top: opening
//! the search surface creates the per-session match cursor, closing it
//! resets the cursor and clears the highlight, mirroring a dialog that is
//! dismissed and reopened with no memory of prior matches.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

use core_search::{
    FeedbackSink, MatchResult, ReplaceOutcome, SearchQuery, SearchSession, TextBuffer,
};
use core_text::Buffer;

pub mod history;
pub use history::{EditHistory, HISTORY_MAX};

/// A buffer plus the collaborators every edit flows through.
pub struct Document {
    buffer: Buffer,
    history: EditHistory,
    pub dirty: bool,
    pub file_name: Option<PathBuf>,
}

impl Document {
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            history: EditHistory::new(),
            dirty: false,
            file_name: None,
        }
    }

    /// Read a UTF-8 file into a fresh document.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("file");
        debug!(
            target: "io",
            file = %path.display(),
            size_bytes = content.len(),
            "file_read_ok"
        );
        let mut doc = Self::new(Buffer::from_str(name, &content)?);
        doc.file_name = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Replace history depth cap (config-driven hosts call this once at
    /// startup, before any edits are recorded).
    pub fn set_history_limit(&mut self, limit: usize) {
        self.history = EditHistory::with_limit(limit);
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Restore the previous snapshot. Returns true if anything was undone.
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.buffer)
    }

    /// Re-apply the most recently undone snapshot.
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.buffer)
    }
}

impl TextBuffer for Document {
    fn text(&self) -> String {
        self.buffer.text()
    }

    fn len_bytes(&self) -> usize {
        self.buffer.len_bytes()
    }

    fn caret(&self) -> usize {
        self.buffer.caret()
    }

    fn set_caret(&mut self, offset: usize) {
        self.buffer.set_caret(offset);
    }

    fn splice(&mut self, start: usize, end: usize, replacement: &str) -> String {
        // Snapshot first: the history sees the pre-edit state of every
        // mutation, whoever initiated it.
        self.history.record(&self.buffer);
        self.dirty = true;
        self.buffer.splice(start, end, replacement)
    }

    fn set_highlight(&mut self, start: usize, end: usize) {
        self.buffer.set_highlight(start, end);
    }

    fn clear_highlight(&mut self) {
        self.buffer.clear_highlight();
    }
}

/// A document plus the search dialog lifecycle.
pub struct EditorSession {
    pub document: Document,
    search: Option<SearchSession>,
}

impl EditorSession {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            search: None,
        }
    }

    /// Open the search surface: from here on the session remembers matches.
    /// Reopening an already-open surface is a no-op.
    pub fn open_search(&mut self) {
        if self.search.is_none() {
            debug!(target: "session", "search_opened");
            self.search = Some(SearchSession::new());
        }
    }

    /// Dismiss the search surface: the match cursor is forgotten and the
    /// highlight cleared, so the next open starts fresh.
    pub fn close_search(&mut self) {
        if let Some(mut session) = self.search.take() {
            session.reset(&mut self.document);
            debug!(target: "session", "search_closed");
        }
    }

    pub fn search_open(&self) -> bool {
        self.search.is_some()
    }

    /// Drive a search through the open surface (opening it on demand, the
    /// way invoking the menu item would).
    pub fn search(&mut self, query: &SearchQuery, feedback: &mut dyn FeedbackSink) -> MatchResult {
        self.open_search();
        let session = self.search.get_or_insert_with(SearchSession::new);
        session.search(&mut self.document, query, feedback)
    }

    /// Drive a replace step through the open surface.
    pub fn replace(
        &mut self,
        query: &SearchQuery,
        replacement: &str,
        feedback: &mut dyn FeedbackSink,
    ) -> ReplaceOutcome {
        self.open_search();
        let session = self.search.get_or_insert_with(SearchSession::new);
        session.replace(&mut self.document, query, replacement, feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_search::{NoopFeedback, RecordedFeedback, SearchNotice};

    fn doc(content: &str) -> Document {
        Document::new(Buffer::from_str("t", content).unwrap())
    }

    #[test]
    fn splice_records_history_and_marks_dirty() {
        let mut d = doc("hello");
        assert!(!d.dirty);
        d.splice(0, 5, "bye");
        assert!(d.dirty);
        assert_eq!(d.history().undo_depth(), 1);
        assert!(d.undo());
        assert_eq!(d.buffer().text(), "hello");
    }

    #[test]
    fn replace_chain_is_undoable_per_step() {
        let mut s = EditorSession::new(doc("a b a"));
        let mut feedback = NoopFeedback;
        let query = SearchQuery::new("a", false);

        s.replace(&query, "X", &mut feedback); // highlight only
        assert_eq!(s.document.history().undo_depth(), 0);

        s.replace(&query, "X", &mut feedback); // "X b a"
        assert_eq!(s.document.buffer().text(), "X b a");
        assert_eq!(s.document.history().undo_depth(), 1);

        s.replace(&query, "X", &mut feedback); // "X b X"
        assert_eq!(s.document.buffer().text(), "X b X");
        assert_eq!(s.document.history().undo_depth(), 2);

        assert!(s.document.undo());
        assert_eq!(s.document.buffer().text(), "X b a");
        assert!(s.document.undo());
        assert_eq!(s.document.buffer().text(), "a b a");
    }

    #[test]
    fn close_search_resets_cursor_and_highlight() {
        let mut s = EditorSession::new(doc("cat dog cat"));
        let mut feedback = NoopFeedback;
        let query = SearchQuery::new("cat", false);

        s.search(&query, &mut feedback);
        assert!(s.search_open());
        assert!(s.document.buffer().highlight().is_some());

        s.close_search();
        assert!(!s.search_open());
        assert!(s.document.buffer().highlight().is_none());

        // A reopened session has no memory: the first replace only
        // highlights again.
        let outcome = s.replace(&query, "dog", &mut feedback);
        assert!(matches!(outcome, ReplaceOutcome::FirstSearch(_)));
        assert_eq!(s.document.buffer().text(), "cat dog cat");
    }

    #[test]
    fn session_notifications_flow_through() {
        let mut s = EditorSession::new(doc("plain text"));
        let mut feedback = RecordedFeedback::new();
        s.search(&SearchQuery::new("missing", false), &mut feedback);
        assert_eq!(feedback.notices, vec![SearchNotice::NoMatches]);
    }

    #[test]
    fn external_edit_between_steps_is_skipped_not_replayed() {
        let mut s = EditorSession::new(doc("cat dog cat"));
        let mut feedback = NoopFeedback;
        let query = SearchQuery::new("cat", false);

        s.search(&query, &mut feedback);
        // A host edit lands between search and replace.
        s.document.splice(0, 3, "car");

        let outcome = s.replace(&query, "bird", &mut feedback);
        assert!(matches!(outcome, ReplaceOutcome::StaleSkipped { .. }));
        assert_eq!(s.document.buffer().text(), "car dog cat");
        // Only the host edit is in the history; the skipped replace added
        // nothing.
        assert_eq!(s.document.history().undo_depth(), 1);
    }

    #[test]
    fn from_missing_file_errors() {
        assert!(Document::from_file(Path::new("__definitely_missing__.txt")).is_err());
    }
}
