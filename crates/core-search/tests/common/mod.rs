#![allow(dead_code)] // Shared across integration tests; each binary uses a subset of helpers.

use core_search::{
    MatchResult, RecordedFeedback, ReplaceOutcome, SearchQuery, SearchSession, TextBuffer,
};
use core_text::Buffer;

/// One document + session + recorded notifications, driven the way a host
/// front end would drive the engine.
pub struct Harness {
    pub buffer: Buffer,
    pub session: SearchSession,
    pub feedback: RecordedFeedback,
}

impl Harness {
    pub fn new(content: &str) -> Self {
        Self {
            buffer: Buffer::from_str("test", content).unwrap(),
            session: SearchSession::new(),
            feedback: RecordedFeedback::new(),
        }
    }

    pub fn search(&mut self, term: &str, case_sensitive: bool) -> MatchResult {
        let query = SearchQuery::new(term, case_sensitive);
        self.session
            .search(&mut self.buffer, &query, &mut self.feedback)
    }

    pub fn replace(&mut self, term: &str, replacement: &str, case_sensitive: bool) -> ReplaceOutcome {
        let query = SearchQuery::new(term, case_sensitive);
        self.session
            .replace(&mut self.buffer, &query, replacement, &mut self.feedback)
    }

    pub fn text(&self) -> String {
        TextBuffer::text(&self.buffer)
    }
}
