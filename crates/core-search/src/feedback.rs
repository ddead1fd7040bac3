//! Notification channel from the engine back to its host.
//!
//! The engine never renders messages itself; it emits a [`SearchNotice`]
//! through whatever [`FeedbackSink`] the caller supplies and leaves exact
//! wording (and localization) to the host.

/// Conditions surfaced to the user. No payload beyond the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchNotice {
    /// Search or replace was invoked with an empty term.
    EmptyQuery,
    /// The scan reached the end of the buffer and restarted from the top.
    WrappedToStart,
    /// No occurrence exists anywhere in the buffer.
    NoMatches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Info,
}

impl SearchNotice {
    pub fn severity(self) -> Severity {
        match self {
            SearchNotice::EmptyQuery => Severity::Warning,
            SearchNotice::WrappedToStart | SearchNotice::NoMatches => Severity::Info,
        }
    }
}

/// Sink for engine notifications. Hosts surface these as dialogs or status
/// messages; headless callers can record or ignore them.
pub trait FeedbackSink {
    fn notify(&mut self, notice: SearchNotice);
}

/// Discards every notification.
pub struct NoopFeedback;

impl FeedbackSink for NoopFeedback {
    fn notify(&mut self, _notice: SearchNotice) {}
}

/// Records notifications in order; the assertion-friendly sink for tests and
/// batch callers that report at the end.
#[derive(Debug, Default)]
pub struct RecordedFeedback {
    pub notices: Vec<SearchNotice>,
}

impl RecordedFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, notice: SearchNotice) -> bool {
        self.notices.contains(&notice)
    }
}

impl FeedbackSink for RecordedFeedback {
    fn notify(&mut self, notice: SearchNotice) {
        self.notices.push(notice);
    }
}
