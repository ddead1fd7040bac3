//! Incremental search-and-replace engine.
//!
//! The engine locates literal occurrences of a term inside a mutable text
//! buffer, advances a persistent match cursor across repeated invocations,
//! wraps around at the buffer boundary, and drives the chained
//! replace-then-find-next protocol. It owns no buffer and no UI: it reads
//! contents and caret through the [`TextBuffer`] seam, issues caret /
//! highlight / splice commands back through the same seam, and reports
//! user-facing conditions through the [`FeedbackSink`] channel. Any front
//! end (a dialog, a status bar, a test harness) can drive the identical
//! contract headlessly.
//!
//! Layering:
//! * [`query`]: the term plus its case-folding mode; empty-term rejection.
//! * [`engine`]: the stateless scan, a caret-origin `find` with wraparound.
//! * [`cursor`]: per-session memory (last match start, has-searched flag).
//! * [`session`]: the call protocol tying the above together, from the
//!   has-searched flag policy through stale re-validation and chaining.
//! * [`feedback`]: notification kinds and the sink trait.
//!
//! Call discipline: everything is synchronous and runs to completion on the
//! caller's thread. A match offset is never trusted across a call boundary
//! without re-validation against the current contents, so concurrent edits
//! from the host degrade to a benign skip instead of a corrupt splice.

pub mod buffer;
pub mod cursor;
pub mod engine;
pub mod feedback;
pub mod query;
pub mod session;

pub use buffer::TextBuffer;
pub use cursor::MatchCursor;
pub use engine::{MatchResult, MatchSpan, locate};
pub use feedback::{FeedbackSink, NoopFeedback, RecordedFeedback, SearchNotice, Severity};
pub use query::{SearchQuery, fold_for_search};
pub use session::{ReplaceOutcome, SearchSession};
