//! Text statistics for status reporting: char/word/line counts and the
//! 1-based line:column of an offset.
//!
//! Word counting uses Unicode word segmentation rather than whitespace
//! splitting so CJK text and punctuation-adjacent words count correctly.

use unicode_segmentation::UnicodeSegmentation;

/// Aggregate counts over a buffer's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    pub chars: usize,
    pub words: usize,
    pub lines: usize,
}

/// Count characters, words, and lines of `text`. An empty text has zero of
/// each; a trailing newline does not open a new line.
pub fn stats_of(text: &str) -> TextStats {
    TextStats {
        chars: text.chars().count(),
        words: text.unicode_words().count(),
        lines: text.lines().count(),
    }
}

/// Translate a byte offset into a 1-based (line, column) pair, the
/// convention used by editor status bars. Column counts chars, not bytes.
/// Offsets beyond the text report the position just past the last char.
pub fn line_col_at(text: &str, offset: usize) -> (usize, usize) {
    let clamped = offset.min(text.len());
    let mut line = 1;
    let mut col = 1;
    for (idx, ch) in text.char_indices() {
        if idx >= clamped {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
