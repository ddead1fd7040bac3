//! Search query: the literal term plus its case-folding mode.

/// A literal (non-regex) search query.
///
/// `term` may be empty only as the "nothing typed" sentinel; every engine
/// entry point rejects an empty term before matching, so downstream code can
/// assume a non-empty needle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub case_sensitive: bool,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            term: term.into(),
            case_sensitive,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    /// Byte length of the term. Folding preserves byte lengths (see
    /// [`fold_for_search`]), so this is also the length of every match span.
    pub fn term_len(&self) -> usize {
        self.term.len()
    }

    /// The needle actually scanned for: the term itself, or its fold when
    /// matching case-insensitively.
    pub fn needle(&self) -> String {
        if self.case_sensitive {
            self.term.clone()
        } else {
            fold_for_search(&self.term)
        }
    }

    /// Whether `fragment` still reads as this term, used to re-validate a
    /// remembered match position before replacing.
    pub fn matches_fragment(&self, fragment: &str) -> bool {
        if self.case_sensitive {
            fragment == self.term
        } else {
            fold_for_search(fragment) == fold_for_search(&self.term)
        }
    }
}

/// Lowercase `text` for matching while preserving byte offsets.
///
/// Offsets found in the folded copy index the unfolded buffer, so a char
/// whose lowercase form has a different UTF-8 length (e.g. 'İ') is kept
/// as-is. Ordinal folding only: no locale tables, no normalization.
pub fn fold_for_search(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let mut lower = ch.to_lowercase();
        match (lower.next(), lower.next()) {
            (Some(l), None) if l.len_utf8() == ch.len_utf8() => out.push(l),
            _ => out.push(ch),
        }
    }
    out
}
