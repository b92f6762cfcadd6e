//! Locating the contents of the quoted string around a cursor.
//!
//! Offsets are char offsets into the text after line-ending canonicalization
//! (see [`normalize_line_endings`](crate::normalize_line_endings)).
//! The cursor is the number of chars to its left, `0..=len`.
//!
//! Containment is decided by pairing up `"` occurrences left to right. Once the
//! cursor is known to be inside a pair, the span is found by walking outwards
//! to the nearest `"` or `'` on each side, so a single-quoted run nested inside
//! a double-quoted string wins over the outer quotes.

mod pairs;
mod span;

use thiserror::Error;

use crate::document::normalize_line_endings;

pub use pairs::{group_consecutive, is_inside_any_pair, locate_quote_pairs};
pub use span::{walk_to_delimiters, QuoteSpan, DELIMITERS};

/// The quote whose pairing decides containment.
pub const PAIRING_QUOTE: char = '"';

/// Errors from [`find_enclosing_span`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    #[error("cursor offset {offset} is out of range for a document of {len} chars")]
    InvalidOffset { offset: usize, len: usize },
}

/// Find the contents of the quoted string enclosing the cursor at `offset`.
///
/// Returns `Ok(None)` when the cursor is not strictly inside a pair of `"`.
/// Unbalanced quoting is not an error.
pub fn find_enclosing_span(text: &str, offset: usize) -> Result<Option<QuoteSpan>, SpanError> {
    let text = normalize_line_endings(text);
    let chars: Vec<char> = text.chars().collect();

    if offset > chars.len() {
        return Err(SpanError::InvalidOffset {
            offset,
            len: chars.len(),
        });
    }

    let pairs = group_consecutive(&locate_quote_pairs(&text, PAIRING_QUOTE), 2);
    // pair bounds are 1-based absolute positions
    if !is_inside_any_pair(&pairs, offset + 1) {
        return Ok(None);
    }

    Ok(Some(span::walk_chars(&chars, offset)))
}

/// Stateless entry point for callers that want a service object.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteSpanFinder;

impl QuoteSpanFinder {
    pub fn new() -> Self {
        Self
    }

    /// See [`find_enclosing_span`].
    pub fn find(&self, text: &str, offset: usize) -> Result<Option<QuoteSpan>, SpanError> {
        find_enclosing_span(text, offset)
    }

    /// See [`walk_to_delimiters`].
    pub fn walk(&self, text: &str, offset: usize) -> QuoteSpan {
        walk_to_delimiters(text, offset)
    }
}
