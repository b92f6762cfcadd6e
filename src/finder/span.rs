//! The selected span and the delimiter walk that produces it.

use std::ops::Range;

use crate::document::normalize_line_endings;

/// Characters that stop the boundary walk in either direction.
pub const DELIMITERS: [char; 2] = ['"', '\''];

/// Half-open span of char offsets covering the contents of a quoted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuoteSpan {
    /// Offset of the first selected char, right after the opening delimiter.
    pub start: usize,
    /// Offset one past the last selected char, i.e. the closing delimiter.
    pub end: usize,
}

impl QuoteSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} is past its end {}", start, end);
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The selected contents of `text`.
    ///
    /// `text` is canonicalized before slicing, so the result matches the
    /// offsets this span was computed against.
    pub fn slice(&self, text: &str) -> String {
        normalize_line_endings(text)
            .chars()
            .skip(self.start)
            .take(self.len())
            .collect()
    }
}

fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// Walk outwards from `offset` to the nearest delimiter on each side.
///
/// Either delimiter ends the walk, regardless of which one opened the string.
/// Without a delimiter the walk stops at the document boundary. Offsets past
/// the end are clamped to the end.
pub fn walk_to_delimiters(text: &str, offset: usize) -> QuoteSpan {
    let chars: Vec<char> = normalize_line_endings(text).chars().collect();
    walk_chars(&chars, offset)
}

pub(super) fn walk_chars(chars: &[char], offset: usize) -> QuoteSpan {
    let offset = offset.min(chars.len());

    let start = chars[..offset]
        .iter()
        .rposition(|&c| is_delimiter(c))
        .map_or(0, |i| i + 1);

    let end = chars[offset..]
        .iter()
        .position(|&c| is_delimiter(c))
        .map_or(chars.len(), |i| offset + i);

    QuoteSpan::new(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_nearest_quotes() {
        let span = walk_to_delimiters(r#"x = "abc";"#, 6);
        assert_eq!(span, QuoteSpan::new(5, 8));
        assert_eq!(span.slice(r#"x = "abc";"#), "abc");
    }

    #[test]
    fn falls_back_to_document_end() {
        let text = "\"open but never closed";
        let span = walk_to_delimiters(text, 1);
        assert_eq!(span.start, 1);
        assert_eq!(span.end, text.chars().count());
    }

    #[test]
    fn falls_back_to_document_start() {
        let text = "never opened\"";
        assert_eq!(walk_to_delimiters(text, 3), QuoteSpan::new(0, 12));
    }

    #[test]
    fn no_delimiters_at_all() {
        assert_eq!(walk_to_delimiters("plain", 2), QuoteSpan::new(0, 5));
        assert_eq!(walk_to_delimiters("", 0), QuoteSpan::new(0, 0));
    }

    #[test]
    fn single_quote_ends_the_walk() {
        let text = r#""it's""#;
        // cursor right after the opening double quote
        assert_eq!(walk_to_delimiters(text, 1), QuoteSpan::new(1, 3));
    }

    #[test]
    fn offset_past_end_is_clamped() {
        assert_eq!(walk_to_delimiters("ab\"cd", 50), QuoteSpan::new(3, 5));
    }

    #[test]
    fn empty_span_between_adjacent_quotes() {
        let span = walk_to_delimiters(r#"a""b"#, 2);
        assert!(span.is_empty());
        assert_eq!(span.range(), 2..2);
    }

    #[test]
    fn inverted_span_is_empty() {
        let span = QuoteSpan { start: 4, end: 1 };
        assert_eq!(span.len(), 0);
        assert!(span.is_empty());
        assert_eq!(span.slice("abcdef"), "");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "span start 3 is past its end 2")]
    fn new_rejects_inverted_bounds() {
        QuoteSpan::new(3, 2);
    }

    #[test]
    fn slice_counts_chars() {
        let text = "«\"héllo\"»";
        let span = walk_to_delimiters(text, 3);
        assert_eq!(span, QuoteSpan::new(2, 7));
        assert_eq!(span.slice(text), "héllo");
    }
}
