//! Text utilities for position conversion.
//!
//! Offsets here are char offsets into the canonicalized text, matching what
//! the finder works with. LSP positions use UTF-16 columns.

use std::borrow::Cow;

use tower_lsp::lsp_types::{Position, Range};

/// Replace every `\r\n` pair and every lone `\r` with `\n`.
///
/// Borrows the input when it contains no carriage return.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Pre-computed line index for efficient position lookups.
///
/// `\r\n`, `\r` and `\n` are all line terminators in LSP, so positions the
/// client computes against the raw text land on the same line and column in
/// the canonicalized text held here.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Char offset where each line starts.
    line_starts: Vec<usize>,
    /// Canonicalized source text.
    source: String,
    /// `source` split into chars, for column walks by char offset.
    chars: Vec<char>,
}

impl LineIndex {
    /// Build a line index, canonicalizing line endings first.
    pub fn new(source: String) -> Self {
        let source = match normalize_line_endings(&source) {
            Cow::Borrowed(_) => source,
            Cow::Owned(normalized) => normalized,
        };
        let chars: Vec<char> = source.chars().collect();

        let mut line_starts = vec![0];
        for (i, c) in chars.iter().enumerate() {
            if *c == '\n' {
                line_starts.push(i + 1);
            }
        }

        Self {
            line_starts,
            source,
            chars,
        }
    }

    /// Get the canonicalized source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of chars in the canonicalized text.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a char offset to an LSP position. Offsets past the end clamp to the end.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.chars.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let line_start = self.line_starts[line];
        let col: usize = self.chars[line_start..offset]
            .iter()
            .map(|c| c.len_utf16())
            .sum();

        Position::new(line as u32, col as u32)
    }

    /// Convert an LSP position to a char offset.
    ///
    /// Returns None if the line is out of bounds. A column past the end of the
    /// line resolves to the end of the line.
    pub fn position_to_offset(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        let line_start = *self.line_starts.get(line)?;
        let line_end = self
            .line_starts
            .get(line + 1)
            .map(|&next| next - 1) // exclude newline
            .unwrap_or(self.chars.len());

        let mut utf16_col = 0u32;
        for (i, c) in self.chars[line_start..line_end].iter().enumerate() {
            if utf16_col >= position.character {
                return Some(line_start + i);
            }
            utf16_col += c.len_utf16() as u32;
        }

        Some(line_end)
    }

    /// Convert a char span to an LSP range.
    pub fn span_to_range(&self, span: &std::ops::Range<usize>) -> Range {
        Range::new(
            self.offset_to_position(span.start),
            self.offset_to_position(span.end),
        )
    }

    /// The range covering the whole document.
    pub fn document_range(&self) -> Range {
        self.span_to_range(&(0..self.chars.len()))
    }
}
