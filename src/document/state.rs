//! Document state management for the language server.

use std::sync::Arc;

use dashmap::DashMap;
use tower_lsp::lsp_types::{Position, Range, Url};

use crate::finder::{find_enclosing_span, QuoteSpan, SpanError};

use super::text::LineIndex;

/// State for a single open document.
#[derive(Debug, Clone)]
pub struct DocumentState {
    /// Pre-computed line index over the canonicalized text.
    pub line_index: LineIndex,
    /// Document version from the client.
    pub version: i32,
}

impl DocumentState {
    pub fn new(source: String, version: i32) -> Self {
        Self {
            line_index: LineIndex::new(source),
            version,
        }
    }

    /// The canonicalized document text.
    pub fn text(&self) -> &str {
        self.line_index.source()
    }

    /// Find the quoted contents around the char `offset`.
    pub fn span_at_offset(&self, offset: usize) -> Result<Option<QuoteSpan>, SpanError> {
        find_enclosing_span(self.text(), offset)
    }

    /// Find the quoted contents around an LSP position, as an LSP range.
    ///
    /// Returns None when the position's line does not exist.
    pub fn range_at_position(
        &self,
        position: Position,
    ) -> Option<Result<Option<Range>, SpanError>> {
        let offset = self.line_index.position_to_offset(position)?;
        Some(
            self.span_at_offset(offset)
                .map(|span| span.map(|s| self.line_index.span_to_range(&s.range()))),
        )
    }
}

/// Thread-safe storage for open documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Arc<DocumentState>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Open or replace a document with the given source text.
    pub fn open(&self, uri: Url, source: String, version: i32) -> Arc<DocumentState> {
        let state = Arc::new(DocumentState::new(source, version));
        self.documents.insert(uri, Arc::clone(&state));
        state
    }

    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Get a snapshot of a document's state.
    pub fn get(&self, uri: &Url) -> Option<Arc<DocumentState>> {
        self.documents.get(uri).map(|r| Arc::clone(&r))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
