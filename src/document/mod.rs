//! Document state management and text utilities.
//!
//! This module provides:
//! - `normalize_line_endings` for canonicalizing `\r\n` and `\r` to `\n`
//! - `LineIndex` for char offset <-> LSP position conversion
//! - `DocumentState` and `DocumentStore` for document lifecycle management

mod state;
mod text;

pub use state::{DocumentState, DocumentStore};
pub use text::{normalize_line_endings, LineIndex};
