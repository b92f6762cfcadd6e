//! `textDocument/selectionRange` support.

use tower_lsp::lsp_types::{Position, Range, SelectionRange};
use tracing::debug;

use crate::document::DocumentState;

/// Compute one selection range per requested position.
///
/// Positions inside a quoted string get the string's contents, optionally with
/// the whole document chained as the parent. Any other position gets an empty
/// range at the position itself, since the protocol requires an answer for
/// every position.
pub fn selection_ranges(
    state: &DocumentState,
    positions: &[Position],
    document_parent: bool,
) -> Vec<SelectionRange> {
    positions
        .iter()
        .map(|&position| selection_range_at(state, position, document_parent))
        .collect()
}

fn selection_range_at(
    state: &DocumentState,
    position: Position,
    document_parent: bool,
) -> SelectionRange {
    let range = match state.range_at_position(position) {
        Some(Ok(Some(range))) => range,
        Some(Ok(None)) => return empty_at(position),
        Some(Err(e)) => {
            debug!(?position, error = %e, "no selection range");
            return empty_at(position);
        }
        None => {
            debug!(?position, "position outside document");
            return empty_at(position);
        }
    };

    let document = state.line_index.document_range();
    let parent = (document_parent && document != range).then(|| {
        Box::new(SelectionRange {
            range: document,
            parent: None,
        })
    });

    SelectionRange { range, parent }
}

fn empty_at(position: Position) -> SelectionRange {
    SelectionRange {
        range: Range::new(position, position),
        parent: None,
    }
}
