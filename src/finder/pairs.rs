//! Quote occurrence scanning and pair grouping.
//!
//! Recorded positions use the host's 1-based absolute convention: an opening
//! quote at char index `i` records `i + 1`, a closing quote records `i + 2`.
//! With strict comparisons on both sides, an absolute cursor value is inside
//! a pair exactly when the cursor sits between the two quote characters.

use crate::document::normalize_line_endings;

/// Toggle used while scanning for quote occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Toggle {
    Opening,
    Closing,
}

/// Record the biased position of every occurrence of `quote` in `text`.
///
/// Line endings are canonicalized first, and indices count chars, not bytes.
pub fn locate_quote_pairs(text: &str, quote: char) -> Vec<usize> {
    let text = normalize_line_endings(text);
    let mut positions = Vec::new();
    let mut toggle = Toggle::Opening;

    for (index, c) in text.chars().enumerate() {
        if c != quote {
            continue;
        }
        toggle = match toggle {
            Toggle::Opening => {
                positions.push(index + 1);
                Toggle::Closing
            }
            Toggle::Closing => {
                positions.push(index + 2);
                Toggle::Opening
            }
        };
    }

    positions
}

/// Split `items` into consecutive runs of `size`, the last one possibly shorter.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn group_consecutive<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    items.chunks(size).map(<[T]>::to_vec).collect()
}

/// Check whether the absolute `cursor` lies strictly inside any complete pair.
///
/// Groups that do not hold exactly two positions (an unmatched trailing quote)
/// never match.
pub fn is_inside_any_pair(pairs: &[Vec<usize>], cursor: usize) -> bool {
    pairs.iter().any(|pair| match pair.as_slice() {
        [lo, hi] => *lo < cursor && *hi > cursor,
        _ => false,
    })
}
