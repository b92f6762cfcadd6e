//! LSP protocol feature implementations.
//!
//! This module provides implementations for LSP features:
//! - Selection ranges covering the contents of the quoted string at a position
//! - The `quotesel.selectInsideQuotes` command

mod command;
mod selection;

pub use command::{
    commands, parse_arguments, select_inside_quotes, CommandError, SELECT_INSIDE_QUOTES,
};
pub use selection::selection_ranges;
