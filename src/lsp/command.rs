//! `workspace/executeCommand` support for the select-inside-quotes command.

use serde_json::Value;
use thiserror::Error;
use tower_lsp::jsonrpc;
use tower_lsp::lsp_types::{Range, TextDocumentPositionParams, Url};

use crate::document::DocumentStore;
use crate::finder::SpanError;

/// Command id advertised in `executeCommandProvider`.
pub const SELECT_INSIDE_QUOTES: &str = "quotesel.selectInsideQuotes";

/// All commands the server handles.
pub fn commands() -> Vec<String> {
    vec![SELECT_INSIDE_QUOTES.to_string()]
}

/// Errors raised while executing a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("expected exactly one text document position argument, got {0}")]
    ArgumentCount(usize),

    #[error("invalid command argument: {0}")]
    InvalidArgument(#[from] serde_json::Error),

    #[error("document {0} is not open")]
    UnknownDocument(Url),

    #[error("position {line}:{character} is outside the document")]
    InvalidPosition { line: u32, character: u32 },

    #[error(transparent)]
    Span(#[from] SpanError),
}

impl From<CommandError> for jsonrpc::Error {
    fn from(err: CommandError) -> Self {
        let code = match err {
            CommandError::UnknownCommand(_) => jsonrpc::ErrorCode::MethodNotFound,
            _ => jsonrpc::ErrorCode::InvalidParams,
        };
        jsonrpc::Error {
            code,
            message: err.to_string().into(),
            data: None,
        }
    }
}

/// Decode the single `TextDocumentPositionParams` argument of the command.
pub fn parse_arguments(arguments: Vec<Value>) -> Result<TextDocumentPositionParams, CommandError> {
    let count = arguments.len();
    let mut arguments = arguments.into_iter();
    match (arguments.next(), count) {
        (Some(argument), 1) => Ok(serde_json::from_value(argument)?),
        _ => Err(CommandError::ArgumentCount(count)),
    }
}

/// Resolve the inside-quotes range for a position in an open document.
pub fn select_inside_quotes(
    documents: &DocumentStore,
    params: &TextDocumentPositionParams,
) -> Result<Option<Range>, CommandError> {
    let uri = &params.text_document.uri;
    let position = params.position;

    let state = documents
        .get(uri)
        .ok_or_else(|| CommandError::UnknownDocument(uri.clone()))?;

    let range = state
        .range_at_position(position)
        .ok_or(CommandError::InvalidPosition {
            line: position.line,
            character: position.character,
        })??;

    Ok(range)
}
