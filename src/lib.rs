//! Select-inside-quotes language server.
//!
//! The core lives in [`finder`]: given a document and a cursor offset it
//! finds the contents of the quoted string around the cursor. The server
//! exposes it through `textDocument/selectionRange` and the
//! `quotesel.selectInsideQuotes` command.

use std::sync::OnceLock;

use serde_json::Value;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService};
use tracing::{debug, info, warn};

mod document;
pub mod finder;
mod lsp;
pub mod logging;
pub mod settings;

pub use document::{normalize_line_endings, DocumentState, DocumentStore, LineIndex};
pub use finder::{find_enclosing_span, QuoteSpan, QuoteSpanFinder, SpanError};
pub use lsp::{
    commands, parse_arguments, select_inside_quotes, selection_ranges, CommandError,
    SELECT_INSIDE_QUOTES,
};
pub use settings::{discover_settings, load_settings, Settings};

pub struct Backend {
    client: Client,
    documents: DocumentStore,
    settings: OnceLock<Settings>,
    client_shows_documents: OnceLock<bool>,
}

impl Backend {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            settings: OnceLock::new(),
            client_shows_documents: OnceLock::new(),
        }
    }

    fn settings(&self) -> &Settings {
        self.settings.get_or_init(Settings::default)
    }

    fn on_document_change(&self, uri: Url, text: String, version: i32) {
        let state = self.documents.open(uri.clone(), text, version);
        debug!(%uri, version, chars = state.line_index.len(), "document updated");
    }

    /// Whether a command result is pushed to the client via `window/showDocument`.
    fn shows_selection(&self) -> bool {
        let client_support = self.client_shows_documents.get().copied().unwrap_or(false);
        self.settings().command.show_document && client_support
    }

    /// Ask the client to select `range`, if both sides allow it.
    async fn apply_selection(&self, uri: Url, range: Range) {
        if !self.shows_selection() {
            return;
        }

        let params = ShowDocumentParams {
            uri,
            external: None,
            take_focus: Some(true),
            selection: Some(range),
        };
        match self.client.show_document(params).await {
            Ok(true) => {}
            Ok(false) => debug!("client declined to show document"),
            Err(e) => warn!(error = %e, "window/showDocument failed"),
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let workspace_root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|f| f.uri.to_file_path().ok())
            .or_else(|| {
                #[allow(deprecated)]
                params.root_uri.as_ref()?.to_file_path().ok()
            });

        let settings = match workspace_root {
            Some(root) => {
                let (settings, settings_dir) = settings::discover_settings(&root);
                info!(root = %root.display(), settings_dir = %settings_dir.display(), "workspace");
                settings
            }
            None => Settings::default(),
        };
        let _ = self.settings.set(settings);

        let shows_documents = params
            .capabilities
            .window
            .as_ref()
            .and_then(|w| w.show_document.as_ref())
            .map(|s| s.support)
            .unwrap_or(false);
        let _ = self.client_shows_documents.set(shows_documents);

        let settings = self.settings();
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                selection_range_provider: settings
                    .selection
                    .range_provider
                    .then_some(SelectionRangeProviderCapability::Simple(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: lsp::commands(),
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("server initialized");
        self.client
            .log_message(MessageType::INFO, "quotesel language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!(open_documents = self.documents.len(), "shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.on_document_change(
            params.text_document.uri,
            params.text_document.text,
            params.text_document.version,
        );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // FULL sync: exactly one change carrying the whole text
        if let Some(change) = params.content_changes.into_iter().next() {
            self.on_document_change(
                params.text_document.uri,
                change.text,
                params.text_document.version,
            );
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        debug!(uri = %params.text_document.uri, "document closed");
        self.documents.close(&params.text_document.uri);
    }

    async fn selection_range(
        &self,
        params: SelectionRangeParams,
    ) -> Result<Option<Vec<SelectionRange>>> {
        let uri = &params.text_document.uri;

        let Some(doc) = self.documents.get(uri) else {
            debug!(%uri, "selection range for unknown document");
            return Ok(None);
        };

        Ok(Some(lsp::selection_ranges(
            &doc,
            &params.positions,
            self.settings().selection.document_parent,
        )))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        if params.command != SELECT_INSIDE_QUOTES {
            return Err(CommandError::UnknownCommand(params.command).into());
        }

        let position = lsp::parse_arguments(params.arguments)?;
        let range = lsp::select_inside_quotes(&self.documents, &position)?;
        debug!(
            uri = %position.text_document.uri,
            position = ?position.position,
            ?range,
            "select inside quotes"
        );

        let Some(range) = range else {
            return Ok(None);
        };

        self.apply_selection(position.text_document.uri, range).await;
        let value = serde_json::to_value(range).map_err(|e| {
            warn!(error = %e, "failed to encode range");
            tower_lsp::jsonrpc::Error::internal_error()
        })?;
        Ok(Some(value))
    }
}

pub fn create_service() -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::new(Backend::new)
}
