use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quotesel::{create_service, find_enclosing_span, logging};
use tower_lsp::Server;

#[derive(Debug, Parser)]
#[command(name = "quotesel", version, about = "Select the contents of the quoted string around the cursor")]
struct Cli {
    /// Default log filter, overridden by QUOTESEL_LOG.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the language server on stdio (the default).
    Serve,
    /// Print the quoted span around a char offset in a file.
    Find {
        /// File to scan.
        file: PathBuf,
        /// Cursor position as a count of chars before it, after line-ending canonicalization.
        #[arg(long)]
        offset: usize,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            serve().await;
            Ok(ExitCode::SUCCESS)
        }
        Command::Find { file, offset } => find(&file, offset),
    }
}

async fn serve() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = create_service();
    Server::new(stdin, stdout, socket).serve(service).await;
}

fn find(file: &Path, offset: usize) -> Result<ExitCode> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    match find_enclosing_span(&text, offset)? {
        Some(span) => {
            println!("{} {}", span.start, span.end);
            println!("{}", span.slice(&text));
            Ok(ExitCode::SUCCESS)
        }
        None => {
            tracing::info!(offset, "cursor is not inside quotes");
            Ok(ExitCode::FAILURE)
        }
    }
}
