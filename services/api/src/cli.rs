use crate::commands::{run_catalog_audit, run_quote, CatalogArgs, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use quote_desk::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Quote Desk",
    about = "Run the plan eligibility service or quote a client from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Quote every active plan for a client and print the result
    Quote(QuoteArgs),
    /// Inspect the reference catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Report rules and plans whose references the engine would skip
    Audit(CatalogArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override QUOTE_CATALOG_PATH
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Override QUOTE_RULES_PATH
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote(args) => run_quote(args),
        Command::Catalog {
            command: CatalogCommand::Audit(args),
        } => run_catalog_audit(args),
    }
}
