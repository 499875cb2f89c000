//! # Investiga CLI (`investiga`)
//!
//! Looks up a subject across Brazilian public sources and commercial
//! vendors, cross-references the identifiers found, and prints a dossier.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `investiga search --cpf ... --celular ...` | Run a search and print the dossier |
//! | `investiga validate <kind> <value>` | Check a CPF, CNPJ, CEP, phone, PIS or email |
//! | `investiga history list` | List saved investigations |
//! | `investiga history show <id>` | Print a saved investigation |
//! | `investiga history delete <id>` | Delete a saved investigation |
//!
//! ## Examples
//!
//! ```bash
//! investiga search --cpf 123.456.789-09 --celular "(11) 98765-4321" --format markdown
//! investiga search --nome "Heitor Nogueira Prado" --only-crossed --save
//! investiga validate cnpj 11.222.333/0001-81
//! ```
//!
//! Credentials come from the environment (`DIRECT_DATA_API_KEY`,
//! `DATAJUD_API_KEY`, `HIBP_API_KEY`, `GITHUB_TOKEN`); logging is controlled
//! with `RUST_LOG`.

mod commands;

use clap::{Parser, Subcommand};
use commands::{history::HistoryCommand, search::SearchArgs, validate::ValidateArgs};

/// OSINT lookups with cross-referencing of Brazilian identifiers.
#[derive(Parser)]
#[command(name = "investiga", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Search every provider routed for the given subject fields.
    Search(SearchArgs),

    /// Validate and format a single document.
    Validate(ValidateArgs),

    /// Manage saved investigations.
    #[command(subcommand)]
    History(HistoryCommand),
}

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,investiga=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Search(args) => commands::search::run(args).await,
        Commands::Validate(args) => commands::validate::run(&args),
        Commands::History(command) => commands::history::run(command).await,
    }
}
