//! Vidsrc lookup from the terminal
//!
//! `vidsrc chat` runs the lookup dialogue on stdin/stdout, `vidsrc search`
//! prints the candidates for a single query.

mod transport;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use vidsrc_core::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use vidsrc_core::{ClientConfig, DialogueController, Extractor};

#[derive(Debug, Parser)]
#[command(name = "vidsrc", version, about = "Find vidsrc playback links by title")]
struct Cli {
    /// Title database to search
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive lookup dialogue (default)
    Chat,
    /// Print the candidates for one query
    Search {
        /// Title to search for
        #[arg(required = true)]
        query: Vec<String>,

        /// Print candidates as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = Extractor::with_config(ClientConfig {
        base_url: cli.base_url,
        timeout_secs: cli.timeout_secs,
        ..ClientConfig::default()
    })?;

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => {
            let controller = DialogueController::new(extractor);
            transport::run_console(
                &controller,
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            )
            .await?;
        }
        Command::Search { query, json } => {
            let candidates = extractor.try_search(&query.join(" ")).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&candidates)?);
            } else if candidates.is_empty() {
                println!("No results found.");
            } else {
                for (i, candidate) in candidates.iter().enumerate() {
                    println!("{}. {} [{}]", i + 1, candidate, candidate.external_id);
                }
            }
        }
    }

    Ok(())
}
