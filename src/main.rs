//! # Company Search CLI (`company-search`)
//!
//! ## Usage
//!
//! ```bash
//! company-search [--config ./config/search.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `company-search convert` | Convert `Alruqee.csv` into `data.json` |
//! | `company-search serve` | Start the HTTP search service |
//! | `company-search search "<query>"` | Run a company-name search from the terminal |
//! | `company-search stats` | Summarize the converted dataset |
//!
//! The config file is optional; without it every setting takes its default
//! and `PORT` alone picks the listening port.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use company_search::{config, convert, search, server, stats};

/// Company Search — convert a company CSV to JSON and serve substring search
/// over it.
#[derive(Parser)]
#[command(
    name = "company-search",
    about = "Company Search — convert a company CSV to JSON and serve substring search over it",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/search.toml`. Built-in defaults are used when
    /// the file does not exist.
    #[arg(long, global = true, default_value = "./config/search.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Convert the CSV export into the JSON data file.
    ///
    /// Reads every row before writing, so a missing or unreadable CSV leaves
    /// any existing data file untouched.
    Convert {
        /// CSV file to read (defaults to `[data].csv_path`, `Alruqee.csv`).
        #[arg(long)]
        input: Option<PathBuf>,

        /// JSON file to write (defaults to `[data].json_path`, `data.json`).
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Start the HTTP search service.
    ///
    /// Loads the JSON data file and serves `GET /api/search?q=<term>`.
    /// Fails to start if the data file is missing or malformed.
    Serve {
        /// Only serve the API; do not serve static files from `[server].static_dir`.
        #[arg(long)]
        no_static: bool,
    },

    /// Search company names from the command line.
    Search {
        /// Case-insensitive substring to look for.
        query: String,

        /// Maximum number of results (defaults to `[search].max_results`).
        #[arg(long)]
        limit: Option<usize>,

        /// Print matches as a JSON array instead of a listing.
        #[arg(long)]
        json: bool,
    },

    /// Summarize the converted dataset.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut cfg = config::Config::load_or_default(&cli.config)?;
    cfg.apply_port_override(std::env::var("PORT").ok())?;

    match cli.command {
        Commands::Convert { input, output } => {
            convert::run_convert(&cfg, input, output)?;
        }
        Commands::Serve { no_static } => {
            if no_static {
                cfg.server.serve_static = false;
            }
            server::run_server(&cfg).await?;
        }
        Commands::Search { query, limit, json } => {
            search::run_search(&cfg, &query, limit, json)?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg)?;
        }
    }

    Ok(())
}
