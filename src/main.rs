mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Church agenda grouped into seasons, from Google Calendar or an .ics export")]
struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where events are read from. Defaults to Google Calendar, or the bundled
/// agenda when Google is not configured.
#[derive(Args)]
pub struct SourceArgs {
    /// Read events from this .ics file
    #[arg(long, conflicts_with = "builtin")]
    pub ics: Option<PathBuf>,

    /// Use the agenda bundled with this binary
    #[arg(long)]
    pub builtin: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the agenda season by season
    Show {
        #[command(flatten)]
        source: SourceArgs,

        /// Only show this season (1-4)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=4))]
        season: Option<u8>,

        /// Print the agenda as JSON
        #[arg(long)]
        json: bool,
    },
    /// One-line summary of what's coming up
    Insight {
        #[command(flatten)]
        source: SourceArgs,

        /// Gemini API key (overrides gemini_api_key from config)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Ask the assistant about the agenda
    Chat {
        #[command(flatten)]
        source: SourceArgs,

        /// Gemini API key (overrides gemini_api_key from config)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Show config paths and current settings
    Config {
        /// Print the effective configuration as TOML (keys masked)
        #[arg(long)]
        effective: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Show {
            source,
            season,
            json,
        } => commands::show::run(source, season, json).await,
        Commands::Insight { source, api_key } => commands::insight::run(source, api_key).await,
        Commands::Chat { source, api_key } => commands::chat::run(source, api_key).await,
        Commands::Config { effective } => commands::config::run(effective),
    }
}

/// Logs go to stderr so `show --json` stays parseable. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to set up logging")?;

    Ok(())
}
