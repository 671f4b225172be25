use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playlist_catalog::{
    commands::{run_generation, run_validation},
    config::{Config, defaults::DEFAULT_CONFIG_FILE},
    services::report::print_summary,
};

#[derive(Parser)]
#[command(name = "playlist-catalog")]
#[command(version)]
#[command(about = "Parse, reconcile and validate a curated catalog of M3U playlists")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log level
    #[arg(short = 'v', long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check playlists for unknown channels, duplicate urls and blocked channels
    Validate {
        /// Playlists to check; defaults to every playlist under the streams directory
        files: Vec<PathBuf>,
    },
    /// Reconcile the stream database and write the published playlists
    Generate,
    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("playlist_catalog={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load_from_file(&cli.config)?;

    match cli.command {
        Command::Validate { files } => {
            let summary = run_validation(&config, files).await?;
            print_summary(&summary);
            if summary.has_errors() {
                std::process::exit(summary.exit_code());
            }
        }
        Command::Generate => {
            let written = run_generation(&config).await?;
            info!(
                "Wrote {} playlists to {}",
                written.len(),
                config.storage.output_dir.display()
            );
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}
