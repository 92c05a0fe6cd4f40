//! ytcommenter CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ytcommenter::{
    error::Result,
    models::Config,
    pipeline::{self, TokioSleeper},
    services::{TemplateComposer, YouTubeClient},
};

/// ytcommenter - comment on recent videos that lack the marker
#[derive(Parser, Debug)]
#[command(
    name = "ytcommenter",
    version,
    about = "Search recent videos and leave a marker comment on each new one"
)]

struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run full pipeline: Discover → Check → Comment
    Run {
        /// Check videos but do not post or wait
        #[arg(long)]
        dry_run: bool,
    },

    /// Only search and list the videos that would be checked
    Discover,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match Config::load_for_run(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration rejected: {}", e);
            return Err(e);
        }
    };
    log::info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Run { dry_run } => {
            config.require_credentials(!dry_run)?;

            let platform = YouTubeClient::new(&config.api)?;
            let composer = TemplateComposer::from_config(&config.comments);
            let report =
                pipeline::run_pipeline(&config, &platform, &composer, &TokioSleeper, dry_run)
                    .await;

            log::info!(
                "Commented on {} of {} discovered videos",
                report.commented.len(),
                report.discovered.len()
            );
        }

        Command::Discover => {
            config.require_credentials(false)?;

            let platform = YouTubeClient::new(&config.api)?;
            let discovery = pipeline::run_discovery(&config, &platform).await;

            for video in &discovery.videos {
                println!("{}", video.watch_url());
            }
            log::info!(
                "Discovered {} videos with {} searches",
                discovery.videos.len(),
                discovery.searches_issued
            );
        }

        Command::Validate => {
            log::info!("✓ Config OK ({} search terms)", config.search.terms.len());
            if let Err(e) = config.require_credentials(true) {
                log::warn!("{}", e);
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
