mod output;
mod process;
mod summary;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use prixcarb_core::{AppConfig, FuelType};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "prixcarb")]
#[command(about = "French fuel price open-data processor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a feed and write latest.json and metrics.json
    Process {
        /// Feed XML file (defaults to PRIXCARB_FEED_PATH)
        feed: Option<PathBuf>,
        /// Output directory (defaults to PRIXCARB_OUTPUT_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Also write the full parsed model to sale_points.json
        #[arg(long)]
        full: bool,
    },
    /// Print per-department averages for one fuel
    Summary {
        /// Feed XML file (defaults to PRIXCARB_FEED_PATH)
        feed: Option<PathBuf>,
        /// Fuel type name (e.g., GAZOLE, SP98)
        #[arg(long, default_value = "GAZOLE")]
        fuel: FuelType,
    },
}

fn main() -> anyhow::Result<()> {
    let config = prixcarb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(config.log_ansi())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Process {
            feed,
            output_dir,
            full,
        }) => {
            let feed = resolve_feed(feed, &config)?;
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            process::run_process(&feed, &output_dir, full)
        }
        Some(Commands::Summary { feed, fuel }) => {
            let feed = resolve_feed(feed, &config)?;
            summary::run_summary(&feed, fuel)
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Pick the feed path from the command line, falling back to configuration.
fn resolve_feed(feed: Option<PathBuf>, config: &AppConfig) -> anyhow::Result<PathBuf> {
    feed.or_else(|| config.feed_path.clone()).ok_or_else(|| {
        anyhow::anyhow!("no feed file given; pass one or set PRIXCARB_FEED_PATH")
    })
}
