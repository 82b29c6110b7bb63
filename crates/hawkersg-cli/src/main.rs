mod catalog;
mod hours;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use hawkersg_catalog::{DraftHoursStore, HawkerApiClient, NearbySort, PriceBand, StallQuery};
use hawkersg_core::{AppConfig, Cuisine};
use tracing_subscriber::EnvFilter;

use crate::hours::HoursCommands;

#[derive(Debug, Parser)]
#[command(name = "hawkersg")]
#[command(about = "HawkerSG catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch hawker centres and stalls from the backend and normalize them
    Load {
        /// Print the normalized catalog as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Normalize raw `/hawkers` and `/stalls` JSON dumps from disk
    Normalize {
        /// File holding the raw hawker centre array
        #[arg(long)]
        hawkers: PathBuf,
        /// File holding the raw stall array
        #[arg(long)]
        stalls: PathBuf,
        /// Include per-record diagnostics in the output
        #[arg(long)]
        diagnostics: bool,
    },
    /// Classify free text into a cuisine
    Classify {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Search stalls in the freshly loaded catalog
    Search {
        /// Matches stall name, cuisine or description
        query: Option<String>,
        /// Restrict to one cuisine (e.g., "Chinese", "Western")
        #[arg(long)]
        cuisine: Option<Cuisine>,
        /// Menu price band: <3, 3-5, 6-10, 11-15 or 15+
        #[arg(long)]
        price: Option<PriceBand>,
        #[arg(long)]
        min_rating: Option<f64>,
        /// Only stalls currently marked open
        #[arg(long)]
        open_only: bool,
    },
    /// List hawker centres near a point
    Nearby {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Search radius in kilometres
        #[arg(long, default_value = "5")]
        radius: f64,
        /// Sort by distance or rating
        #[arg(long, default_value = "distance")]
        sort: NearbySort,
    },
    /// Edit and inspect the draft operating hours
    Hours {
        #[command(subcommand)]
        command: HoursCommands,
    },
    /// Show a stall's menu by license number
    Menu { license: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = hawkersg_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, api = %config.api_base_url, "configuration loaded");

    let Some(command) = cli.command else {
        println!("hawkersg: no command given; run with --help for usage");
        return Ok(());
    };

    match command {
        Commands::Load { json } => catalog::run_load(&api_client(&config)?, json).await,
        Commands::Normalize {
            hawkers,
            stalls,
            diagnostics,
        } => catalog::run_normalize(&hawkers, &stalls, diagnostics),
        Commands::Classify { text } => {
            catalog::run_classify(&text);
            Ok(())
        }
        Commands::Search {
            query,
            cuisine,
            price,
            min_rating,
            open_only,
        } => {
            let query = StallQuery {
                text: query,
                cuisine,
                price,
                min_rating,
                open_only,
            };
            catalog::run_search(&api_client(&config)?, &query).await
        }
        Commands::Nearby {
            lat,
            lng,
            radius,
            sort,
        } => catalog::run_nearby(&api_client(&config)?, lat, lng, radius, sort).await,
        Commands::Hours { command } => {
            hours::run_hours(&DraftHoursStore::new(config.hours_draft_path.clone()), command)
        }
        Commands::Menu { license } => catalog::run_menu(&api_client(&config)?, &license).await,
    }
}

fn api_client(config: &AppConfig) -> anyhow::Result<HawkerApiClient> {
    HawkerApiClient::new(
        &config.api_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build backend client")
}

#[cfg(test)]
mod tests;
