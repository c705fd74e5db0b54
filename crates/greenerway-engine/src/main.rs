//! Command-line engine for `GreenerWay`.
//!
//! Wires the emission advisor and the progress tracker to JSON files that
//! stand in for the external document store.
//!
//! # Startup Sequence
//!
//! 1. Parse the command line
//! 2. Load configuration from `GREENERWAY_CONFIG` or `greenerway-config.yaml`
//! 3. Initialize structured logging (tracing) on stderr
//! 4. Run the subcommand and print its report as JSON on stdout

mod commands;
mod config;
mod error;
mod store;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use greenerway_progress::JourneyFilter;
use greenerway_types::{JourneyId, UserId};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::config::{AppConfig, LoggingConfig};
use crate::error::EngineError;

#[derive(Parser)]
#[command(
    name = "greenerway-engine",
    about = "GreenerWay trip advisor and progress tracker",
    long_about = "Recommend low-emission transport modes, record completed journeys, and report points, levels, badges, and insights."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recommend a transport mode for a trip
    Recommend {
        /// Trip input as JSON
        trip: PathBuf,
    },

    /// Record a completed journey
    Record {
        /// User id issued by the auth provider
        user_id: String,
        /// Journey input as JSON
        journey: PathBuf,
    },

    /// Show points, level, and badge progress
    Progress {
        /// User id issued by the auth provider
        user_id: String,
    },

    /// List recorded journeys, newest first
    History {
        /// User id issued by the auth provider
        user_id: String,
        /// Only journeys of this mode: all, walking, car, or transit
        #[arg(long, default_value = "all", value_parser = parse_filter)]
        mode: JourneyFilter,
    },

    /// Delete one recorded journey (stats are kept)
    Delete {
        /// User id issued by the auth provider
        user_id: String,
        /// Journey id
        journey_id: Uuid,
    },

    /// Show the 30-day conversion opportunity and car trends
    Insights {
        /// User id issued by the auth provider
        user_id: String,
        /// User profile as JSON
        profile: Option<PathBuf>,
    },
}

fn parse_filter(value: &str) -> Result<JourneyFilter, String> {
    match value {
        "all" => Ok(JourneyFilter::All),
        "walking" => Ok(JourneyFilter::Walking),
        "car" => Ok(JourneyFilter::Car),
        "transit" => Ok(JourneyFilter::Transit),
        other => Err(format!("unknown mode `{other}`")),
    }
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the subcommand fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = config::config_path();
    let (config, from_file) = load_config(&config_path)?;
    init_logging(&config.logging);

    info!(
        config_path = %config_path.display(),
        from_file,
        data_dir = %config.storage.data_dir.display(),
        "Configuration loaded"
    );

    run(cli.command, &config).await?;
    Ok(())
}

/// Load the configuration file, or defaults if it does not exist.
fn load_config(path: &Path) -> Result<(AppConfig, bool), EngineError> {
    if path.exists() {
        Ok((AppConfig::from_file(path)?, true))
    } else {
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        Ok((config, false))
    }
}

/// Logs go to stderr so that stdout carries only the JSON report.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(command: Command, config: &AppConfig) -> Result<(), EngineError> {
    match command {
        Command::Recommend { trip } => print_json(&commands::recommend(config, &trip).await?),
        Command::Record { user_id, journey } => {
            let tracker = commands::tracker(config);
            print_json(&commands::record(&tracker, UserId::new(user_id), &journey).await?)
        }
        Command::Progress { user_id } => {
            let tracker = commands::tracker(config);
            print_json(&commands::progress(&tracker, &UserId::new(user_id)).await?)
        }
        Command::History { user_id, mode } => {
            let tracker = commands::tracker(config);
            print_json(&commands::history(&tracker, &UserId::new(user_id), mode).await?)
        }
        Command::Delete {
            user_id,
            journey_id,
        } => {
            let tracker = commands::tracker(config);
            let id = JourneyId::from(journey_id);
            print_json(&commands::delete(&tracker, &UserId::new(user_id), id).await?)
        }
        Command::Insights { user_id, profile } => {
            let tracker = commands::tracker(config);
            let report = commands::insights(
                &tracker,
                config,
                &UserId::new(user_id),
                profile.as_deref(),
            )
            .await?;
            print_json(&report)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), EngineError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
