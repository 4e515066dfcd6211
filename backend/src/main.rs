//! Weather Advisor - command-line front end
//!
//! Aggregates 3-hourly forecasts into daily summaries and turns them into
//! advice for farmers and travelers.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use shared::{CurrentConditions, ObservationPoint};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod services;

use crate::config::{Config, OutputFormat};
use crate::error::{AppError, AppResult};
use crate::external::openweathermap;
use crate::services::{reporting, AdvisoryService};

const DEFAULT_FILTER: &str = "wxa=info,weather_advisor_backend=info";
const VERBOSE_FILTER: &str = "wxa=debug,weather_advisor_backend=debug";

/// Weather Advisor CLI
#[derive(Parser)]
#[command(name = "wxa")]
#[command(author, version, about = "Forecast aggregation and weather advice", long_about = None)]
struct Cli {
    /// Extra configuration file layered over config/{environment}.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format, overrides output.format
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a forecast into daily summaries
    Summarize {
        /// Forecast document
        #[arg(long)]
        forecast: PathBuf,

        #[arg(long, value_enum, default_value_t = Provider::Raw)]
        provider: Provider,
    },

    /// Build recommendations for a persona
    Recommend {
        /// agriculture or travel
        #[arg(long)]
        persona: String,

        /// Current conditions document
        #[arg(long)]
        current: PathBuf,

        /// Forecast document
        #[arg(long)]
        forecast: PathBuf,

        #[arg(long, value_enum, default_value_t = Provider::Raw)]
        provider: Provider,

        /// JSON threshold file; fields it sets replace the configured values
        #[arg(long)]
        thresholds: Option<PathBuf>,
    },

    /// Print the effective threshold configuration
    Thresholds,
}

/// Shape of the input documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Provider {
    /// Observation list and conditions object as used by the advisor
    Raw,
    /// OpenWeatherMap current weather and 5 day / 3 hour forecast
    Openweathermap,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    tracing::info!(environment = %config.environment, "Starting Weather Advisor");

    if let Err(e) = run(cli.command, &config) {
        tracing::error!(code = e.code(), "{}", e);
        return Err(e.into());
    }
    Ok(())
}

fn init_tracing(verbose: bool, json: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new(VERBOSE_FILTER)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER))
    };

    // stdout carries the command output
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(command: Commands, config: &Config) -> AppResult<()> {
    let service = AdvisoryService::from_config(config);

    match command {
        Commands::Summarize { forecast, provider } => {
            let points = load_points(&forecast, provider)?;
            let daily = service.summarize(&points);
            tracing::info!(points = points.len(), days = daily.len(), "Forecast summarized");

            match config.output.format {
                OutputFormat::Json => print_json(&daily, config.output.pretty),
                OutputFormat::Csv => {
                    print!("{}", reporting::export_to_csv(&daily)?);
                    Ok(())
                }
            }
        }
        Commands::Recommend {
            persona,
            current,
            forecast,
            provider,
            thresholds,
        } => {
            if let Some(path) = thresholds {
                service.reload_thresholds_from_json(&read(&path)?)?;
            }

            let current = load_current(&current, provider)?;
            let points = load_points(&forecast, provider)?;
            let advisory = service.advise_for(&persona, &current, &points)?;
            tracing::info!(
                persona = %advisory.bundle.persona(),
                alerts = advisory.bundle.alerts().len(),
                "Recommendations built"
            );

            if config.output.format == OutputFormat::Csv {
                tracing::warn!("CSV output only covers summaries, writing JSON");
            }
            print_json(&advisory, config.output.pretty)
        }
        Commands::Thresholds => print_json(service.thresholds().as_ref(), config.output.pretty),
    }
}

fn read(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn load_points(path: &Path, provider: Provider) -> AppResult<Vec<ObservationPoint>> {
    let json = read(path)?;
    match provider {
        Provider::Raw => Ok(shared::parse_observations(&json)?),
        Provider::Openweathermap => openweathermap::decode_forecast(&json),
    }
}

fn load_current(path: &Path, provider: Provider) -> AppResult<CurrentConditions> {
    let json = read(path)?;
    match provider {
        Provider::Raw => Ok(shared::parse_current(&json)?),
        Provider::Openweathermap => openweathermap::decode_current(&json),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> AppResult<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
