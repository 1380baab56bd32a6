//! `eventsapi` command-line entry point.
//!
//! # Responsibility
//! - Resolve catalog config and optional file logging.
//! - Run one past-event search and print the records as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eventsapi_core::{
    default_log_level, init_logging, ClientConfig, EventService, EventsClient,
    DEFAULT_PAST_EVENT_QUOTA,
};
use log::info;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "eventsapi", version, about = "Search past events in the events catalog")]
struct Cli {
    /// JSON config file; `EVENTS_API_*` environment variables are used otherwise.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Upper bound on the total time spent across all month queries.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    /// Log level for the file logger; only meaningful with `--log-dir`.
    #[arg(long, global = true, requires = "log_dir")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Every past event with the tag over the last N years.
    Past {
        #[arg(long)]
        tag: String,
        #[arg(long, default_value_t = 1)]
        years: u32,
        /// Request full event details.
        #[arg(long)]
        full: bool,
    },
    /// The N most recent past events with the tag.
    Recent {
        #[arg(long)]
        tag: String,
        #[arg(long, default_value_t = DEFAULT_PAST_EVENT_QUOTA)]
        quota: u32,
        /// Request full event details.
        #[arg(long)]
        full: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let config = match cli.config.as_deref() {
        Some(path) => ClientConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ClientConfig::from_env().context("loading config from environment")?,
    };

    let mut service = EventService::new(EventsClient::http(config)?);
    if let Some(seconds) = cli.timeout_secs {
        service = service.with_time_budget(Duration::from_secs(seconds));
    }

    let events = match &cli.command {
        Command::Past { tag, years, full } => service.past_events_by_tag(tag, *years, *full)?,
        Command::Recent { tag, quota, full } => {
            service.past_month_events_by_tag(tag, *quota, *full)?
        }
    };
    info!("event=cli_done module=cli status=ok count={}", events.len());

    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}
