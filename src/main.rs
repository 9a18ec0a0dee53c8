//! Song Library - a catalog of songs and their lyrics behind an HTTP API.
//!
//! New songs are registered by name and group; release date, lyrics and a
//! canonical link are fetched from an external song-info service. Stored
//! songs can be listed with filters, read couplet by couplet, patched and
//! deleted.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod library;
pub mod model;
pub mod songinfo;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use config::{LogFormat, LoggingConfig};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let (mut config, source) = config::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);

    init_logging(&config.logging)?;
    match source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("No config file found, using defaults"),
    }

    cli::run_command(&args, config)
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("song_library={}", logging.level))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true).with_span_list(true))
            .init(),
    }

    Ok(())
}
