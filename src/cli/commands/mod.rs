//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `serve`: HTTP server with graceful shutdown
//! - `migrate`: Database creation and schema migrations
//! - `lookup`: One-off song-info request, for checking the integration

mod lookup;
mod migrate;
mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::Config;

pub use lookup::cmd_lookup;
pub use migrate::cmd_migrate;
pub use serve::cmd_serve;

/// Song Library CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the config file (default: OS config directory)
    #[arg(short, long, global = true, env = "SONG_LIBRARY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database URL, e.g. sqlite:songs.db (overrides the config file)
    #[arg(long, global = true, env = "SONG_LIBRARY_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Log level for this crate (overrides the config file)
    #[arg(long, global = true, env = "SONG_LIBRARY_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Address to bind (overrides the config file)
        #[arg(long, env = "SONG_LIBRARY_HOST")]
        host: Option<String>,
        /// Port to bind (overrides the config file)
        #[arg(short, long, env = "SONG_LIBRARY_PORT")]
        port: Option<u16>,
    },
    /// Create the database if needed and apply pending migrations
    Migrate,
    /// Fetch song info from the upstream service and print it
    Lookup {
        /// Song name
        song: String,
        /// Music group name
        group: String,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Commands::Serve { host, port } = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }
    }
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli, config: Config) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    match &cli.command {
        Commands::Serve { .. } => rt.block_on(cmd_serve(config)),
        Commands::Migrate => rt.block_on(cmd_migrate(&config)),
        Commands::Lookup { song, group } => rt.block_on(cmd_lookup(&config, song, group)),
    }
}
