//! Configuration system using TOML files.
//!
//! Config is read from the OS-standard config directory unless a path is
//! given on the command line:
//! - Windows: %APPDATA%\song-library\config.toml
//! - macOS: ~/Library/Application Support/song-library/config.toml
//! - Linux: ~/.config/song-library/config.toml
//!
//! Every section has defaults, so a partial (or missing) file is fine. The
//! loaded [`Config`] is passed by value into the constructors that need it;
//! nothing reads configuration globally.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database settings
    pub database: DatabaseConfig,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Song-info integration settings
    pub song_info: SongInfoConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: crate::db::db_url(None),
            max_connections: 5,
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Song-info integration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SongInfoConfig {
    /// Scheme and authority of the upstream service, e.g. "http://localhost:9000"
    pub base_url: String,

    /// Path of the info endpoint
    pub info_path: String,

    /// Request timeout in seconds (0 = no timeout)
    pub timeout_secs: u64,
}

impl Default for SongInfoConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            info_path: "/info".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for this crate when RUST_LOG is unset
    pub level: String,

    /// Output format: "pretty" or "json"
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("song-library"))
}

/// Get the full path to the default config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration.
///
/// With an explicit `path` the file must exist. Without one, the default
/// location is tried and defaults are used if no file is there. A file
/// that exists but does not parse is always an error.
///
/// Also returns the file the config was read from, if any. Nothing is
/// logged here since this runs before the subscriber is installed.
pub fn load(path: Option<&Path>) -> Result<(Config, Option<PathBuf>), ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok((Config::default(), None)),
        },
    };

    let contents =
        std::fs::read_to_string(&path).map_err(|e| ConfigError::Read(path.clone(), e))?;
    let config = parse(&contents).map_err(|e| ConfigError::Parse(path.clone(), e))?;
    Ok((config, Some(path)))
}

/// Parse configuration from TOML text
pub fn parse(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}

// ============================================================================
// Tests
// ============================================================================
