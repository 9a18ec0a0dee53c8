//! Command-line interface for song-library.
//!
//! This module provides the `serve`, `migrate` and `lookup` commands.

mod commands;

pub use commands::{Cli, Commands, run_command};
