//! Song-info integration - fetches release date, lyrics and link for a song.
//!
//! # Architecture
//!
//! Same split as any external API we talk to:
//! - **Domain models** (`domain.rs`) - [`SongInfo`] and [`SongInfoError`]
//! - **API DTOs** (`dto.rs`) - Exact response shape of the upstream service
//! - **Adapter** (`adapter.rs`) - Converts DTOs to domain models
//! - **Client** (`client.rs`) - HTTP client for the upstream service
//! - **Traits** (`traits.rs`) - [`SongInfoApi`] seam used by the song service
//!
//! # Usage
//!
//! ```ignore
//! use song_library::songinfo::{SongInfoApi, SongInfoClient};
//!
//! let client = SongInfoClient::new(&config.song_info)?;
//! let info = client.get_song_info("XLR8", "REAPER").await?;
//! println!("released {}", info.release_date);
//! ```

mod adapter;
mod client;
pub mod domain;
pub mod dto;
pub mod traits;

pub use client::SongInfoClient;
pub use domain::{SongInfo, SongInfoError};
pub use traits::SongInfoApi;
