//! Song-info API Data Transfer Objects
//!
//! `GET {info_path}?song=<name>&group=<group>` answers with a single JSON
//! object. Release dates use the `DD.MM.YYYY` layout.

use serde::{Deserialize, Serialize};

/// Successful song-info response
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongInfoResponse {
    /// Release date, e.g. "16.07.2006"
    pub release_date: String,
    /// Full lyric text
    pub text: String,
    /// Canonical link
    pub link: String,
}
