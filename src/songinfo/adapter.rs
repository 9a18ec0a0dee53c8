//! Adapter layer: Convert song-info DTOs to domain models

use chrono::NaiveDate;

use super::domain::{SongInfo, SongInfoError};
use super::dto;

/// Release date layout used by the song-info API
const RELEASE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Convert a song-info response to a [`SongInfo`]
pub fn to_song_info(response: dto::SongInfoResponse) -> Result<SongInfo, SongInfoError> {
    let release_date = NaiveDate::parse_from_str(&response.release_date, RELEASE_DATE_FORMAT)
        .map_err(|e| {
            SongInfoError::Parse(format!(
                "parse release date {:?}: {}",
                response.release_date, e
            ))
        })?;

    Ok(SongInfo {
        release_date,
        text: response.text,
        link: response.link,
    })
}
