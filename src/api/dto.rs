//! Request and response bodies of the HTTP API.
//!
//! Field names follow the public JSON contract (camelCase) and are decoupled
//! from the domain types in [`crate::model`].

use serde::{Deserialize, Serialize};

use crate::model::{DATE_FORMAT, MusicGroup, Song, SongFilters, SongUpdate};

use super::params;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDto {
    pub id: String,
    pub name: String,
    pub release_date: String,
    pub couplets: Vec<String>,
    pub link: String,
    pub group: MusicGroupDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicGroupDto {
    pub id: String,
    pub name: String,
}

impl From<MusicGroup> for MusicGroupDto {
    fn from(group: MusicGroup) -> Self {
        Self {
            id: group.id.to_string(),
            name: group.name,
        }
    }
}

impl From<Song> for SongDto {
    fn from(song: Song) -> Self {
        Self {
            id: song.id.to_string(),
            name: song.name,
            release_date: song.release_date.format(DATE_FORMAT).to_string(),
            couplets: song.couplets,
            link: song.link,
            group: song.music_group.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SongsResponse {
    pub songs: Vec<SongDto>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongCoupletsResponse {
    pub song_couplets: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSongRequest {
    pub song: String,
    pub group: String,
}

impl CreateSongRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.song.is_empty() {
            return Err("song name is required".to_string());
        }
        if self.group.is_empty() {
            return Err("group name is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSongRequest {
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub couplets: Option<Vec<String>>,
    pub link: Option<String>,
}

impl From<UpdateSongRequest> for SongUpdate {
    fn from(req: UpdateSongRequest) -> Self {
        Self {
            name: req.name,
            release_date: req.release_date,
            couplets: req.couplets,
            link: req.link,
        }
    }
}

/// Query string of `GET /songs`.
#[derive(Debug, Deserialize)]
pub struct SongsQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub song: Option<String>,
    pub group: Option<String>,
    pub link: Option<String>,
    pub text_contains: Option<String>,
    pub release_date_range: Option<String>,
}

impl SongsQuery {
    pub fn filters(&self) -> Result<SongFilters, String> {
        let release_date_range = self
            .release_date_range
            .as_deref()
            .map(params::parse_date_range)
            .transpose()
            .map_err(|e| format!("parse release date range: {}", e))?;

        Ok(SongFilters {
            song_name: self.song.clone(),
            group_name: self.group.clone(),
            link: self.link.clone(),
            couplet_contains: self.text_contains.clone(),
            release_date_range,
        })
    }
}

/// Query string of `GET /songs/{id}/couplets`.
#[derive(Debug, Deserialize)]
pub struct CoupletsQuery {
    pub couplets_page: Option<i64>,
    pub couplets_per_page: Option<i64>,
}
