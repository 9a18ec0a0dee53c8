//! Trait seam between the song service and the song-info integration.
//!
//! Production code uses [`SongInfoClient`](super::SongInfoClient); tests
//! substitute the mocks below.

use async_trait::async_trait;

use super::domain::{SongInfo, SongInfoError};

/// Look up enrichment data for a song.
#[async_trait]
pub trait SongInfoApi: Send + Sync {
    async fn get_song_info(
        &self,
        song_name: &str,
        group_name: &str,
    ) -> Result<SongInfo, SongInfoError>;
}

#[async_trait]
impl SongInfoApi for super::client::SongInfoClient {
    async fn get_song_info(
        &self,
        song_name: &str,
        group_name: &str,
    ) -> Result<SongInfo, SongInfoError> {
        self.get_song_info(song_name, group_name).await
    }
}
