//! Trait seam between the song service and persistence.
//!
//! [`SqliteSongRepository`](crate::db::SqliteSongRepository) is the
//! production implementation; tests can substitute the mocks below.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{NewSong, Pagination, Song, SongFilters, SongId, SongUpdate};

/// Persistence operations for songs.
///
/// Implementations return raw (context-wrapped) errors; translating them
/// into [`ServiceError`](super::ServiceError) is the service's job.
#[async_trait]
pub trait SongRepository: Send + Sync {
    /// Atomically upsert the group, insert the song and its couplets, then
    /// return the stored song.
    async fn save_song(&self, song: NewSong) -> Result<Song>;

    async fn song_exists_by_id(&self, id: SongId) -> Result<bool>;

    /// Exact match on both the song name and the group name.
    async fn song_exists_by_name_and_group(&self, name: &str, group_name: &str) -> Result<bool>;

    async fn get_song_by_id(&self, id: SongId) -> Result<Song>;

    /// Songs matching every present filter, ordered by ID.
    async fn get_songs_filtered_paginated(
        &self,
        filters: &SongFilters,
        pagination: Pagination,
    ) -> Result<Vec<Song>>;

    /// One page of a song's couplets in order. Does not check that the song
    /// exists.
    async fn get_song_couplets_paginated(
        &self,
        id: SongId,
        pagination: Pagination,
    ) -> Result<Vec<String>>;

    /// Atomically apply `update` and return the updated song.
    async fn update_song(&self, id: SongId, update: &SongUpdate) -> Result<Song>;

    /// Delete a song; deleting a missing song is not an error.
    async fn delete_song(&self, id: SongId) -> Result<()>;
}
