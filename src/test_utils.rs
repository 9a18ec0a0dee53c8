//! Test utilities and fixtures for song-library tests.
//!
//! This module provides common test helpers, fixture factories, and
//! database utilities to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use song_library::test_utils::{temp_repository, new_song};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (repo, _dir) = temp_repository().await;
//!     let saved = repo.save_song(new_song("XLR8", "REAPER", &["a"])).await.unwrap();
//!     // ... test logic
//! }
//! ```

use chrono::NaiveDate;
use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

use crate::db::SqliteSongRepository;
use crate::model::NewSong;

/// Creates a temporary database for testing.
///
/// The database is created in a temporary directory that is automatically
/// cleaned up when the returned `TempDir` is dropped. Migrations are run
/// automatically.
///
/// Keep the TempDir alive for the duration of your test.
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_url = crate::db::db_url(Some(&dir.path().join("test.db")));

    let pool = crate::db::init_db(&db_url, 2)
        .await
        .expect("Failed to initialize test database");

    (pool, dir)
}

/// A [`SqliteSongRepository`] over a fresh temporary database.
pub async fn temp_repository() -> (SqliteSongRepository, TempDir) {
    let (pool, dir) = temp_db().await;
    (SqliteSongRepository::new(pool), dir)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Creates a [`NewSong`] with a fixed release date and link.
///
/// Customize the rest with struct update syntax:
///
/// ```ignore
/// let song = NewSong {
///     link: "https://example.com/other".to_string(),
///     ..new_song("XLR8", "REAPER", &["a"])
/// };
/// ```
pub fn new_song(name: &str, group: &str, couplets: &[&str]) -> NewSong {
    NewSong {
        name: name.to_string(),
        music_group_name: group.to_string(),
        couplets: couplets.iter().map(|c| c.to_string()).collect(),
        release_date: date(2006, 7, 16),
        link: "https://www.youtube.com/watch?v=Xsp3_a-PMTw".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_db_creates_working_database() {
        let (pool, _dir) = temp_db().await;

        let (groups,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM music_groups")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(groups, 0);
    }

    #[test]
    fn test_new_song_defaults() {
        let song = new_song("XLR8", "REAPER", &["a", "b"]);
        assert_eq!(song.name, "XLR8");
        assert_eq!(song.music_group_name, "REAPER");
        assert_eq!(song.couplets, vec!["a", "b"]);
        assert_eq!(song.release_date, date(2006, 7, 16));
    }
}
