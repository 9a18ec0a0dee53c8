//! Song service - orchestrates registration, reads, updates and deletes.
//!
//! Registering a song is a three step pipeline:
//! 1. Reject the request if the (name, group) pair is already stored
//! 2. Look up release date, lyrics and link from the song-info service
//! 3. Split the lyrics into couplets and persist everything atomically
//!
//! Every failure leaving this module is a [`ServiceError`]. Errors that do not
//! map onto a specific kind are logged here, with their full context chain,
//! and then reported as [`ServiceError::Internal`].

use std::sync::Arc;

use tracing::{error, info};

use super::error::{ServiceError, ServiceResult};
use super::traits::SongRepository;
use crate::error::Error;
use crate::model::{NewSong, Pagination, Song, SongFilters, SongId, SongUpdate};
use crate::songinfo::{SongInfoApi, SongInfoError};

/// Separator between couplets in song-info lyric text.
pub const COUPLET_SEPARATOR: &str = "\n\n";

/// Split lyric text into couplets on blank lines.
///
/// No trimming or filtering: `"a\n\n\n\nb"` yields an empty middle couplet.
pub fn split_couplets(text: &str) -> Vec<String> {
    text.split(COUPLET_SEPARATOR).map(str::to_string).collect()
}

/// Domain service over a song repository and a song-info source.
pub struct SongService {
    repository: Arc<dyn SongRepository>,
    song_info: Arc<dyn SongInfoApi>,
}

impl SongService {
    pub fn new(repository: Arc<dyn SongRepository>, song_info: Arc<dyn SongInfoApi>) -> Self {
        Self {
            repository,
            song_info,
        }
    }

    /// Register a new song, enriching it from the song-info service.
    pub async fn create_song(&self, name: &str, group: &str) -> ServiceResult<Song> {
        let exists = self
            .repository
            .song_exists_by_name_and_group(name, group)
            .await
            .map_err(|e| internal("check song existence", e))?;
        if exists {
            return Err(ServiceError::AlreadyExists);
        }

        let info = self
            .song_info
            .get_song_info(name, group)
            .await
            .map_err(integration)?;

        let new_song = NewSong {
            name: name.to_string(),
            music_group_name: group.to_string(),
            couplets: split_couplets(&info.text),
            release_date: info.release_date,
            link: info.link,
        };

        let song = self.repository.save_song(new_song).await.map_err(|e| {
            if e.is_conflict() {
                ServiceError::AlreadyExists
            } else {
                internal("save song", e)
            }
        })?;

        info!(song_id = %song.id, couplets = song.couplets.len(), "song created");
        Ok(song)
    }

    /// One page of a song's couplets. The song must exist.
    pub async fn get_song_couplets_paginated(
        &self,
        id: SongId,
        pagination: Pagination,
    ) -> ServiceResult<Vec<String>> {
        let exists = self
            .repository
            .song_exists_by_id(id)
            .await
            .map_err(|e| internal("check song existence", e))?;
        if !exists {
            return Err(ServiceError::NotFound);
        }

        self.repository
            .get_song_couplets_paginated(id, pagination)
            .await
            .map_err(|e| internal("get song couplets", e))
    }

    /// Songs matching `filters`, ordered by ID. No match is an empty page.
    pub async fn get_songs_filtered_paginated(
        &self,
        filters: &SongFilters,
        pagination: Pagination,
    ) -> ServiceResult<Vec<Song>> {
        self.repository
            .get_songs_filtered_paginated(filters, pagination)
            .await
            .map_err(|e| internal("get filtered songs", e))
    }

    pub async fn update_song(&self, id: SongId, update: &SongUpdate) -> ServiceResult<Song> {
        let song = self
            .repository
            .update_song(id, update)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    ServiceError::NotFound
                } else if e.is_conflict() {
                    ServiceError::AlreadyExists
                } else {
                    internal("update song", e)
                }
            })?;

        info!(song_id = %id, "song updated");
        Ok(song)
    }

    /// Delete a song. Deleting a song that does not exist succeeds.
    pub async fn delete_song(&self, id: SongId) -> ServiceResult<()> {
        self.repository
            .delete_song(id)
            .await
            .map_err(|e| internal("delete song", e))?;

        info!(song_id = %id, "song deleted");
        Ok(())
    }
}

fn internal(operation: &'static str, e: Error) -> ServiceError {
    error!(operation, error = %e, "song service failure");
    ServiceError::Internal
}

fn integration(e: SongInfoError) -> ServiceError {
    if e.is_upstream() {
        error!(operation = "get song info", error = %e, "song-info service failure");
        ServiceError::Integration
    } else {
        error!(operation = "get song info", error = %e, "song-info request failure");
        ServiceError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::traits::mocks::{FailingRepository, StaleDedupCheck};
    use crate::songinfo::traits::mocks::MockSongInfo;
    use crate::test_utils::{date, new_song, temp_repository};
    use proptest::prelude::*;
    use tempfile::TempDir;

    async fn service_with(song_info: Arc<MockSongInfo>) -> (SongService, TempDir) {
        let (repo, dir) = temp_repository().await;
        (SongService::new(Arc::new(repo), song_info), dir)
    }

    fn failing_service() -> SongService {
        SongService::new(
            Arc::new(FailingRepository),
            Arc::new(MockSongInfo::with_text("a")),
        )
    }

    #[test]
    fn test_split_couplets() {
        assert_eq!(split_couplets("line1\n\nline2"), vec!["line1", "line2"]);
        assert_eq!(split_couplets("single"), vec!["single"]);
        assert_eq!(split_couplets("a\nb\n\nc"), vec!["a\nb", "c"]);
        assert_eq!(split_couplets("a\n\n\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_couplets(""), vec![""]);
    }

    #[tokio::test]
    async fn test_create_song_enriches_and_splits() {
        let mock = Arc::new(MockSongInfo::with_text("line1\n\nline2"));
        let (service, _dir) = service_with(mock.clone()).await;

        let song = service.create_song("XLR8", "REAPER").await.unwrap();

        assert_eq!(song.name, "XLR8");
        assert_eq!(song.music_group.name, "REAPER");
        assert_eq!(song.couplets, vec!["line1", "line2"]);
        assert_eq!(song.release_date, date(2006, 7, 16));
        assert_eq!(song.link, "https://www.youtube.com/watch?v=Xsp3_a-PMTw");
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_create_is_rejected_before_lookup() {
        let mock = Arc::new(MockSongInfo::with_text("line1\n\nline2"));
        let (service, _dir) = service_with(mock.clone()).await;

        let first = service.create_song("XLR8", "REAPER").await.unwrap();
        let second = service.create_song("XLR8", "REAPER").await;

        assert_eq!(second.unwrap_err(), ServiceError::AlreadyExists);
        assert_eq!(mock.calls(), 1);

        let stored = service
            .get_songs_filtered_paginated(&SongFilters::default(), Pagination::new(0, 10))
            .await
            .unwrap();
        assert_eq!(stored, vec![first]);
    }

    #[tokio::test]
    async fn test_duplicate_missed_by_precheck_is_already_exists() {
        let (repo, _dir) = temp_repository().await;
        let first = repo
            .save_song(new_song("XLR8", "REAPER", &["a"]))
            .await
            .unwrap();
        let mock = Arc::new(MockSongInfo::with_text("other\n\ntext"));
        let service = SongService::new(Arc::new(StaleDedupCheck(repo)), mock.clone());

        let err = service.create_song("XLR8", "REAPER").await.unwrap_err();

        assert_eq!(err, ServiceError::AlreadyExists);
        // The lookup ran; the insert was rejected by the store
        assert_eq!(mock.calls(), 1);
        let stored = service
            .get_songs_filtered_paginated(&SongFilters::default(), Pagination::new(0, 10))
            .await
            .unwrap();
        assert_eq!(stored, vec![first]);
    }

    #[tokio::test]
    async fn test_same_name_in_other_group_is_allowed() {
        let mock = Arc::new(MockSongInfo::with_text("x"));
        let (service, _dir) = service_with(mock).await;

        service.create_song("XLR8", "REAPER").await.unwrap();
        service.create_song("XLR8", "Other").await.unwrap();
    }

    #[tokio::test]
    async fn test_upstream_failure_is_integration_error() {
        let mock = Arc::new(MockSongInfo::with_error(SongInfoError::Network(
            "connection refused".into(),
        )));
        let (service, _dir) = service_with(mock).await;

        let err = service.create_song("XLR8", "REAPER").await.unwrap_err();
        assert_eq!(err, ServiceError::Integration);

        let status = Arc::new(MockSongInfo::with_error(SongInfoError::Status {
            status: 500,
            body: String::new(),
        }));
        let (service, _dir) = service_with(status).await;
        let err = service.create_song("XLR8", "REAPER").await.unwrap_err();
        assert_eq!(err, ServiceError::Integration);
    }

    #[tokio::test]
    async fn test_local_lookup_failure_is_internal() {
        let mock = Arc::new(MockSongInfo::with_error(SongInfoError::Request(
            "bad url".into(),
        )));
        let (service, _dir) = service_with(mock).await;

        let err = service.create_song("XLR8", "REAPER").await.unwrap_err();
        assert_eq!(err, ServiceError::Internal);
    }

    #[tokio::test]
    async fn test_failed_lookup_persists_nothing() {
        let mock = Arc::new(MockSongInfo::with_error(SongInfoError::Parse("eof".into())));
        let (service, _dir) = service_with(mock).await;

        service.create_song("XLR8", "REAPER").await.unwrap_err();
        let stored = service
            .get_songs_filtered_paginated(&SongFilters::default(), Pagination::new(0, 10))
            .await
            .unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_couplets_of_missing_song_is_not_found() {
        let (service, _dir) = service_with(Arc::new(MockSongInfo::with_text("a"))).await;

        let err = service
            .get_song_couplets_paginated(SongId::generate(), Pagination::new(0, 10))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[tokio::test]
    async fn test_couplet_pages() {
        let (service, _dir) =
            service_with(Arc::new(MockSongInfo::with_text("a\n\nb\n\nc"))).await;
        let song = service.create_song("XLR8", "REAPER").await.unwrap();

        let page = service
            .get_song_couplets_paginated(song.id, Pagination::new(1, 2))
            .await
            .unwrap();
        assert_eq!(page, vec!["c"]);

        let empty = service
            .get_song_couplets_paginated(song.id, Pagination::new(0, 0))
            .await
            .unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (service, _dir) = service_with(Arc::new(MockSongInfo::with_text("A\n\nB"))).await;
        let song = service.create_song("XLR8", "REAPER").await.unwrap();

        let update = SongUpdate {
            couplets: Some(vec!["X".to_string()]),
            ..Default::default()
        };
        let updated = service.update_song(song.id, &update).await.unwrap();
        assert_eq!(updated.couplets, vec!["X"]);

        service.delete_song(song.id).await.unwrap();
        let err = service
            .get_song_couplets_paginated(song.id, Pagination::new(0, 10))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[tokio::test]
    async fn test_update_missing_song_is_not_found() {
        let (service, _dir) = service_with(Arc::new(MockSongInfo::with_text("a"))).await;
        let update = SongUpdate {
            name: Some("Ghost".into()),
            ..Default::default()
        };

        let err = service
            .update_song(SongId::generate(), &update)
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[tokio::test]
    async fn test_rename_onto_existing_song_is_already_exists() {
        let (repo, _dir) = temp_repository().await;
        repo.save_song(new_song("Taken", "REAPER", &["a"])).await.unwrap();
        let other = repo.save_song(new_song("Free", "REAPER", &["b"])).await.unwrap();
        let service = SongService::new(Arc::new(repo), Arc::new(MockSongInfo::with_text("a")));

        let update = SongUpdate {
            name: Some("Taken".into()),
            ..Default::default()
        };
        let err = service.update_song(other.id, &update).await.unwrap_err();
        assert_eq!(err, ServiceError::AlreadyExists);
    }

    #[tokio::test]
    async fn test_delete_missing_song_succeeds() {
        let (service, _dir) = service_with(Arc::new(MockSongInfo::with_text("a"))).await;
        service.delete_song(SongId::generate()).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_failures_are_internal() {
        let service = failing_service();
        let id = SongId::generate();
        let page = Pagination::new(0, 10);
        let update = SongUpdate {
            name: Some("x".into()),
            ..Default::default()
        };

        assert_eq!(
            service.create_song("XLR8", "REAPER").await.unwrap_err(),
            ServiceError::Internal
        );
        assert_eq!(
            service
                .get_song_couplets_paginated(id, page)
                .await
                .unwrap_err(),
            ServiceError::Internal
        );
        assert_eq!(
            service
                .get_songs_filtered_paginated(&SongFilters::default(), page)
                .await
                .unwrap_err(),
            ServiceError::Internal
        );
        assert_eq!(
            service.update_song(id, &update).await.unwrap_err(),
            ServiceError::Internal
        );
        assert_eq!(
            service.delete_song(id).await.unwrap_err(),
            ServiceError::Internal
        );
    }

    proptest! {
        /// Joining the couplets back gives the original text.
        #[test]
        fn split_couplets_rejoins(text in "[a-z\n]{0,40}") {
            let couplets = split_couplets(&text);
            prop_assert!(!couplets.is_empty());
            prop_assert_eq!(couplets.join(COUPLET_SEPARATOR), text);
        }
    }
}
