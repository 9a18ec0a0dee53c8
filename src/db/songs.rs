//! SQLite implementation of [`SongRepository`].
//!
//! Couplets live in `song_couplets`, numbered from 1 in authored order, and
//! are aggregated back into a JSON array per song when reading. They are
//! never patched individually: updates delete and reinsert the whole
//! sequence inside the same transaction as the scalar changes.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnection, SqlitePool};
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::query;
use crate::error::{Error, Result, ResultExt};
use crate::library::SongRepository;
use crate::model::{MusicGroup, NewSong, Pagination, Song, SongFilters, SongId, SongUpdate};

/// Couplet rows per multi-row `INSERT`, well under SQLite's bind limit.
const COUPLET_BATCH: usize = 250;

/// Take the write lock up front so concurrent writers queue on the busy
/// timeout instead of failing a lock upgrade.
const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

/// Columns shared by every song read, including the ordered couplet array.
const SELECT_SONGS: &str = r#"
    SELECT
        s.id, s.name, s.release_date, s.link,
        mg.id AS music_group_id,
        mg.name AS music_group_name,
        (
            SELECT json_group_array(sc.text ORDER BY sc.couplet_num)
            FROM song_couplets sc
            WHERE sc.song_id = s.id
        ) AS couplets
    FROM songs s
    LEFT JOIN music_groups mg ON s.music_group_id = mg.id
"#;

/// Song row with joined group and aggregated couplets.
#[derive(Debug, sqlx::FromRow)]
struct SongRow {
    id: SongId,
    name: String,
    release_date: NaiveDate,
    link: String,
    music_group_id: Uuid,
    music_group_name: String,
    couplets: Json<Vec<String>>,
}

impl From<SongRow> for Song {
    fn from(row: SongRow) -> Self {
        Song {
            id: row.id,
            name: row.name,
            music_group: MusicGroup {
                id: row.music_group_id,
                name: row.music_group_name,
            },
            couplets: row.couplets.0,
            release_date: row.release_date,
            link: row.link,
        }
    }
}

/// Song repository backed by a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteSongRepository {
    pool: SqlitePool,
}

impl SqliteSongRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn song_exists<'e>(executor: impl SqliteExecutor<'e>, id: SongId) -> sqlx::Result<bool> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM songs s WHERE s.id = ?)")
        .bind(id)
        .fetch_one(executor)
        .await
}

/// Insert `couplets` for `song_id`, numbered 1..N in slice order.
///
/// `text_folded` holds the Unicode lowercase form used by substring search.
async fn insert_couplets(
    conn: &mut SqliteConnection,
    song_id: SongId,
    couplets: &[String],
) -> sqlx::Result<()> {
    for (batch_index, batch) in couplets.chunks(COUPLET_BATCH).enumerate() {
        let first_num = (batch_index * COUPLET_BATCH) as i64 + 1;
        let mut builder = QueryBuilder::<Sqlite>::new(
            "INSERT INTO song_couplets (song_id, couplet_num, text, text_folded) ",
        );
        builder.push_values(batch.iter().enumerate(), |mut row, (i, text)| {
            row.push_bind(song_id)
                .push_bind(first_num + i as i64)
                .push_bind(text.as_str())
                .push_bind(text.to_lowercase());
        });
        builder.build().execute(&mut *conn).await?;
    }
    Ok(())
}

#[async_trait]
impl SongRepository for SqliteSongRepository {
    #[instrument(skip(self, song), fields(song = %song.name, group = %song.music_group_name), level = "debug")]
    async fn save_song(&self, song: NewSong) -> Result<Song> {
        let mut tx = self
            .pool
            .begin_with(BEGIN_WRITE)
            .await
            .with_context("begin transaction")?;

        sqlx::query("INSERT INTO music_groups (id, name) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
            .bind(Uuid::now_v7())
            .bind(&song.music_group_name)
            .execute(&mut *tx)
            .await
            .with_context("upsert music group")?;

        let group_id: Uuid = sqlx::query_scalar("SELECT id FROM music_groups WHERE name = ?")
            .bind(&song.music_group_name)
            .fetch_one(&mut *tx)
            .await
            .with_context("read music group id")?;

        let song_id = SongId::generate();
        sqlx::query(
            "INSERT INTO songs (id, music_group_id, name, release_date, link) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(song_id)
        .bind(group_id)
        .bind(&song.name)
        .bind(song.release_date)
        .bind(&song.link)
        .execute(&mut *tx)
        .await
        .with_context("insert song")?;

        insert_couplets(&mut tx, song_id, &song.couplets)
            .await
            .with_context("insert couplets")?;

        tx.commit().await.with_context("commit")?;
        debug!(%song_id, couplets = song.couplets.len(), "song saved");

        self.get_song_by_id(song_id).await
    }

    async fn song_exists_by_id(&self, id: SongId) -> Result<bool> {
        song_exists(&self.pool, id)
            .await
            .with_context("check song exists")
    }

    async fn song_exists_by_name_and_group(&self, name: &str, group_name: &str) -> Result<bool> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM songs s
                JOIN music_groups mg ON s.music_group_id = mg.id
                WHERE s.name = ? AND mg.name = ?
            )
            "#,
        )
        .bind(name)
        .bind(group_name)
        .fetch_one(&self.pool)
        .await
        .with_context("check song exists by name and group")
    }

    async fn get_song_by_id(&self, id: SongId) -> Result<Song> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_SONGS);
        builder.push(" WHERE s.id = ").push_bind(id);

        builder
            .build_query_as::<SongRow>()
            .fetch_optional(&self.pool)
            .await
            .with_context("get song")?
            .map(Song::from)
            .ok_or_else(|| Error::not_found(format!("song {}", id)))
    }

    #[instrument(skip(self), level = "debug")]
    async fn get_songs_filtered_paginated(
        &self,
        filters: &SongFilters,
        pagination: Pagination,
    ) -> Result<Vec<Song>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_SONGS);
        query::push_where(&mut builder, query::song_filter_conditions(filters));
        builder
            .push(" ORDER BY s.id LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows = builder
            .build_query_as::<SongRow>()
            .fetch_all(&self.pool)
            .await
            .with_context("get filtered songs")?;

        Ok(rows.into_iter().map(Song::from).collect())
    }

    async fn get_song_couplets_paginated(
        &self,
        id: SongId,
        pagination: Pagination,
    ) -> Result<Vec<String>> {
        sqlx::query_scalar(
            r#"
            SELECT sc.text FROM song_couplets sc
            WHERE sc.song_id = ?
            ORDER BY sc.couplet_num
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .with_context("get song couplets")
    }

    #[instrument(skip(self, update), level = "debug")]
    async fn update_song(&self, id: SongId, update: &SongUpdate) -> Result<Song> {
        let release_date = update.parsed_release_date()?;

        let mut tx = self
            .pool
            .begin_with(BEGIN_WRITE)
            .await
            .with_context("begin transaction")?;

        if !song_exists(&mut *tx, id)
            .await
            .with_context("check song exists")?
        {
            return Err(Error::not_found(format!("song {}", id)));
        }

        if update.has_scalar_changes() {
            let mut builder = QueryBuilder::<Sqlite>::new("UPDATE songs SET ");
            let mut set = builder.separated(", ");
            if let Some(name) = &update.name {
                set.push("name = ").push_bind_unseparated(name.as_str());
            }
            if let Some(date) = release_date {
                set.push("release_date = ").push_bind_unseparated(date);
            }
            if let Some(link) = &update.link {
                set.push("link = ").push_bind_unseparated(link.as_str());
            }
            builder.push(" WHERE id = ").push_bind(id);

            builder
                .build()
                .execute(&mut *tx)
                .await
                .with_context("update songs table")?;
        }

        if let Some(couplets) = &update.couplets {
            sqlx::query("DELETE FROM song_couplets WHERE song_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await
                .with_context("delete old couplets")?;

            insert_couplets(&mut tx, id, couplets)
                .await
                .with_context("insert new couplets")?;
        }

        tx.commit().await.with_context("commit")?;

        self.get_song_by_id(id)
            .await
            .with_context("get updated song")
    }

    async fn delete_song(&self, id: SongId) -> Result<()> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context("delete song")?;
        debug!(%id, rows = result.rows_affected(), "song deleted");
        Ok(())
    }
}
