//! Database module for song and music group persistence.
//!
//! Uses SQLx with SQLite for lightweight, embedded database storage.
//! Provides:
//! - Pool setup and schema migrations ([`init_db`])
//! - The song repository ([`SqliteSongRepository`])
//! - Composable filter conditions ([`query`])
//!
//! # Example
//!
//! ```ignore
//! use song_library::db::{init_db, SqliteSongRepository};
//!
//! let pool = init_db("sqlite:songs.db", 5).await?;
//! let repository = SqliteSongRepository::new(pool);
//! ```

pub mod query;
mod songs;

use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub use songs::SqliteSongRepository;

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "song_library.db";

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current directory.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool and runs all pending migrations. Foreign keys are enforced on every
/// pooled connection (SQLx's default), which the couplet cascade relies on.
///
/// # Errors
///
/// Returns an error if:
/// - Database creation fails
/// - Connection cannot be established
/// - Migration fails
pub async fn init_db(db_url: &str, max_connections: u32) -> crate::error::Result<SqlitePool> {
    if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
        tracing::info!(url = db_url, "creating database");
        sqlx::Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(db_url)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Apply any pending migrations from `./migrations`.
pub async fn run_migrations(pool: &SqlitePool) -> crate::error::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::debug!("database migrations applied");
    Ok(())
}
