//! Application-wide error types.
//!
//! Persistence and plumbing code returns [`Error`]; the domain service
//! translates it into [`crate::library::ServiceError`] before anything
//! leaves the service boundary. CLI/main uses `anyhow` for convenient
//! error propagation.
//!
//! # Example
//!
//! ```ignore
//! use song_library::error::{Result, ResultExt};
//!
//! async fn count(pool: &SqlitePool) -> Result<i64> {
//!     let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM songs")
//!         .fetch_one(pool)
//!         .await
//!         .with_context("count songs")?;
//!     Ok(n)
//! }
//! ```

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Referenced row does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness constraint violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid input reaching the persistence layer
    #[error("Invalid input: {0}")]
    Invalid(#[from] crate::model::ValidationError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a not found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create a conflict error.
    pub fn conflict(what: impl Into<String>) -> Self {
        Self::Conflict(what.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// The error with all context layers peeled off.
    pub fn root(&self) -> &Error {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// True when the underlying cause is a missing row.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.root(),
            Self::NotFound(_) | Self::Database(sqlx::Error::RowNotFound)
        )
    }

    /// True when the underlying cause is a uniqueness violation.
    pub fn is_conflict(&self) -> bool {
        match self.root() {
            Self::Conflict(_) => true,
            Self::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Database(e).context(ctx))
    }
}
