//! Core data models for the song library.
//!
//! Defines the primary entities: [`Song`] and [`MusicGroup`], plus the value
//! types used to query and patch them ([`Pagination`], [`SongFilters`],
//! [`TimeRange`], [`SongUpdate`]).
//!
//! # Database Schema
//!
//! The models map to the following tables:
//! - `music_groups` - Groups with unique names
//! - `songs` - One row per song, referencing its group
//! - `song_couplets` - Ordered lyric segments, keyed by (song, couplet number)

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use uuid::Uuid;

/// Date format used for release dates everywhere outside the song-info API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identifier of a song.
///
/// UUIDv7, so IDs sort by creation time both as bytes and as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct SongId(pub Uuid);

impl SongId {
    /// Allocate a fresh, time-ordered ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SongId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A music group (band or artist) owning songs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicGroup {
    /// Database ID (assigned on first use of the name)
    pub id: Uuid,
    /// Group name (unique)
    pub name: String,
}

/// A song with its lyric text split into couplets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub id: SongId,
    pub name: String,
    pub music_group: MusicGroup,
    /// Lyric segments in authored order
    pub couplets: Vec<String>,
    pub release_date: NaiveDate,
    /// Canonical source URL
    pub link: String,
}

/// A song that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewSong {
    pub name: String,
    pub music_group_name: String,
    pub couplets: Vec<String>,
    pub release_date: NaiveDate,
    pub link: String,
}

/// Offset/limit window over an ordered listing.
///
/// `page` is zero-based. A `per_page` of 0 always yields an empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// SQL `LIMIT` for this page.
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    /// SQL `OFFSET` for this page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.per_page)
    }
}

/// Inclusive date range. Construct through [`TimeRange::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TimeRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Optional predicates for song listings. All present predicates must hold.
#[derive(Debug, Clone, Default)]
pub struct SongFilters {
    /// Exact song name
    pub song_name: Option<String>,
    /// Exact group name
    pub group_name: Option<String>,
    /// Exact link
    pub link: Option<String>,
    /// Case-insensitive substring of any couplet, matched literally
    pub couplet_contains: Option<String>,
    pub release_date_range: Option<TimeRange>,
}

/// Sparse patch for a song. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct SongUpdate {
    pub name: Option<String>,
    /// Release date as `YYYY-MM-DD`
    pub release_date: Option<String>,
    /// Full replacement for the couplet sequence
    pub couplets: Option<Vec<String>>,
    pub link: Option<String>,
}

impl SongUpdate {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.release_date.is_none()
            && self.couplets.is_none()
            && self.link.is_none()
    }

    /// True when at least one `songs` column would be written.
    pub fn has_scalar_changes(&self) -> bool {
        self.name.is_some() || self.release_date.is_some() || self.link.is_some()
    }

    /// Parse the textual release date, if present.
    pub fn parsed_release_date(&self) -> Result<Option<NaiveDate>, ValidationError> {
        self.release_date
            .as_deref()
            .map(|raw| {
                NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
            })
            .transpose()
    }

    /// Boundary validation: at least one field, at least one couplet when
    /// couplets are given, and a well-formed date.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        if self.couplets.as_ref().is_some_and(Vec::is_empty) {
            return Err(ValidationError::NoCouplets);
        }
        self.parsed_release_date()?;
        Ok(())
    }
}

/// Rejections raised while building requests, before any persistence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("date range start date {start} is after end date {end}")]
    InvalidTimeRange { start: NaiveDate, end: NaiveDate },

    #[error("update object should have at least one field")]
    EmptyUpdate,

    #[error("song should have at least one couplet")]
    NoCouplets,

    #[error("date \"{0}\" has invalid format, expected YYYY-MM-DD")]
    InvalidDate(String),
}
