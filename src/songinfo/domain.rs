//! Internal domain models for song-info lookups.
//!
//! These types don't change when the upstream API changes; responses are
//! converted into them in `adapter.rs`.

use chrono::NaiveDate;

/// Enrichment data for a newly registered song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongInfo {
    pub release_date: NaiveDate,
    /// Full lyric text, couplets separated by blank lines
    pub text: String,
    /// Canonical source URL
    pub link: String,
}

/// Errors that can occur while looking up song info
#[derive(Debug, Clone, thiserror::Error)]
pub enum SongInfoError {
    #[error("Failed to build request: {0}")]
    Request(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Response status code {status}, body: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl SongInfoError {
    /// True when the failure originated in the upstream dependency
    /// (unreachable, non-success status, malformed response) rather than
    /// in our own request construction.
    pub fn is_upstream(&self) -> bool {
        !matches!(self, Self::Request(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_classification() {
        assert!(SongInfoError::Network("connection refused".into()).is_upstream());
        assert!(
            SongInfoError::Status {
                status: 503,
                body: String::new()
            }
            .is_upstream()
        );
        assert!(SongInfoError::Parse("eof".into()).is_upstream());
        assert!(!SongInfoError::Request("bad url".into()).is_upstream());
    }

    #[test]
    fn test_status_error_display() {
        let err = SongInfoError::Status {
            status: 404,
            body: "no such song".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("no such song"));
    }
}
