//! Song-info HTTP client
//!
//! Issues `GET {base_url}{info_path}?song=..&group=..` and converts the
//! response through the adapter. Transport, status and decoding failures are
//! all reported as upstream errors; only request construction is local.

use std::time::Duration;

use super::{adapter, dto};
use super::domain::{SongInfo, SongInfoError};
use crate::config::SongInfoConfig;

/// Song-info API client
pub struct SongInfoClient {
    http_client: reqwest::Client,
    info_url: String,
}

/// User agent string sent with every lookup
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

impl SongInfoClient {
    /// Create a client from configuration
    pub fn new(config: &SongInfoConfig) -> Result<Self, SongInfoError> {
        let mut builder = reqwest::Client::builder().gzip(true).user_agent(USER_AGENT);
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| SongInfoError::Request(e.to_string()))?;

        Ok(Self {
            http_client,
            info_url: info_url(&config.base_url, &config.info_path),
        })
    }

    /// Look up release date, lyrics and link for a song
    pub async fn get_song_info(
        &self,
        song_name: &str,
        group_name: &str,
    ) -> Result<SongInfo, SongInfoError> {
        let response = self.send_info_request(song_name, group_name).await?;
        adapter::to_song_info(response)
    }

    /// Send the HTTP request and parse the response
    async fn send_info_request(
        &self,
        song_name: &str,
        group_name: &str,
    ) -> Result<dto::SongInfoResponse, SongInfoError> {
        tracing::debug!(url = %self.info_url, song = song_name, group = group_name, "requesting song info");

        let response = self
            .http_client
            .get(&self.info_url)
            .query(&[("song", song_name), ("group", group_name)])
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    SongInfoError::Request(e.to_string())
                } else {
                    SongInfoError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(SongInfoError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<dto::SongInfoResponse>()
            .await
            .map_err(|e| SongInfoError::Parse(e.to_string()))
    }
}

fn info_url(base_url: &str, info_path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        info_path.trim_start_matches('/')
    )
}
