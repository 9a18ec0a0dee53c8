//! HTTP transport for the song library.
//!
//! All routes live under `/api/v1`:
//!
//! | Method | Path                    | Handler                     |
//! |--------|-------------------------|-----------------------------|
//! | POST   | `/songs`                | [`songs::create_song`]       |
//! | GET    | `/songs`                | [`songs::get_songs`]         |
//! | GET    | `/songs/:id/couplets`   | [`songs::get_song_couplets`] |
//! | PUT    | `/songs/:id`            | [`songs::update_song`]       |
//! | DELETE | `/songs/:id`            | [`songs::delete_song`]       |
//!
//! Each request is handled inside a `request` span carrying a fresh request
//! ID, which is also returned in the `X-Request-ID` response header.

pub mod dto;
mod error;
mod params;
pub mod songs;

use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::library::SongService;

pub use error::{ApiError, ErrorBody};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SongService>,
}

impl AppState {
    pub fn new(service: SongService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let songs = Router::new()
        .route("/songs", post(songs::create_song).get(songs::get_songs))
        .route(
            "/songs/:id",
            put(songs::update_song).delete(songs::delete_song),
        )
        .route("/songs/:id/couplets", get(songs::get_song_couplets))
        .with_state(state);

    Router::new()
        .nest("/api/v1", songs)
        .layer(middleware::from_fn(request_id))
}

async fn request_id(req: Request, next: Next) -> Response {
    let request_id = Uuid::now_v7().to_string();
    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let mut response = next.run(req).instrument(span.clone()).await;
    span.in_scope(|| info!(status = response.status().as_u16(), "request completed"));

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
