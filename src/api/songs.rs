//! Song endpoints.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::dto::{
    CoupletsQuery, CreateSongRequest, SongCoupletsResponse, SongDto, SongsQuery, SongsResponse,
    UpdateSongRequest,
};
use super::error::ApiError;
use super::params;
use crate::model::{SongId, SongUpdate};

type ApiResult<T> = Result<T, ApiError>;

fn parse_song_id(raw: &str) -> ApiResult<SongId> {
    raw.parse()
        .map_err(|e| ApiError::InvalidPath(format!("parse songID: {}", e)))
}

fn required(value: Option<i64>, name: &str) -> ApiResult<i64> {
    value.ok_or_else(|| ApiError::InvalidQuery(format!("{} is required", name)))
}

/// `POST /songs`
pub async fn create_song(
    State(state): State<AppState>,
    body: Result<Json<CreateSongRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SongDto>)> {
    let Json(req) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    req.validate().map_err(ApiError::InvalidBody)?;

    let song = state.service.create_song(&req.song, &req.group).await?;
    Ok((StatusCode::CREATED, Json(song.into())))
}

/// `GET /songs`
pub async fn get_songs(
    State(state): State<AppState>,
    query: Result<Query<SongsQuery>, QueryRejection>,
) -> ApiResult<Json<SongsResponse>> {
    let Query(query) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let pagination = params::pagination(
        required(query.page, "page")?,
        required(query.per_page, "per_page")?,
    )
    .map_err(ApiError::InvalidQuery)?;
    let filters = query.filters().map_err(ApiError::InvalidQuery)?;

    let songs = state
        .service
        .get_songs_filtered_paginated(&filters, pagination)
        .await?;

    Ok(Json(SongsResponse {
        songs: songs.into_iter().map(SongDto::from).collect(),
    }))
}

/// `GET /songs/{id}/couplets`
pub async fn get_song_couplets(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<CoupletsQuery>, QueryRejection>,
) -> ApiResult<Json<SongCoupletsResponse>> {
    let id = parse_song_id(&id)?;
    let Query(query) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let pagination = params::pagination(
        required(query.couplets_page, "couplets_page")?,
        required(query.couplets_per_page, "couplets_per_page")?,
    )
    .map_err(ApiError::InvalidQuery)?;

    let couplets = state
        .service
        .get_song_couplets_paginated(id, pagination)
        .await?;

    Ok(Json(SongCoupletsResponse {
        song_couplets: couplets,
    }))
}

/// `PUT /songs/{id}`
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateSongRequest>, JsonRejection>,
) -> ApiResult<Json<SongDto>> {
    let id = parse_song_id(&id)?;
    let Json(req) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let update = SongUpdate::from(req);
    update
        .validate()
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let song = state.service.update_song(id, &update).await?;
    Ok(Json(song.into()))
}

/// `DELETE /songs/{id}`
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_song_id(&id)?;
    state.service.delete_song(id).await?;
    Ok(StatusCode::OK)
}
