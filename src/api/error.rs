//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::library::ServiceError;

/// Body of every error response. An empty message is omitted.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,
}

/// Errors returned by handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("parse and validate JSON body: {0}")]
    InvalidBody(String),

    #[error("parse and validate query params: {0}")]
    InvalidQuery(String),

    #[error("parse and validate URI params: {0}")]
    InvalidPath(String),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::InvalidQuery(_) | Self::InvalidPath(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Service(ServiceError::NotFound) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::AlreadyExists) => StatusCode::CONFLICT,
            Self::Service(ServiceError::Integration) => StatusCode::BAD_GATEWAY,
            Self::Service(ServiceError::Internal) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to clients. Server-side failures carry none.
    fn message(&self) -> String {
        match self {
            Self::Service(ServiceError::Integration | ServiceError::Internal) => String::new(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
