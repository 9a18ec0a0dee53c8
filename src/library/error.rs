//! Error kinds produced by the song service.

/// Failure kinds visible outside the service.
///
/// Everything that is not one of the first three kinds collapses into
/// `Internal` after being logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("song not found")]
    NotFound,

    #[error("song already exists")]
    AlreadyExists,

    #[error("integration error")]
    Integration,

    #[error("internal error")]
    Internal,
}

/// Result type for service operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
