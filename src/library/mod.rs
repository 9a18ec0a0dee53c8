//! Song library domain layer.
//!
//! [`SongService`] sits between the transport and persistence. It owns the
//! registration pipeline and is the single place where persistence and
//! integration failures are turned into [`ServiceError`] kinds.

mod error;
pub mod service;
pub mod traits;

pub use error::{ServiceError, ServiceResult};
pub use service::{SongService, split_couplets};
pub use traits::SongRepository;
