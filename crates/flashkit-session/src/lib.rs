//! Sessions carrying flash messages, built on `tower-sessions`.
//!
//! Provides:
//! - `FlashExt` - Flash slot on `tower_sessions::Session`
//! - `SessionConfig` - Cookie settings, turned into a `SessionManagerLayer`
//! - Storage implementations (memory)

pub mod config;
pub mod flash;
pub mod storage;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub use config::{CookieOptions, SessionConfig};
pub use flash::{FLASHES_KEY, FlashExt};
#[cfg(feature = "memory")]
pub use storage::MemoryStore;
pub use tower_sessions::{Session, SessionManagerLayer};

/// Session error.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error("Invalid cookie {field}: {value:?}")]
    InvalidAttribute { field: &'static str, value: String },
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        tracing::error!("Session failure: {self}");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
