//! Template views with pre-render modifiers.
//!
//! Provides:
//! - `Views` - Shared registry of configuration, templates and modifiers
//! - `View` - Per-request render
//! - `ViewModifier` - Hook run before each render

pub mod modifier;
pub mod view;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub use modifier::{BoxError, ViewModifier};
pub use view::{Templates, View, ViewConfig, Views};

/// View error.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("No root template set")]
    NoTemplate,
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("View modifier failed: {0}")]
    Modifier(#[source] BoxError),
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        tracing::error!("Failed to render view: {self}");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
