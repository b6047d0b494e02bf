//! Pre-render hooks.

use async_trait::async_trait;
use axum::http::Extensions;
use flashkit_core::RenderContext;

/// Error a modifier may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Hook run before every render.
///
/// Receives the current request's extensions (where per-request state such
/// as the session lives) and may mutate the render context. A failing
/// modifier fails the render.
#[async_trait]
pub trait ViewModifier: Send + Sync {
    /// Adjust `ctx` for the current request.
    async fn modify(
        &self,
        extensions: &Extensions,
        ctx: &mut RenderContext,
    ) -> Result<(), BoxError>;
}
