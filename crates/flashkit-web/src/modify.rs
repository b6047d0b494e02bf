//! View modifier that renders pending flashes into the template.

use async_trait::async_trait;
use axum::http::Extensions;
use flashkit_core::RenderContext;
use flashkit_session::{FlashExt, Session};
use flashkit_view::{BoxError, ViewModifier};

/// Drains the request's flashes into the render context under
/// [`flashkit_core::FLASH_KEY`].
///
/// Register with [`flashkit_view::Views::add_modifier`]. Requests without a
/// session, or with no pending flashes, leave the context untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlashModifier;

#[async_trait]
impl ViewModifier for FlashModifier {
    async fn modify(
        &self,
        extensions: &Extensions,
        ctx: &mut RenderContext,
    ) -> Result<(), BoxError> {
        let Some(session) = extensions.get::<Session>().cloned() else {
            tracing::debug!("No session on request, skipping flashes");
            return Ok(());
        };

        let mut flashes = session.flashes().await?;
        flashkit_core::modify(&mut flashes, ctx);
        Ok(())
    }
}
