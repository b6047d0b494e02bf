//! Flashes as JSON for AJAX clients.

use axum::{
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use flashkit_core::render_json;
use flashkit_session::{FlashExt, Session};

/// Drain the session's flashes and answer with them as a JSON array.
///
/// The body is `[{"Message":..,"Class":..},..]` in insertion order; no
/// template is involved.
pub async fn send_flashes(session: &Session) -> Response {
    let flashes = match session.flashes().await {
        Ok(flashes) => flashes,
        Err(e) => return e.into_response(),
    };

    match render_json(flashes) {
        Ok(body) => ([(CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize flashes: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Axum handler for [`send_flashes`]; needs a session layer.
pub async fn flashes_handler(session: Session) -> Response {
    send_flashes(&session).await
}
