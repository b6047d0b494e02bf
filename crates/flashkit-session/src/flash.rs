//! Flash slot kept inside a `tower-sessions` session.

use async_trait::async_trait;
use flashkit_core::Flash;
use serde_json::Value;
use tower_sessions::Session;

use crate::SessionError;

/// Session key holding the pending flashes.
pub const FLASHES_KEY: &str = "flashkit.flashes";

/// Flash slot operations on a session.
///
/// Flashes are appended in order and drained all at once, so each survives
/// exactly one read.
#[async_trait]
pub trait FlashExt {
    /// Append a flash to the end of the slot.
    async fn add_flash<F>(&self, flash: F) -> Result<(), SessionError>
    where
        F: Into<Flash> + Send;

    /// Read and clear the slot. Draining an empty slot changes nothing.
    async fn flashes(&self) -> Result<Vec<Flash>, SessionError>;

    /// Read the slot without clearing it.
    async fn peek_flashes(&self) -> Result<Vec<Flash>, SessionError>;
}

#[async_trait]
impl FlashExt for Session {
    async fn add_flash<F>(&self, flash: F) -> Result<(), SessionError>
    where
        F: Into<Flash> + Send,
    {
        let flash = flash.into();
        let mut flashes = self.peek_flashes().await?;
        flashes.push(flash);
        self.insert(FLASHES_KEY, flashes).await?;
        Ok(())
    }

    async fn flashes(&self) -> Result<Vec<Flash>, SessionError> {
        let flashes = self.peek_flashes().await?;
        if !flashes.is_empty() {
            self.remove::<Value>(FLASHES_KEY).await?;
        }
        Ok(flashes)
    }

    async fn peek_flashes(&self) -> Result<Vec<Flash>, SessionError> {
        Ok(self.get(FLASHES_KEY).await?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{
            Request, StatusCode,
            header::{COOKIE, SET_COOKIE},
        },
        response::Response,
        routing::get,
    };
    use flashkit_core::FlashMessage;
    use tower::ServiceExt as _;

    use super::*;
    use crate::{MemoryStore, SessionConfig};

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::new()), None)
    }

    #[tokio::test]
    async fn test_flashes_drain_in_order() {
        let session = session();
        session.add_flash(FlashMessage::success("Success test.")).await.unwrap();
        session.add_flash("Just a string.").await.unwrap();
        session.add_flash(123_i32).await.unwrap();

        assert_eq!(
            session.flashes().await.unwrap(),
            vec![
                Flash::from(FlashMessage::success("Success test.")),
                Flash::from("Just a string."),
                Flash::from(123_i32),
            ]
        );
        assert!(session.flashes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_peek_keeps_flashes() {
        let session = session();
        session.add_flash("keep").await.unwrap();

        assert_eq!(session.peek_flashes().await.unwrap().len(), 1);
        assert_eq!(session.flashes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_flashes() {
        let session = session();
        let clone = session.clone();
        clone.add_flash("shared").await.unwrap();

        assert_eq!(session.flashes().await.unwrap(), vec![Flash::from("shared")]);
    }

    #[tokio::test]
    async fn test_draining_empty_slot_is_not_a_change() {
        let session = session();
        assert!(session.flashes().await.unwrap().is_empty());
        assert!(!session.is_modified());
    }

    async fn add_flash(session: Session) -> Result<StatusCode, SessionError> {
        session.add_flash(FlashMessage::success("Saved.")).await?;
        Ok(StatusCode::SEE_OTHER)
    }

    async fn count_flashes(session: Session) -> Result<String, SessionError> {
        Ok(session.flashes().await?.len().to_string())
    }

    async fn noop() -> StatusCode {
        StatusCode::OK
    }

    fn app(store: MemoryStore) -> Router {
        Router::new()
            .route("/add", get(add_flash))
            .route("/count", get(count_flashes))
            .route("/noop", get(noop))
            .layer(SessionConfig::default().layer(store).unwrap())
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_untouched_session_sets_no_cookie() {
        let response = app(MemoryStore::new())
            .oneshot(get_request("/noop", None))
            .await
            .unwrap();
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_flash_survives_one_redirect() {
        let store = MemoryStore::new();
        let app = app(store.clone());

        let response = app.clone().oneshot(get_request("/add", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        let cookie = set_cookie.split(';').next().unwrap().to_string();
        assert_eq!(store.len().unwrap(), 1);

        let response = app
            .clone()
            .oneshot(get_request("/count", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(body_text(response).await, "1");
        // Nothing is left in the session, so nothing is kept for it.
        assert!(store.is_empty().unwrap());

        let response = app
            .oneshot(get_request("/count", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(body_text(response).await, "0");
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_drained_sessions_do_not_accumulate() {
        let store = MemoryStore::new();
        let app = app(store.clone());

        for _ in 0..50 {
            let response = app.clone().oneshot(get_request("/add", None)).await.unwrap();
            let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
            let cookie = set_cookie.split(';').next().unwrap().to_string();

            app.clone()
                .oneshot(get_request("/count", Some(&cookie)))
                .await
                .unwrap();
        }
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_bogus_cookie_starts_fresh_session() {
        let response = app(MemoryStore::new())
            .oneshot(get_request("/count", Some("sess=bogus")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "0");
    }
}
