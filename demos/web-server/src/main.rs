//! Example web server showing flash messages across a redirect.
//!
//! Run with: cargo run -p web-server-demo
//!
//! Then open http://localhost:3000 in your browser. Set `FLASHKIT_CONFIG` to
//! point at a different configuration file.

use std::{path::Path, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{Query, Request, State},
    response::{Html, Redirect},
    routing::get,
};
use flashkit_core::{FlashClass, FlashMessage};
use flashkit_session::{FlashExt, MemoryStore, Session, SessionError};
use flashkit_view::{ViewError, Views};
use flashkit_web::{AppConfig, FlashModifier, flashes_handler};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tower_sessions::ExpiredDeletion;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Templates and `config.json` live next to this crate's manifest.
const DEMO_DIR: &str = env!("CARGO_MANIFEST_DIR");

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
struct Notify {
    class: Option<FlashClass>,
    text: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config_path = std::env::var("FLASHKIT_CONFIG")
        .unwrap_or_else(|_| format!("{DEMO_DIR}/config.json"));
    let config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Using default configuration ({config_path}: {e})");
            AppConfig::default().with_base_dir(Path::new(DEMO_DIR))
        }
    };

    let mut views = Views::new(config.view.clone());
    views.set_templates("index", ["partial/notify"]);
    views.add_modifier(FlashModifier);
    let views = Arc::new(views);

    let store = MemoryStore::new();
    let session_layer = config.session.layer(store.clone())?;
    tokio::spawn(sweep_expired(store));

    // Build router
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/notify", get(notify_handler))
        .route("/flashes", get(flashes_handler))
        .with_state(views)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!("Server listening on http://{}", config.address);

    let listener = tokio::net::TcpListener::bind(config.address).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn sweep_expired(store: MemoryStore) {
    let mut interval = tokio::time::interval(SWEEP_INTERVAL);
    loop {
        interval.tick().await;
        if let Err(e) = store.delete_expired().await {
            tracing::warn!("Failed to delete expired sessions: {e}");
        }
    }
}

async fn index_handler(
    State(views): State<Arc<Views>>,
    request: Request,
) -> Result<Html<String>, ViewError> {
    views.new_view().render(request.extensions()).await
}

async fn notify_handler(
    session: Session,
    Query(notify): Query<Notify>,
) -> Result<Redirect, SessionError> {
    match notify.class {
        Some(class) => {
            session
                .add_flash(FlashMessage::new(notify.text, class))
                .await?;
        }
        None => session.add_flash(notify.text).await?,
    }
    Ok(Redirect::to("/"))
}
