//! Flash messages for axum views and AJAX clients.
//!
//! Provides:
//! - `FlashModifier` - View modifier placing rendered flashes in the template
//! - `send_flashes` / `flashes_handler` - JSON responder for AJAX
//! - `AppConfig` - JSON configuration for session and views

pub mod ajax;
pub mod config;
pub mod modify;

pub use ajax::{flashes_handler, send_flashes};
pub use config::{AppConfig, ConfigError};
pub use modify::FlashModifier;
