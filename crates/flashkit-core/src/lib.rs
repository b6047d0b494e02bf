//! Core flash message handling.
//!
//! This crate provides the fundamental building blocks:
//! - `FlashMessage` / `FlashClass` - Message record and severity
//! - `Flash` - Stored value, classified at read time
//! - `render_html` / `render_json` - Output for templates and AJAX clients
//! - `RenderContext` - Data handed to templates
//! - `FlashSource` - Drain-once list of pending flashes

pub mod context;
pub mod flash;
pub mod message;
pub mod render;
pub mod traits;

pub use context::{ContextValue, RenderContext};
pub use flash::{Flash, classify};
pub use message::{FlashClass, FlashMessage, UnknownClass};
pub use render::{FLASH_KEY, modify, render_html, render_json};
pub use traits::FlashSource;
