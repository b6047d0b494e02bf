//! HTML and JSON rendering of pending flashes.

use std::fmt::Write as _;

use crate::{Flash, FlashMessage, RenderContext, flash::classify, traits::FlashSource};

/// Render-context key that receives the flash markup.
pub const FLASH_KEY: &str = "flash";

/// Render flashes as concatenated `<div class="..">..</div>` elements.
///
/// Order is preserved and there is no separator between elements. An empty
/// input renders as an empty string.
#[must_use]
pub fn render_html<I>(flashes: I) -> String
where
    I: IntoIterator<Item = Flash>,
{
    flashes.into_iter().map(classify).fold(String::new(), |mut out, msg| {
        let _ = write!(
            out,
            r#"<div class="{}">{}</div>"#,
            msg.class,
            escape_html(&msg.message)
        );
        out
    })
}

/// Render flashes as a JSON array of `{"Message":..,"Class":..}` objects.
///
/// # Errors
/// Returns error if serialisation fails.
pub fn render_json<I>(flashes: I) -> Result<String, serde_json::Error>
where
    I: IntoIterator<Item = Flash>,
{
    let messages: Vec<FlashMessage> = flashes.into_iter().map(classify).collect();
    serde_json::to_string(&messages)
}

/// Drain `source` and place the rendered markup in `ctx` under [`FLASH_KEY`].
///
/// Leaves `ctx` untouched when there is nothing to show, so templates see
/// the key as absent rather than empty. Returns whether the key was set.
pub fn modify<S>(source: &mut S, ctx: &mut RenderContext) -> bool
where
    S: FlashSource + ?Sized,
{
    let flashes = source.take_flashes();
    if flashes.is_empty() {
        return false;
    }

    tracing::debug!(count = flashes.len(), "Rendering flashes");
    ctx.set_markup(FLASH_KEY, render_html(flashes));
    true
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
