//! Key-value data handed to templates at render time.

use std::collections::HashMap;

use serde_json::Value;

/// A value in the render context.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    /// Plain data, escaped by the template engine as usual.
    Data(Value),
    /// Trusted markup, inserted verbatim.
    Markup(String),
}

/// Mutable render context shared by view modifiers and the template.
///
/// Setting a key replaces whatever was stored under it before, whether data
/// or markup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    vars: HashMap<String, ContextValue>,
}

impl RenderContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.vars.get(key)
    }

    /// Set a data value.
    pub fn set_var(&mut self, key: impl Into<String>, value: Value) {
        self.vars.insert(key.into(), ContextValue::Data(value));
    }

    /// Set a trusted markup fragment.
    pub fn set_markup(&mut self, key: impl Into<String>, html: impl Into<String>) {
        self.vars.insert(key.into(), ContextValue::Markup(html.into()));
    }

    /// Remove a value.
    pub fn remove(&mut self, key: &str) -> Option<ContextValue> {
        self.vars.remove(key)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Whether no value has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }
}
