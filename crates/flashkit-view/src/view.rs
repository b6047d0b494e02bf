//! Template lookup, composition and rendering.

use std::{
    collections::BTreeMap,
    path::{Component, Path, PathBuf},
    sync::{Arc, OnceLock},
};

use axum::{http::Extensions, response::Html};
use flashkit_core::{ContextValue, RenderContext};
use minijinja::{Environment, ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{ViewError, ViewModifier};

/// View configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Base URI exposed to templates as `base_uri`.
    pub base_uri: String,
    /// Template file extension, without the dot.
    pub extension: String,
    /// Folder holding the templates.
    pub folder: PathBuf,
    /// Keep parsed templates between renders.
    pub caching: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            base_uri: "/".to_string(),
            extension: "tmpl".to_string(),
            folder: PathBuf::from("view"),
            caching: true,
        }
    }
}

/// Root template plus the children it is composed with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Templates {
    /// Template rendered into the response.
    pub root: String,
    /// Templates the root includes or extends; loaded first.
    pub children: Vec<String>,
}

/// Shared view registry: configuration, default templates and modifiers.
///
/// Build it once at startup, wrap it in an `Arc`, then call
/// [`Views::new_view`] per request.
pub struct Views {
    config: ViewConfig,
    templates: Templates,
    modifiers: Vec<Arc<dyn ViewModifier>>,
    cache: OnceLock<Environment<'static>>,
}

impl Views {
    /// Create a registry with no templates or modifiers.
    #[must_use]
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            templates: Templates::default(),
            modifiers: Vec::new(),
            cache: OnceLock::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Set the default root and child templates.
    pub fn set_templates<I, T>(&mut self, root: impl Into<String>, children: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.templates = Templates {
            root: root.into(),
            children: children.into_iter().map(Into::into).collect(),
        };
    }

    /// Replace the modifiers run before each render.
    pub fn set_modifiers(&mut self, modifiers: Vec<Arc<dyn ViewModifier>>) {
        self.modifiers = modifiers;
    }

    /// Append a modifier.
    pub fn add_modifier(&mut self, modifier: impl ViewModifier + 'static) {
        self.modifiers.push(Arc::new(modifier));
    }

    /// Create a view for the current request using the default templates.
    #[must_use]
    pub fn new_view(self: &Arc<Self>) -> View {
        let mut vars = RenderContext::new();
        vars.set_var("base_uri", json!(self.config.base_uri));
        View {
            views: Arc::clone(self),
            templates: self.templates.clone(),
            vars,
        }
    }

    fn environment(&self) -> Environment<'static> {
        let folder = self.config.folder.clone();
        let extension = self.config.extension.clone();

        // Escaping follows the configured extension, not the template name.
        let escape = minijinja::default_auto_escape_callback(&format!("view.{extension}"));

        let mut env = Environment::new();
        env.set_auto_escape_callback(move |_| escape.clone());
        env.set_loader(move |name| load_template(&folder, &extension, name));
        env
    }
}

fn load_template(
    folder: &Path,
    extension: &str,
    name: &str,
) -> Result<Option<String>, minijinja::Error> {
    let relative = Path::new(name);
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return Ok(None);
    }

    let path = folder.join(format!("{name}.{extension}"));
    match std::fs::read_to_string(&path) {
        Ok(source) => Ok(Some(source)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("could not read template {}", path.display()),
        )
        .with_source(e)),
    }
}

/// A single render, owned by the request that created it.
pub struct View {
    views: Arc<Views>,
    /// Templates to render; defaults to the registry's.
    pub templates: Templates,
    /// Data handed to the template.
    pub vars: RenderContext,
}

impl View {
    /// Override the templates for this render.
    pub fn set_templates<I, T>(&mut self, root: impl Into<String>, children: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.templates = Templates {
            root: root.into(),
            children: children.into_iter().map(Into::into).collect(),
        };
    }

    /// Run every modifier in registration order, then render.
    ///
    /// # Errors
    /// Returns error if no root template is set, a modifier fails, or a
    /// template is missing or fails to render.
    pub async fn render(mut self, extensions: &Extensions) -> Result<Html<String>, ViewError> {
        if self.templates.root.is_empty() {
            return Err(ViewError::NoTemplate);
        }

        for modifier in &self.views.modifiers {
            modifier
                .modify(extensions, &mut self.vars)
                .await
                .map_err(ViewError::Modifier)?;
        }

        let fresh;
        let env = if self.views.config.caching {
            self.views.cache.get_or_init(|| self.views.environment())
        } else {
            fresh = self.views.environment();
            &fresh
        };

        for child in &self.templates.children {
            env.get_template(child)?;
        }

        let html = env
            .get_template(&self.templates.root)?
            .render(template_context(&self.vars))?;

        tracing::debug!(template = %self.templates.root, "Rendered view");
        Ok(Html(html))
    }
}

fn template_context(vars: &RenderContext) -> BTreeMap<&str, minijinja::Value> {
    vars.iter()
        .map(|(key, value)| {
            let value = match value {
                ContextValue::Data(data) => minijinja::Value::from_serialize(data),
                ContextValue::Markup(html) => minijinja::Value::from_safe_string(html.clone()),
            };
            (key, value)
        })
        .collect()
}
