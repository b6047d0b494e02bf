//! Application configuration loaded from a JSON file.

use std::{
    net::{Ipv4Addr, SocketAddr},
    path::Path,
};

use flashkit_session::SessionConfig;
use flashkit_view::ViewConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level configuration. Missing sections fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the server listens on.
    pub address: SocketAddr,
    /// Session cookie settings.
    pub session: SessionConfig,
    /// Template settings.
    pub view: ViewConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)),
            session: SessionConfig::default(),
            view: ViewConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from a JSON file.
    ///
    /// A relative view folder is taken relative to the file's directory, so
    /// the result does not depend on the working directory.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        Ok(match path.parent() {
            Some(dir) => config.with_base_dir(dir),
            None => config,
        })
    }

    /// Resolve a relative view folder against `dir`.
    #[must_use]
    pub fn with_base_dir(mut self, dir: &Path) -> Self {
        if self.view.folder.is_relative() {
            self.view.folder = dir.join(&self.view.folder);
        }
        self
    }

    /// Parse configuration from JSON text.
    ///
    /// # Errors
    /// Returns error if the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_full_config() {
        let config = AppConfig::from_json(
            r#"{
                "address": "0.0.0.0:8080",
                "session": {
                    "name": "sess",
                    "options": {
                        "path": "/",
                        "domain": null,
                        "max_age": 28800,
                        "secure": false,
                        "http_only": true
                    }
                },
                "view": {
                    "base_uri": "/",
                    "extension": "tmpl",
                    "folder": "view",
                    "caching": false
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.address.port(), 8080);
        assert_eq!(config.session, SessionConfig::default());
        assert_eq!(config.view.folder, PathBuf::from("view"));
        assert!(!config.view.caching);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            AppConfig::from_json(r#"{"address": 5}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_resolves_view_folder_next_to_file() {
        let dir = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata"));
        let config = AppConfig::load(dir.join("app.json")).unwrap();

        assert_eq!(config.view.folder, dir.join("view"));
        assert!(config.view.folder.join("index.tmpl").is_file());
        assert_eq!(config.address.port(), 4000);
    }

    #[test]
    fn test_base_dir_keeps_absolute_folder() {
        let mut config = AppConfig::default();
        config.view.folder = PathBuf::from("/srv/views");

        let config = config.with_base_dir(Path::new("/etc/app"));
        assert_eq!(config.view.folder, PathBuf::from("/srv/views"));

        let config = AppConfig::default().with_base_dir(Path::new("/etc/app"));
        assert_eq!(config.view.folder, PathBuf::from("/etc/app/view"));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            AppConfig::load("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
