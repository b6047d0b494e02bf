//! Session cookie configuration.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::SessionError;

/// Attributes written on the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieOptions {
    /// Cookie path.
    pub path: String,
    /// Cookie domain; omitted when empty.
    pub domain: Option<String>,
    /// Lifetime in seconds.
    ///
    /// Positive values expire the session after that much inactivity, zero
    /// makes a browser-session cookie, negative values expire it at once.
    pub max_age: i64,
    /// Send only over HTTPS.
    pub secure: bool,
    /// Hide from scripts.
    pub http_only: bool,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            domain: None,
            max_age: 28800,
            secure: false,
            http_only: true,
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cookie name.
    pub name: String,
    /// Cookie attributes.
    pub options: CookieOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name: "sess".to_string(),
            options: CookieOptions::default(),
        }
    }
}

impl SessionConfig {
    /// Set the cookie name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the cookie attributes.
    #[must_use]
    pub fn with_options(mut self, options: CookieOptions) -> Self {
        self.options = options;
        self
    }

    /// Session expiry derived from `max_age`.
    #[must_use]
    pub fn expiry(&self) -> Expiry {
        match self.options.max_age {
            age if age > 0 => Expiry::OnInactivity(Duration::seconds(age)),
            0 => Expiry::OnSessionEnd,
            _ => Expiry::AtDateTime(OffsetDateTime::UNIX_EPOCH),
        }
    }

    /// Check that every attribute can be written into a cookie as is.
    ///
    /// # Errors
    /// Returns error if the name is not a cookie token, or the path or
    /// domain would break out of its attribute.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.name.is_empty() || !self.name.bytes().all(is_token_byte) {
            return Err(invalid("name", &self.name));
        }
        if !is_attribute_value(&self.options.path) {
            return Err(invalid("path", &self.options.path));
        }
        if let Some(domain) = &self.options.domain {
            if !is_attribute_value(domain) || domain.contains(' ') {
                return Err(invalid("domain", domain));
            }
        }
        Ok(())
    }

    /// Build the `tower-sessions` layer for `store`.
    ///
    /// # Errors
    /// Returns error if the configuration does not validate.
    pub fn layer<S: SessionStore>(&self, store: S) -> Result<SessionManagerLayer<S>, SessionError> {
        self.validate()?;

        let options = &self.options;
        let mut layer = SessionManagerLayer::new(store)
            .with_name(self.name.clone())
            .with_path(options.path.clone())
            .with_secure(options.secure)
            .with_http_only(options.http_only)
            .with_expiry(self.expiry());
        if let Some(domain) = options.domain.clone().filter(|d| !d.is_empty()) {
            layer = layer.with_domain(domain);
        }
        Ok(layer)
    }
}

fn invalid(field: &'static str, value: &str) -> SessionError {
    SessionError::InvalidAttribute {
        field,
        value: value.to_string(),
    }
}

// RFC 6265 cookie-name: a token, no separators.
const fn is_token_byte(b: u8) -> bool {
    b.is_ascii_graphic()
        && !matches!(
            b,
            b'(' | b')' | b'<' | b'>' | b'@' | b',' | b';' | b':' | b'\\' | b'"' | b'/' | b'['
                | b']' | b'?' | b'=' | b'{' | b'}'
        )
}

// RFC 6265 path-value: any CHAR except CTLs or ";".
fn is_attribute_value(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii() && !c.is_ascii_control() && c != ';')
}
