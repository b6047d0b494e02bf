//! Message record and severity classes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity class of a flash message.
///
/// The textual form doubles as the HTML class attribute and the JSON value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashClass {
    /// Operation succeeded.
    Success,
    /// Neutral information.
    Info,
    /// Something needs attention.
    Warning,
    /// Operation failed.
    Danger,
    /// Unclassified message.
    #[default]
    Standard,
}

impl FlashClass {
    /// All classes, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Success,
        Self::Info,
        Self::Warning,
        Self::Danger,
        Self::Standard,
    ];

    /// Textual form of the class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Standard => "standard",
        }
    }
}

impl fmt::Display for FlashClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised class text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown flash class: {0}")]
pub struct UnknownClass(pub String);

impl FromStr for FlashClass {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| UnknownClass(s.to_string()))
    }
}

/// A flash message paired with its severity class.
///
/// Field names on the wire are `Message` and `Class`, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    /// Message text.
    #[serde(rename = "Message")]
    pub message: String,
    /// Severity class.
    #[serde(rename = "Class")]
    pub class: FlashClass,
}

impl FlashMessage {
    /// Create a message with an explicit class.
    #[must_use]
    pub fn new(message: impl Into<String>, class: FlashClass) -> Self {
        Self {
            message: message.into(),
            class,
        }
    }

    /// Create a success message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, FlashClass::Success)
    }

    /// Create an info message.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, FlashClass::Info)
    }

    /// Create a warning message.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, FlashClass::Warning)
    }

    /// Create a danger message.
    #[must_use]
    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(message, FlashClass::Danger)
    }

    /// Create an unclassified message.
    #[must_use]
    pub fn standard(message: impl Into<String>) -> Self {
        Self::new(message, FlashClass::Standard)
    }
}
