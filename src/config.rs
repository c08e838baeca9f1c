// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard configuration.
//!
//! Every field has a default, so a partial JSON document (or `{}`) is a
//! valid configuration:
//!
//! ```json
//! {
//!     "enabled": true,
//!     "class_name": "dark",
//!     "default_layout": "letters",
//!     "press": { "initial_delay_ms": 500, "interval_ms": 50 }
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app_settings::CONTAINER_CLASS;
use crate::input::PressOptions;
use crate::layout::LayoutType;

/// Configuration of a [`VirtualKeyboard`](crate::keyboard::VirtualKeyboard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Whether focus events open the keyboard.
    pub enabled: bool,
    /// Extra class tokens for the keyboard container, passed through as-is.
    pub class_name: String,
    /// Layout for non-number fields at the start of a session.
    pub default_layout: LayoutType,
    /// Timing of repeating keys.
    pub press: PressOptions,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            class_name: String::new(),
            default_layout: LayoutType::Letters,
            press: PressOptions::default(),
        }
    }
}

impl KeyboardConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::json_error)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::io_error_with_path(e, &path_str))?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| ConfigError::json_error_with_path(e, &path_str))?;

        tracing::info!("loaded keyboard configuration from {path_str}");
        Ok(config)
    }

    /// Loads `path`, falling back to defaults on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("{e}");
            Self::default()
        })
    }

    /// Class tokens of the keyboard container.
    #[must_use]
    pub fn container_class(&self) -> String {
        let extra = self.class_name.trim();
        if extra.is_empty() {
            CONTAINER_CLASS.to_string()
        } else {
            format!("{CONTAINER_CLASS} {extra}")
        }
    }
}

/// Error loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io {
        /// The underlying I/O error
        source: std::io::Error,
        /// File that was read
        file_path: Option<String>,
        /// How to fix it
        suggestion: Option<String>,
    },

    /// The document is not valid configuration JSON.
    Json {
        /// The underlying JSON error
        source: serde_json::Error,
        /// File that was parsed
        file_path: Option<String>,
        /// Line reported by serde_json
        line_number: Option<usize>,
        /// How to fix it
        suggestion: Option<String>,
    },
}

impl ConfigError {
    /// Creates an I/O error with file path.
    pub fn io_error_with_path(source: std::io::Error, file_path: impl Into<String>) -> Self {
        Self::Io {
            source,
            file_path: Some(file_path.into()),
            suggestion: Some("Check that the file exists and you have read permissions".into()),
        }
    }

    /// Creates a JSON error without file context.
    pub fn json_error(source: serde_json::Error) -> Self {
        let line_number = Some(source.line()).filter(|line| *line > 0);
        Self::Json {
            source,
            file_path: None,
            line_number,
            suggestion: Some(
                "Check the JSON syntax and that default_layout is letters, symbols or numbers"
                    .into(),
            ),
        }
    }

    /// Creates a JSON error with file path.
    pub fn json_error_with_path(source: serde_json::Error, file_path: impl Into<String>) -> Self {
        let mut err = Self::json_error(source);
        if let Self::Json { file_path: path, .. } = &mut err {
            *path = Some(file_path.into());
        }
        err
    }

    /// Line of a JSON error, if known.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::Json { line_number, .. } => *line_number,
            Self::Io { .. } => None,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io {
                source,
                file_path,
                suggestion,
            } => {
                write!(f, "I/O error")?;
                if let Some(path) = file_path {
                    write!(f, " reading config '{}'", path)?;
                }
                write!(f, ": {}", source)?;
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
            }
            ConfigError::Json {
                source,
                file_path,
                line_number,
                suggestion,
            } => {
                write!(f, "Invalid configuration")?;
                if let Some(path) = file_path {
                    write!(f, " in file '{}'", path)?;
                }
                if let Some(line) = line_number {
                    write!(f, " at line {}", line)?;
                }
                write!(f, ": {}", source)?;
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Json { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::json_error(err)
    }
}
