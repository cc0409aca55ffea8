//! Error types for meascollec
//!
//! This module defines all error types used throughout the library.
//! Problems with the content of a measurement file are reported as a
//! [`FormatError`]; everything else (I/O, XML syntax, writers, configuration)
//! has its own variant on [`Error`].

use std::fmt;
use thiserror::Error;

/// Result type alias using meascollec Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for meascollec operations
#[derive(Error, Debug)]
pub enum Error {
    /// The measurement file content does not have the expected format
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Resource loading error
    #[error("resource error: {0}")]
    Resource(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Invalid configuration (output format, locators)
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Delimited-text writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Returns the format error kind, if this is a format error
    pub fn format_kind(&self) -> Option<FormatErrorKind> {
        match self {
            Error::Format(err) => Some(err.kind),
            _ => None,
        }
    }
}

/// Category of a [`FormatError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// A repeatable node is neither a mapping nor a sequence of mappings
    Shape,
    /// Measurement values exist but no measurement types were declared
    Pairing,
    /// A measurement value is not an integer
    Coercion,
    /// A required key is absent (strict parsing only)
    MissingRequired,
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatErrorKind::Shape => "shape",
            FormatErrorKind::Pairing => "pairing",
            FormatErrorKind::Coercion => "coercion",
            FormatErrorKind::MissingRequired => "missing required",
        };
        f.write_str(name)
    }
}

/// Measurement file format error with context
#[derive(Debug, Clone)]
pub struct FormatError {
    /// Error category
    pub kind: FormatErrorKind,
    /// Error message
    pub message: String,
    /// Path to the node that failed
    pub path: Option<String>,
    /// Offending raw value
    pub value: Option<String>,
}

impl FormatError {
    /// Create a new format error
    pub fn new(kind: FormatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: None,
            value: None,
        }
    }

    /// Shape error for a node that could not be normalized
    pub fn shape(path: impl Into<String>, found: &str) -> Self {
        Self::new(
            FormatErrorKind::Shape,
            format!("expected a mapping or a sequence of mappings, found {}", found),
        )
        .with_path(path)
    }

    /// Pairing error for a block with values but no types
    pub fn pairing(meas_info_id: &str, values: usize) -> Self {
        Self::new(
            FormatErrorKind::Pairing,
            format!(
                "measInfo '{}' has {} measurement value(s) but no measurement types",
                meas_info_id, values
            ),
        )
    }

    /// Coercion error for a value that is not an integer
    pub fn coercion(meas_obj_ldn: &str, meas_name: &str, value: impl Into<String>) -> Self {
        Self::new(
            FormatErrorKind::Coercion,
            format!(
                "value for '{}' / '{}' is not an integer",
                meas_obj_ldn, meas_name
            ),
        )
        .with_value(value)
    }

    /// Missing-required error for an absent key
    pub fn missing_required(path: impl Into<String>) -> Self {
        Self::new(FormatErrorKind::MissingRequired, "required key is absent").with_path(path)
    }

    /// Set the path of the failing node
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the offending value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(ref path) = self.path {
            write!(f, " (at {})", path)?;
        }

        if let Some(ref value) = self.value {
            write!(f, " [value: {:?}]", value)?;
        }

        Ok(())
    }
}

impl std::error::Error for FormatError {}
