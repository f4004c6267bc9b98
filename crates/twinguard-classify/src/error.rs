//! Error types for the classification crate.
//!
//! ```text
//! ModelError   (artifact loading / validation)
//! ConfigError  (detector config loading / validation)
//! ```
//!
//! Neither escapes the prediction path: a [`ModelError`] while loading marks
//! the affected model unavailable, and prediction itself cannot fail once an
//! artifact has passed validation.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for artifact operations.
pub type ModelResult<T> = Result<T, ModelError>;

// ---------------------------------------------------------------------------
// ModelError
// ---------------------------------------------------------------------------

/// Errors produced while loading or validating a model artifact.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The artifact file could not be read.
    #[error("Cannot read artifact `{path}`: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The artifact file is not valid JSON for its type.
    #[error("Cannot parse artifact `{path}`: {source}")]
    Json {
        /// Path that was being parsed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Two parts of an artifact disagree on a dimension.
    #[error("Dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which dimension was checked.
        what: &'static str,
        /// Expected size.
        expected: usize,
        /// Actual size.
        actual: usize,
    },

    /// The artifact is structurally valid JSON but semantically unusable.
    #[error("Invalid artifact: {0}")]
    Invalid(String),
}

impl ModelError {
    /// Construct a [`ModelError::DimensionMismatch`].
    pub fn dimension_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        ModelError::DimensionMismatch {
            what,
            expected,
            actual,
        }
    }

    /// Construct a [`ModelError::Invalid`].
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        ModelError::Invalid(msg.into())
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors produced when loading or validating a
/// [`DetectorConfig`](crate::config::DetectorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field has an invalid value.
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Name of the field.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// A configuration file could not be read or written.
    #[error("Cannot access config file `{path}`: {source}")]
    FileAccess {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file contains malformed JSON.
    #[error("Cannot parse config file `{path}`: {source}")]
    Parse {
        /// Path that was being parsed.
        path: PathBuf,
        /// Underlying JSON parse error.
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Construct a [`ConfigError::InvalidValue`].
    pub fn invalid_value<S: Into<String>>(field: &'static str, reason: S) -> Self {
        ConfigError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
