//! Detector configuration.
//!
//! [`DetectorConfig`] holds the artifact locations and the acquisition
//! knobs. It round-trips through JSON so a deployment can keep it in a file;
//! command-line flags override individual fields.
//!
//! ```rust
//! use twinguard_classify::config::DetectorConfig;
//!
//! let cfg = DetectorConfig::default();
//! cfg.validate().expect("default config is valid");
//! assert_eq!(cfg.settle_ms, 5000);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::gateway::ModelPaths;

/// Longest settle delay accepted, in milliseconds.
pub const MAX_SETTLE_MS: u64 = 60_000;

/// Complete configuration for a [`Detector`](crate::detector::Detector).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Full-feature pipeline artifact. Default: unset.
    pub pipeline_path: Option<PathBuf>,
    /// Text classifier artifact. Default: unset.
    pub text_model_path: Option<PathBuf>,
    /// Text vectorizer artifact. Default: unset.
    pub vectorizer_path: Option<PathBuf>,
    /// Wireless interface for structured scans. Default: **`Wi-Fi`** on
    /// Windows, **`wlan0`** elsewhere.
    pub interface: String,
    /// Delay between requesting a scan and reading its results.
    /// Default: **5000** ms.
    pub settle_ms: u64,
    /// Bound on every external scan command. Default: **30** s.
    pub command_timeout_secs: u64,
}

fn default_interface() -> String {
    if cfg!(windows) {
        "Wi-Fi".to_owned()
    } else {
        "wlan0".to_owned()
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            pipeline_path: None,
            text_model_path: None,
            vectorizer_path: None,
            interface: default_interface(),
            settle_ms: 5000,
            command_timeout_secs: 30,
        }
    }
}

impl DetectorConfig {
    /// Load a [`DetectorConfig`] from a JSON file at `path`. Missing fields
    /// take their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::FileAccess`] if the file cannot be read,
    /// [`ConfigError::Parse`] if the JSON is malformed and
    /// [`ConfigError::InvalidValue`] if a field fails [`validate`].
    ///
    /// [`validate`]: Self::validate
    pub fn from_json(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: DetectorConfig =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Write this configuration as pretty-printed JSON, creating parent
    /// directories if necessary.
    pub fn to_json(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::FileAccess {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::invalid_value("(serialization)", e.to_string()))?;
        std::fs::write(path, json).map_err(|source| ConfigError::FileAccess {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate all fields, returning the first problem found.
    ///
    /// - `interface` must not be blank.
    /// - `settle_ms` must be at most [`MAX_SETTLE_MS`].
    /// - `command_timeout_secs` must be greater than zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interface.trim().is_empty() {
            return Err(ConfigError::invalid_value("interface", "must not be empty"));
        }
        if self.settle_ms > MAX_SETTLE_MS {
            return Err(ConfigError::invalid_value(
                "settle_ms",
                format!("must be <= {MAX_SETTLE_MS}"),
            ));
        }
        if self.command_timeout_secs == 0 {
            return Err(ConfigError::invalid_value("command_timeout_secs", "must be > 0"));
        }
        Ok(())
    }

    pub fn model_paths(&self) -> ModelPaths {
        ModelPaths {
            pipeline: self.pipeline_path.clone(),
            text_model: self.text_model_path.clone(),
            vectorizer: self.vectorizer_path.clone(),
        }
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
