//! Error types for the twinguard-wifiscan crate.
//!
//! None of these errors escape the acquisition functions in
//! [`crate::acquire`]; they are converted into diagnostics there. Adapters and
//! the command runner return them so callers that drive an adapter directly
//! still get a precise failure.

use std::time::Duration;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that can occur while acquiring Wi-Fi observations.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Failed to parse a MAC address string (expected `aa:bb:cc:dd:ee:ff`).
    #[error("failed to parse MAC address from '{input}': expected aa:bb:cc:dd:ee:ff")]
    MacParseFailed {
        /// The input string that could not be parsed.
        input: String,
    },

    /// The external scan tool could not be started.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        /// Program that was being executed.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The external scan tool exited unsuccessfully.
    #[error("`{program}` exited with {status}: {stderr}")]
    NonZeroExit {
        /// Program that was executed.
        program: String,
        /// Rendered exit status.
        status: String,
        /// Trimmed standard error output.
        stderr: String,
    },

    /// The external scan tool did not finish in time and was killed.
    #[error("`{program}` did not finish within {timeout:?}")]
    Timeout {
        /// Program that was executed.
        program: String,
        /// The bound that elapsed.
        timeout: Duration,
    },

    /// The wireless interface is missing or refused the request.
    #[error("wireless interface '{interface}' unavailable: {reason}")]
    InterfaceUnavailable {
        /// Interface name.
        interface: String,
        /// Human-readable description of what went wrong.
        reason: String,
    },

    /// No scan backend exists for this operating system.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

impl ScanError {
    /// Construct a [`ScanError::InterfaceUnavailable`].
    pub fn interface_unavailable(interface: impl Into<String>, reason: impl Into<String>) -> Self {
        ScanError::InterfaceUnavailable {
            interface: interface.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure was the timeout bound elapsing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ScanError::Timeout { .. })
    }
}
