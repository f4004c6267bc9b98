//! Acquisition entry points.
//!
//! Neither function here returns an error. An unavailable interface, a tool
//! that is missing, exits non-zero or hangs past its timeout, and an
//! unsupported OS all produce an empty [`Acquisition`] whose `diagnostics`
//! say what went wrong. The same text is logged at `warn`.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::command::run_command;
use crate::domain::observation::NetworkObservation;
use crate::platform::ScanPlatform;
use crate::port::WirelessInterface;

/// Observations from one acquisition, plus anything worth telling the
/// caller about how they were obtained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Acquisition {
    /// Observations in the order the source reported them.
    pub observations: Vec<NetworkObservation>,
    /// Human-readable problems encountered along the way.
    pub diagnostics: Vec<String>,
}

impl Acquisition {
    /// An empty acquisition carrying one diagnostic, which is also logged.
    pub fn failed(diagnostic: impl Into<String>) -> Self {
        let diagnostic = diagnostic.into();
        warn!(%diagnostic, "acquisition failed");
        Self {
            observations: Vec::new(),
            diagnostics: vec![diagnostic],
        }
    }

    /// Whether any observation was acquired.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Structured acquisition: request a scan, wait `settle`, read results.
///
/// Results are only read after a successful request, so a failed trigger
/// never returns the driver's stale cache.
pub async fn acquire_structured(iface: &dyn WirelessInterface, settle: Duration) -> Acquisition {
    let name = iface.name().to_owned();

    if let Err(e) = iface.request_scan().await {
        return Acquisition::failed(format!("scan request on '{name}' failed: {e}"));
    }

    debug!(interface = %name, settle_ms = settle.as_millis() as u64, "waiting for scan to settle");
    tokio::time::sleep(settle).await;

    match iface.scan_results().await {
        Ok(records) => {
            let observations: Vec<NetworkObservation> =
                records.into_iter().map(NetworkObservation::from).collect();
            info!(interface = %name, count = observations.len(), "structured scan complete");
            Acquisition {
                observations,
                diagnostics: Vec::new(),
            }
        }
        Err(e) => Acquisition::failed(format!("reading scan results on '{name}' failed: {e}")),
    }
}

/// Text acquisition: run the platform's scan tool and keep the SSIDs.
pub async fn acquire_ssids(platform: &ScanPlatform, timeout: Duration) -> Acquisition {
    let Some((program, args)) = platform.command() else {
        return Acquisition::failed(format!("no scan tool for platform {platform}"));
    };

    match run_command(program, args, timeout).await {
        Ok(stdout) => {
            let observations: Vec<NetworkObservation> = platform
                .parse(&stdout)
                .into_iter()
                .map(NetworkObservation::ssid_only)
                .collect();
            info!(%platform, count = observations.len(), "ssid scan complete");
            Acquisition {
                observations,
                diagnostics: Vec::new(),
            }
        }
        Err(e) => Acquisition::failed(format!("ssid scan on {platform} failed: {e}")),
    }
}
