//! The driving port for structured wireless scans.

use async_trait::async_trait;

use crate::domain::native::NativeScanRecord;
use crate::error::ScanError;

/// Port that abstracts a structured (request, then read) wireless backend.
///
/// Implementations include:
/// - [`crate::adapter::IwInterface`] -- Linux, `iw dev <iface> scan`.
/// - [`crate::adapter::NetshInterface`] -- Windows, `netsh wlan show networks mode=bssid`.
///
/// Callers request a scan, give the driver time to settle, and only then read
/// results; reading immediately after the request returns stale or partial
/// data on most drivers.
#[async_trait]
pub trait WirelessInterface: Send + Sync {
    /// Interface name used in diagnostics (e.g. `"wlan0"`).
    fn name(&self) -> &str;

    /// Ask the driver to start a fresh scan.
    async fn request_scan(&self) -> Result<(), ScanError>;

    /// Read the access points the driver currently knows about.
    async fn scan_results(&self) -> Result<Vec<NativeScanRecord>, ScanError>;
}
