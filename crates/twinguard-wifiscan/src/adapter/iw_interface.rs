//! Structured scans on Linux through `iw`.
//!
//! `iw dev <iface> scan trigger` starts a scan without waiting for it, and
//! `iw dev <iface> scan dump` prints the driver's current BSS table. That
//! split maps directly onto [`WirelessInterface`]'s request/read contract.
//!
//! # Permissions
//!
//! Triggering a scan requires `CAP_NET_ADMIN`. Without it the trigger fails,
//! the acquisition reports the failure, and no stale dump is read.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::command::run_command;
use crate::domain::bssid::BssidId;
use crate::domain::native::{AkmSuite, NativeScanRecord};
use crate::error::ScanError;
use crate::port::WirelessInterface;

/// Default bound for a single `iw` invocation.
pub const DEFAULT_IW_TIMEOUT: Duration = Duration::from_secs(15);

// ---------------------------------------------------------------------------
// IwInterface
// ---------------------------------------------------------------------------

/// [`WirelessInterface`] backed by the `iw` utility.
#[derive(Debug, Clone)]
pub struct IwInterface {
    /// Wireless interface name (e.g. `"wlan0"`, `"wlp2s0"`).
    interface: String,
    timeout: Duration,
}

impl IwInterface {
    /// Create an adapter for a specific wireless interface.
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            timeout: DEFAULT_IW_TIMEOUT,
        }
    }

    /// Bound each `iw` invocation by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn map_error(&self, err: ScanError) -> ScanError {
        match err {
            // "command failed: No such device (-19)"
            ScanError::NonZeroExit { ref stderr, .. } if stderr.contains("(-19)") => {
                ScanError::interface_unavailable(&self.interface, stderr.clone())
            }
            other => other,
        }
    }
}

#[async_trait]
impl WirelessInterface for IwInterface {
    fn name(&self) -> &str {
        &self.interface
    }

    async fn request_scan(&self) -> Result<(), ScanError> {
        let args = ["dev", self.interface.as_str(), "scan", "trigger"];
        match run_command("iw", &args, self.timeout).await {
            Ok(_) => Ok(()),
            // "command failed: Device or resource busy (-16)": a scan is
            // already running, which is as good as the one we asked for.
            Err(ScanError::NonZeroExit { ref stderr, .. }) if stderr.contains("(-16)") => {
                debug!(interface = %self.interface, "scan already in progress");
                Ok(())
            }
            Err(err) => Err(self.map_error(err)),
        }
    }

    async fn scan_results(&self) -> Result<Vec<NativeScanRecord>, ScanError> {
        let args = ["dev", self.interface.as_str(), "scan", "dump"];
        let stdout = run_command("iw", &args, self.timeout)
            .await
            .map_err(|e| self.map_error(e))?;
        Ok(parse_iw_scan_output(&stdout))
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SecuritySection {
    Rsn,
    Wpa,
}

/// Intermediate accumulator for fields within a single BSS stanza.
#[derive(Default)]
struct BssStanza {
    bssid: Option<BssidId>,
    ssid: Option<String>,
    signal_dbm: Option<i32>,
    freq_mhz: Option<u32>,
    akm: Vec<AkmSuite>,
    section: Option<SecuritySection>,
}

impl BssStanza {
    /// Flush this stanza into a record. Stanzas without a MAC, frequency or
    /// signal are incomplete and dropped.
    fn flush(self) -> Option<NativeScanRecord> {
        Some(NativeScanRecord {
            bssid: self.bssid?,
            freq_mhz: self.freq_mhz?,
            signal_dbm: self.signal_dbm?,
            ssid: self.ssid.unwrap_or_default(),
            akm: self.akm,
        })
    }

    fn push_suites(&mut self, list: &str) {
        let Some(section) = self.section else {
            return;
        };
        for token in list.split_whitespace() {
            let suite = akm_from_iw_token(section, token);
            if !self.akm.contains(&suite) {
                self.akm.push(suite);
            }
        }
    }
}

/// Parse the text output of `iw dev <iface> scan [dump]`.
///
/// The output consists of BSS stanzas, each starting with:
/// ```text
/// BSS aa:bb:cc:dd:ee:ff(on wlan0)
/// ```
/// followed by indented key-value lines. The `RSN:` and `WPA:` blocks list
/// their AKM suites on an `* Authentication suites:` line.
pub fn parse_iw_scan_output(output: &str) -> Vec<NativeScanRecord> {
    let mut results = Vec::new();
    let mut current: Option<BssStanza> = None;

    for line in output.lines() {
        // New BSS stanza starts with "BSS " at column 0.
        if let Some(rest) = line.strip_prefix("BSS ") {
            if let Some(stanza) = current.take() {
                results.extend(stanza.flush());
            }

            // "BSS aa:bb:cc:dd:ee:ff(on wlan0)" or "... -- associated".
            let mac_end = rest
                .find(|c: char| !c.is_ascii_hexdigit() && c != ':')
                .unwrap_or(rest.len());
            current = Some(BssStanza {
                bssid: BssidId::parse(&rest[..mac_end]).ok(),
                ..Default::default()
            });
            continue;
        }

        let Some(stanza) = current.as_mut() else {
            continue;
        };
        let trimmed = line.trim();

        // Security blocks: "RSN:\t * Version: 1" keeps its first item on the
        // header line, so strip the header and fall through to item parsing.
        let item = if let Some(rest) = trimmed.strip_prefix("RSN:") {
            stanza.section = Some(SecuritySection::Rsn);
            rest.trim()
        } else if let Some(rest) = trimmed.strip_prefix("WPA:") {
            stanza.section = Some(SecuritySection::Wpa);
            rest.trim()
        } else if trimmed.starts_with('*') {
            trimmed
        } else {
            stanza.section = None;
            trimmed
        };

        if let Some(entry) = item.strip_prefix('*') {
            if let Some(list) = entry.trim().strip_prefix("Authentication suites:") {
                stanza.push_suites(list);
            }
            continue;
        }

        if let Some(rest) = item.strip_prefix("SSID:") {
            stanza.ssid = Some(rest.trim().to_owned());
        } else if let Some(rest) = item.strip_prefix("signal:") {
            // "signal: -52.00 dBm"
            stanza.signal_dbm = parse_signal_dbm(rest);
        } else if let Some(rest) = item.strip_prefix("freq:") {
            // "freq: 5180" (newer iw prints "freq: 5180.0")
            stanza.freq_mhz = rest
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| *f > 0.0)
                .map(|f| f as u32);
        }
    }

    if let Some(stanza) = current.take() {
        results.extend(stanza.flush());
    }

    results
}

/// Parse a signal strength string like "-52.00 dBm" into whole dBm.
fn parse_signal_dbm(s: &str) -> Option<i32> {
    let num_part = s.split_whitespace().next()?;
    num_part.parse::<f64>().ok().map(|v| v.round() as i32)
}

/// Map one token of an `Authentication suites:` list.
fn akm_from_iw_token(section: SecuritySection, token: &str) -> AkmSuite {
    match (section, token) {
        (SecuritySection::Rsn, "PSK" | "FT/PSK" | "PSK/SHA-256") => AkmSuite::Wpa2Psk,
        (SecuritySection::Rsn, "SAE" | "FT/SAE" | "SAE-EXT-KEY" | "FT/SAE-EXT-KEY") => {
            AkmSuite::Wpa3Sae
        }
        (SecuritySection::Rsn, "802.1X") => AkmSuite::Wpa2,
        (SecuritySection::Rsn, "OWE") => AkmSuite::Owe,
        (SecuritySection::Wpa, "PSK") => AkmSuite::WpaPsk,
        (SecuritySection::Wpa, "802.1X") => AkmSuite::Wpa,
        (_, other) => AkmSuite::Other(other.to_owned()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
