//! Structured scans on Windows through `netsh wlan show networks mode=bssid`.
//!
//! `netsh` has no portable way to force a fresh scan, so
//! [`NetshInterface::request_scan`] only checks that the interface is listed and
//! the settle delay lets the driver refresh its cache (typically one scan
//! result per ~10 s).

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::command::run_command;
use crate::domain::bssid::BssidId;
use crate::domain::native::{AkmSuite, NativeScanRecord};
use crate::error::ScanError;
use crate::port::WirelessInterface;

/// Default bound for a single `netsh` invocation.
pub const DEFAULT_NETSH_TIMEOUT: Duration = Duration::from_secs(15);

// ---------------------------------------------------------------------------
// NetshInterface
// ---------------------------------------------------------------------------

/// [`WirelessInterface`] backed by `netsh wlan`.
#[derive(Debug, Clone)]
pub struct NetshInterface {
    /// WLAN interface name as `netsh` knows it (e.g. `"Wi-Fi"`).
    interface: String,
    timeout: Duration,
}

impl NetshInterface {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            timeout: DEFAULT_NETSH_TIMEOUT,
        }
    }

    /// Bound each `netsh` invocation by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn interface_arg(&self) -> String {
        format!("interface={}", self.interface)
    }
}

#[async_trait]
impl WirelessInterface for NetshInterface {
    fn name(&self) -> &str {
        &self.interface
    }

    async fn request_scan(&self) -> Result<(), ScanError> {
        let iface = self.interface_arg();
        let out = run_command("netsh", &["wlan", "show", "interfaces"], self.timeout).await?;
        if !lists_interface(&out, &self.interface) {
            return Err(ScanError::interface_unavailable(
                &self.interface,
                "not listed by `netsh wlan show interfaces`",
            ));
        }
        debug!(interface = %iface, "netsh cannot trigger scans; relying on driver cache");
        Ok(())
    }

    async fn scan_results(&self) -> Result<Vec<NativeScanRecord>, ScanError> {
        let iface = self.interface_arg();
        let stdout = run_command(
            "netsh",
            &["wlan", "show", "networks", "mode=bssid", iface.as_str()],
            self.timeout,
        )
        .await?;
        Ok(parse_netsh_bssid_output(&stdout))
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Intermediate accumulator for fields within a single BSSID sub-block.
#[derive(Default)]
struct BssidBlock {
    mac: Option<BssidId>,
    signal_pct: Option<u8>,
    channel: Option<u32>,
}

impl BssidBlock {
    /// Returns `None` when the MAC, the signal or the channel is missing.
    fn into_record(self, ssid: &str, akm: &[AkmSuite]) -> Option<NativeScanRecord> {
        let bssid = self.mac?;
        let freq_mhz = channel_to_freq(self.channel?)?;
        Some(NativeScanRecord {
            ssid: ssid.to_owned(),
            bssid,
            signal_dbm: pct_to_dbm(self.signal_pct?),
            freq_mhz,
            akm: akm.to_vec(),
        })
    }
}

/// Parse the text output of `netsh wlan show networks mode=bssid`.
///
/// Authentication is reported once per SSID and applies to every BSSID
/// listed under it. Lines that match nothing (interface headers, localised
/// chatter) are skipped.
///
/// ```text
/// SSID 1 : MyNetwork
///     Network type            : Infrastructure
///     Authentication          : WPA2-Personal
///     Encryption              : CCMP
///     BSSID 1                 : aa:bb:cc:dd:ee:ff
///          Signal             : 84%
///          Radio type         : 802.11ax
///          Channel            : 36
/// ```
pub fn parse_netsh_bssid_output(output: &str) -> Vec<NativeScanRecord> {
    let mut results = Vec::new();

    let mut current_ssid = String::new();
    let mut current_akm: Vec<AkmSuite> = Vec::new();
    let mut current_block: Option<BssidBlock> = None;

    for line in output.lines() {
        let trimmed = line.trim();
        let Some((key, value)) = split_kv(trimmed) else {
            continue;
        };
        let key = key.to_ascii_uppercase();

        if key.starts_with("SSID") {
            if let Some(block) = current_block.take() {
                results.extend(block.into_record(&current_ssid, &current_akm));
            }
            current_ssid = value.to_owned();
            current_akm.clear();
            continue;
        }

        if key.starts_with("BSSID") {
            if let Some(block) = current_block.take() {
                results.extend(block.into_record(&current_ssid, &current_akm));
            }
            // Unparseable MACs still open a block so their field lines are
            // not attributed to the previous BSSID.
            current_block = Some(BssidBlock {
                mac: BssidId::parse(value).ok(),
                ..Default::default()
            });
            continue;
        }

        if key == "AUTHENTICATION" {
            current_akm = akm_from_netsh_auth(value);
            continue;
        }

        let Some(block) = current_block.as_mut() else {
            continue;
        };

        if key == "SIGNAL" {
            block.signal_pct = value.trim_end_matches('%').trim().parse().ok();
        } else if key == "CHANNEL" {
            block.channel = value.parse().ok();
        }
    }

    if let Some(block) = current_block.take() {
        results.extend(block.into_record(&current_ssid, &current_akm));
    }

    results
}

/// Map netsh's per-SSID `Authentication` text onto AKM suites.
fn akm_from_netsh_auth(value: &str) -> Vec<AkmSuite> {
    match value.to_ascii_uppercase().as_str() {
        "OPEN" => Vec::new(),
        "WPA3-PERSONAL" | "WPA3-SAE" => vec![AkmSuite::Wpa3Sae],
        // Transition mode advertises both.
        "WPA2-PERSONAL/WPA3-PERSONAL" | "WPA3-PERSONAL TRANSITION" => {
            vec![AkmSuite::Wpa2Psk, AkmSuite::Wpa3Sae]
        }
        "WPA2-PERSONAL" => vec![AkmSuite::Wpa2Psk],
        "WPA2-ENTERPRISE" => vec![AkmSuite::Wpa2],
        "WPA-PERSONAL" => vec![AkmSuite::WpaPsk],
        "WPA-ENTERPRISE" => vec![AkmSuite::Wpa],
        "OWE" => vec![AkmSuite::Owe],
        _ => vec![AkmSuite::Other(value.to_owned())],
    }
}

/// netsh reports signal quality as 0-100 %; map it linearly onto
/// -100..-50 dBm.
fn pct_to_dbm(pct: u8) -> i32 {
    i32::from(pct.min(100)) / 2 - 100
}

/// Centre frequency for an 802.11 channel number.
fn channel_to_freq(channel: u32) -> Option<u32> {
    match channel {
        14 => Some(2484),
        1..=13 => Some(2407 + 5 * channel),
        32..=177 => Some(5000 + 5 * channel),
        _ => None,
    }
}

/// Whether `netsh wlan show interfaces` output has a `Name : <interface>`
/// line for exactly this interface.
fn lists_interface(output: &str, interface: &str) -> bool {
    output.lines().any(|line| {
        matches!(split_kv(line.trim()), Some((key, value))
            if key.eq_ignore_ascii_case("Name") && value == interface)
    })
}

/// Split a netsh key-value line on the first `" : "` separator.
///
/// MAC addresses and SSIDs contain bare colons, so only the spaced form
/// separates. A trailing `" :"` yields an empty value (hidden SSIDs).
fn split_kv(line: &str) -> Option<(&str, &str)> {
    if let Some(idx) = line.find(" : ") {
        return Some((line[..idx].trim(), line[idx + 3..].trim()));
    }
    line.strip_suffix(" :").map(|key| (key.trim(), ""))
}

// ===========================================================================
// Tests
// ===========================================================================
