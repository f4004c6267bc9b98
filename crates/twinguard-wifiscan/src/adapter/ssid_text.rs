//! SSID extraction from command-line scan tools.
//!
//! These parsers only recover network names. Every per-OS text-format
//! assumption lives here so a tool's output change touches one function.
//! Lines that do not match are skipped, never reported as errors.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// `SSID 1 : MyNetwork` in `netsh wlan show networks` output. `BSSID` lines
/// never match because the pattern is anchored at the line start.
static NETSH_SSID_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*SSID\s+\d+\s*:\s*(.+)$").expect("valid netsh SSID pattern"));

/// Field separator applied to `airport -s` rows: runs of two or more
/// whitespace characters.
static AIRPORT_COLUMNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("valid airport column pattern"));

/// Parse `netsh wlan show networks` output (Windows).
pub fn parse_windows_ssids(output: &str) -> Vec<String> {
    let ssids = output.lines().filter_map(|line| {
        let caps = NETSH_SSID_LINE.captures(line)?;
        let ssid = caps.get(1)?.as_str().trim();
        (!ssid.is_empty()).then(|| ssid.to_owned())
    });
    dedupe_preserving_order(ssids)
}

/// Parse `airport -s` output (macOS).
///
/// The first line is the column header. Each row is cut at its first run of
/// two or more spaces and the leading piece is kept. `airport` right-aligns
/// the SSID column and often leaves a single space before the BSSID, in which
/// case the kept piece carries the BSSID and RSSI as well. SSIDs containing
/// two consecutive spaces are cut at that point.
pub fn parse_macos_ssids(output: &str) -> Vec<String> {
    let ssids = output.lines().skip(1).filter_map(|line| {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let ssid = AIRPORT_COLUMNS.split(line).next()?.trim();
        (!ssid.is_empty()).then(|| ssid.to_owned())
    });
    dedupe_preserving_order(ssids)
}

/// Parse `nmcli -t -f SSID dev wifi` output (Linux): one SSID per line,
/// taken verbatim.
pub fn parse_linux_ssids(output: &str) -> Vec<String> {
    let ssids = output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned);
    dedupe_preserving_order(ssids)
}

/// Drop repeated SSIDs, keeping the first occurrence of each.
pub fn dedupe_preserving_order<I>(ssids: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    ssids
        .into_iter()
        .filter(|ssid| seen.insert(ssid.clone()))
        .collect()
}
