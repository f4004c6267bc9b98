//! Command-line scan tool selection, keyed on the operating system.

use std::fmt;
use std::str::FromStr;

use crate::adapter::ssid_text::{parse_linux_ssids, parse_macos_ssids, parse_windows_ssids};
use crate::error::ScanError;

/// Location of the private `airport` utility on macOS.
pub const AIRPORT_PATH: &str =
    "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport";

const NETSH_ARGS: &[&str] = &["wlan", "show", "networks"];
const AIRPORT_ARGS: &[&str] = &["-s"];
const NMCLI_ARGS: &[&str] = &["-t", "-f", "SSID", "dev", "wifi"];

/// Which command-line scan tool (and text format) to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanPlatform {
    /// `netsh wlan show networks`.
    Windows,
    /// `airport -s`.
    MacOs,
    /// `nmcli -t -f SSID dev wifi`.
    Linux,
    /// No known scan tool; acquisition yields nothing.
    Unsupported(String),
}

impl ScanPlatform {
    /// The platform this process is running on.
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier (as in [`std::env::consts::OS`]) to a platform.
    pub fn from_os(os: &str) -> Self {
        match os.to_ascii_lowercase().as_str() {
            "windows" => Self::Windows,
            "macos" | "darwin" => Self::MacOs,
            "linux" => Self::Linux,
            other => Self::Unsupported(other.to_owned()),
        }
    }

    /// Program and arguments for this platform's scan tool.
    pub fn command(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            Self::Windows => Some(("netsh", NETSH_ARGS)),
            Self::MacOs => Some((AIRPORT_PATH, AIRPORT_ARGS)),
            Self::Linux => Some(("nmcli", NMCLI_ARGS)),
            Self::Unsupported(_) => None,
        }
    }

    /// Extract SSIDs from this platform's tool output.
    pub fn parse(&self, output: &str) -> Vec<String> {
        match self {
            Self::Windows => parse_windows_ssids(output),
            Self::MacOs => parse_macos_ssids(output),
            Self::Linux => parse_linux_ssids(output),
            Self::Unsupported(_) => Vec::new(),
        }
    }
}

impl fmt::Display for ScanPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => f.write_str("windows"),
            Self::MacOs => f.write_str("macos"),
            Self::Linux => f.write_str("linux"),
            Self::Unsupported(name) => write!(f, "unsupported ({name})"),
        }
    }
}

impl FromStr for ScanPlatform {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_os(s.trim()) {
            Self::Unsupported(name) => Err(ScanError::UnsupportedPlatform(name)),
            platform => Ok(platform),
        }
    }
}
