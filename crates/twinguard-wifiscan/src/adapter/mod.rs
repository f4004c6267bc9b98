//! Adapter implementations for the [`WirelessInterface`] port, plus the
//! command-line SSID parsers.
//!
//! - [`IwInterface`]: parses `iw dev <iface> scan dump` (Linux).
//! - [`NetshInterface`]: parses `netsh wlan show networks mode=bssid` (Windows).
//! - [`ssid_text`]: name-only parsers for `netsh`, `airport` and `nmcli` text.

use std::time::Duration;

pub mod iw_interface;
pub mod netsh_interface;
pub mod ssid_text;

pub use iw_interface::{parse_iw_scan_output, IwInterface};
pub use netsh_interface::{parse_netsh_bssid_output, NetshInterface};

use crate::port::WirelessInterface;

/// The structured adapter for the running OS, bound to `interface`.
///
/// Returns `None` where no structured backend exists (e.g. macOS); callers
/// treat that as an acquisition failure.
pub fn platform_interface(
    interface: &str,
    timeout: Duration,
) -> Option<Box<dyn WirelessInterface>> {
    match std::env::consts::OS {
        "linux" => Some(Box::new(IwInterface::new(interface).with_timeout(timeout))),
        "windows" => Some(Box::new(
            NetshInterface::new(interface).with_timeout(timeout),
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_interface_matches_os() {
        let iface = platform_interface("wlan0", Duration::from_secs(1));
        match std::env::consts::OS {
            "linux" | "windows" => {
                let name = iface.map(|i| i.name().to_owned());
                assert_eq!(name.as_deref(), Some("wlan0"));
            }
            _ => assert!(iface.is_none()),
        }
    }
}
