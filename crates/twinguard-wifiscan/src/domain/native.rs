//! Records produced by structured (native) wireless queries and the policy
//! that maps them onto [`NetworkObservation`].

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::domain::bssid::BssidId;
use crate::domain::observation::{AuthKind, NetworkObservation, RadioDetails};

/// Authentication-and-key-management suite advertised by an access point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AkmSuite {
    /// Explicit "no AKM" marker some drivers emit for open networks.
    None,
    /// WPA (v1) with 802.1X.
    Wpa,
    /// WPA (v1) pre-shared key.
    WpaPsk,
    /// WPA2 with 802.1X.
    Wpa2,
    /// WPA2 pre-shared key.
    Wpa2Psk,
    /// WPA3 simultaneous authentication of equals.
    Wpa3Sae,
    /// Opportunistic wireless encryption.
    Owe,
    /// Any other suite, kept by name.
    Other(String),
}

impl fmt::Display for AkmSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Wpa => f.write_str("WPA"),
            Self::WpaPsk => f.write_str("WPA-PSK"),
            Self::Wpa2 => f.write_str("WPA2"),
            Self::Wpa2Psk => f.write_str("WPA2-PSK"),
            Self::Wpa3Sae => f.write_str("WPA3-SAE"),
            Self::Owe => f.write_str("OWE"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// One access point as reported by a structured wireless query.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NativeScanRecord {
    /// Network name; empty for hidden networks.
    pub ssid: String,
    /// Radio MAC address.
    #[cfg_attr(feature = "serde", serde(with = "bssid_text"))]
    pub bssid: BssidId,
    /// Signal strength in dBm.
    pub signal_dbm: i32,
    /// Centre frequency in MHz.
    pub freq_mhz: u32,
    /// Advertised AKM suites, in the order the driver listed them.
    pub akm: Vec<AkmSuite>,
}

/// Auth classification for a structured record.
///
/// No suite at all means Open. Otherwise the result stays Open unless a WPA3
/// suite (checked first) or a WPA2-PSK suite is present.
pub fn classify_auth(akm: &[AkmSuite]) -> AuthKind {
    let advertised: Vec<&AkmSuite> = akm.iter().filter(|s| **s != AkmSuite::None).collect();
    if advertised.is_empty() {
        return AuthKind::Open;
    }
    if advertised.iter().any(|s| **s == AkmSuite::Wpa3Sae) {
        AuthKind::Wpa3
    } else if advertised.iter().any(|s| **s == AkmSuite::Wpa2Psk) {
        AuthKind::Wpa2
    } else {
        AuthKind::Open
    }
}

/// Channel derived as `freq_mhz / 5` with integer division.
///
/// This is not the 802.11 channel table: 2412 MHz yields 482, not 1. The
/// trained models saw exactly this value, so it must not be "corrected".
pub fn approx_channel_from_freq(freq_mhz: u32) -> u32 {
    freq_mhz / 5
}

impl From<NativeScanRecord> for NetworkObservation {
    fn from(record: NativeScanRecord) -> Self {
        let auth = classify_auth(&record.akm);
        NetworkObservation::with_radio(
            record.ssid,
            RadioDetails {
                bssid: record.bssid.to_string(),
                rssi: record.signal_dbm,
                auth,
                channel: approx_channel_from_freq(record.freq_mhz),
            },
        )
    }
}

#[cfg(feature = "serde")]
mod bssid_text {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use crate::domain::bssid::BssidId;

    pub fn serialize<S: Serializer>(id: &BssidId, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BssidId, D::Error> {
        let text = String::deserialize(d)?;
        BssidId::parse(&text).map_err(D::Error::custom)
    }
}
