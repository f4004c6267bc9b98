//! The intermediate record every acquisition path produces.
//!
//! Structured scans know the whole radio picture of an access point, while
//! command-line scans only know its name. Rather than defaulting the missing
//! fields to sentinel values that could be mistaken for measurements, the
//! source richness is carried as a tagged variant.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// AuthKind
// ---------------------------------------------------------------------------

/// Authentication class of an access point as seen by the classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AuthKind {
    /// No authentication advertised.
    Open,
    /// WPA2 personal (pre-shared key).
    #[cfg_attr(feature = "serde", serde(rename = "WPA2"))]
    Wpa2,
    /// WPA3 (SAE).
    #[cfg_attr(feature = "serde", serde(rename = "WPA3"))]
    Wpa3,
    /// Anything the adapters could not place.
    Unknown,
}

impl AuthKind {
    /// The categorical text the full-feature pipeline was trained on.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Wpa2 => "WPA2",
            Self::Wpa3 => "WPA3",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AuthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthKind {
    type Err = std::convert::Infallible;

    /// Case-insensitive; unrecognised text maps to [`AuthKind::Unknown`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "OPEN" => Self::Open,
            "WPA2" => Self::Wpa2,
            "WPA3" => Self::Wpa3,
            _ => Self::Unknown,
        })
    }
}

// ---------------------------------------------------------------------------
// RadioDetails
// ---------------------------------------------------------------------------

/// The field group a structured scan reports for every access point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RadioDetails {
    /// MAC address of the radio, as colon-separated hex text.
    pub bssid: String,
    /// Received signal strength in dBm.
    pub rssi: i32,
    /// Authentication class.
    pub auth: AuthKind,
    /// Channel as derived by [`crate::approx_channel_from_freq`].
    pub channel: u32,
}

// ---------------------------------------------------------------------------
// NetworkObservation
// ---------------------------------------------------------------------------

/// How much an observation knows beyond its SSID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObservationSource {
    /// Structured native scan: every radio field is present.
    Radio(RadioDetails),
    /// Command-line scan text: only the SSID is known.
    SsidOnly,
    /// Operator-supplied network name with an optional BSSID.
    Manual {
        /// BSSID typed by the operator, kept verbatim.
        bssid: Option<String>,
    },
}

/// One detected (or operator-described) access point broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkObservation {
    /// Broadcast network name. May be empty or repeated across radios.
    pub ssid: String,
    /// Which fields beyond the SSID are known.
    pub source: ObservationSource,
}

impl NetworkObservation {
    /// Observation from a structured scan.
    pub fn with_radio(ssid: impl Into<String>, radio: RadioDetails) -> Self {
        Self {
            ssid: ssid.into(),
            source: ObservationSource::Radio(radio),
        }
    }

    /// Observation from command-line scan text.
    pub fn ssid_only(ssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            source: ObservationSource::SsidOnly,
        }
    }

    /// Observation typed in by an operator for a manual check.
    pub fn manual(ssid: impl Into<String>, bssid: Option<String>) -> Self {
        Self {
            ssid: ssid.into(),
            source: ObservationSource::Manual { bssid },
        }
    }

    /// The radio field group, when the source was a structured scan.
    pub fn radio(&self) -> Option<&RadioDetails> {
        match &self.source {
            ObservationSource::Radio(radio) => Some(radio),
            _ => None,
        }
    }

    pub fn bssid(&self) -> Option<&str> {
        match &self.source {
            ObservationSource::Radio(radio) => Some(radio.bssid.as_str()),
            ObservationSource::Manual { bssid } => bssid.as_deref(),
            ObservationSource::SsidOnly => None,
        }
    }

    pub fn rssi(&self) -> Option<i32> {
        self.radio().map(|r| r.rssi)
    }

    pub fn auth(&self) -> Option<AuthKind> {
        self.radio().map(|r| r.auth)
    }

    pub fn channel(&self) -> Option<u32> {
        self.radio().map(|r| r.channel)
    }
}

impl fmt::Display for NetworkObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            ObservationSource::Radio(r) => write!(
                f,
                "{} ({}, {} dBm, ch {}, {})",
                self.ssid, r.bssid, r.rssi, r.channel, r.auth
            ),
            ObservationSource::Manual { bssid: Some(b) } => write!(f, "{} ({b})", self.ssid),
            _ => f.write_str(&self.ssid),
        }
    }
}

/// Flat wire shape: absent fields are omitted, never nulled.
#[cfg(feature = "serde")]
#[derive(Serialize)]
struct FlatObservation<'a> {
    ssid: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bssid: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rssi: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    auth: Option<AuthKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<u32>,
}

#[cfg(feature = "serde")]
impl Serialize for NetworkObservation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FlatObservation {
            ssid: &self.ssid,
            bssid: self.bssid(),
            rssi: self.rssi(),
            auth: self.auth(),
            channel: self.channel(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radio() -> RadioDetails {
        RadioDetails {
            bssid: "aa:bb:cc:11:22:33".into(),
            rssi: -40,
            auth: AuthKind::Open,
            channel: 482,
        }
    }

    #[test]
    fn radio_fields_present_together() {
        let obs = NetworkObservation::with_radio("CoffeeShop", radio());
        assert_eq!(obs.bssid(), Some("aa:bb:cc:11:22:33"));
        assert_eq!(obs.rssi(), Some(-40));
        assert_eq!(obs.auth(), Some(AuthKind::Open));
        assert_eq!(obs.channel(), Some(482));
    }

    #[test]
    fn ssid_only_has_no_radio_fields() {
        let obs = NetworkObservation::ssid_only("");
        assert_eq!(obs.ssid, "");
        assert!(obs.bssid().is_none());
        assert!(obs.rssi().is_none());
        assert!(obs.auth().is_none());
        assert!(obs.channel().is_none());
    }

    #[test]
    fn manual_carries_bssid_without_metrics() {
        let obs = NetworkObservation::manual("Lobby", Some("de:ad:be:ef:00:01".into()));
        assert_eq!(obs.bssid(), Some("de:ad:be:ef:00:01"));
        assert!(obs.rssi().is_none());
        assert!(obs.radio().is_none());
    }

    #[test]
    fn auth_kind_text_forms() {
        assert_eq!(AuthKind::Wpa3.as_str(), "WPA3");
        assert_eq!("wpa2".parse::<AuthKind>().unwrap(), AuthKind::Wpa2);
        assert_eq!("OPEN".parse::<AuthKind>().unwrap(), AuthKind::Open);
        assert_eq!("WEP".parse::<AuthKind>().unwrap(), AuthKind::Unknown);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_flat_and_omits_absent_fields() {
        let full = serde_json::to_value(NetworkObservation::with_radio("Cafe", radio())).unwrap();
        assert_eq!(full["ssid"], "Cafe");
        assert_eq!(full["auth"], "Open");
        assert_eq!(full["rssi"], -40);

        let bare = serde_json::to_value(NetworkObservation::ssid_only("Cafe")).unwrap();
        assert_eq!(bare, serde_json::json!({ "ssid": "Cafe" }));
    }
}
