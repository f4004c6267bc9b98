//! Feature normalization: observations into the exact input each model was
//! trained on.

use twinguard_wifiscan::NetworkObservation;

/// One input row for the full-feature pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRow {
    pub ssid: String,
    pub bssid: String,
    pub rssi: f64,
    /// Categorical text (`"Open"`, `"WPA2"`, `"WPA3"`, `"Unknown"`).
    pub auth: String,
    pub channel: f64,
}

impl PipelineRow {
    /// Build the row for an observation that carries radio details.
    ///
    /// SSID-only and manual observations return `None`; the full pipeline
    /// cannot score them.
    pub fn from_observation(obs: &NetworkObservation) -> Option<Self> {
        let radio = obs.radio()?;
        Some(Self {
            ssid: obs.ssid.clone(),
            bssid: radio.bssid.clone(),
            rssi: f64::from(radio.rssi),
            auth: radio.auth.as_str().to_owned(),
            channel: f64::from(radio.channel),
        })
    }
}

/// Text-classifier input: `"SSID BSSID"` with one space when a BSSID is
/// given, `"SSID"` alone otherwise. The vectorizer was fit on exactly this
/// format. A blank BSSID counts as absent.
pub fn text_feature(ssid: &str, bssid: Option<&str>) -> String {
    match bssid {
        Some(b) if !b.trim().is_empty() => format!("{ssid} {b}"),
        _ => ssid.to_owned(),
    }
}

/// [`text_feature`] for an observation.
pub fn observation_text(obs: &NetworkObservation) -> String {
    text_feature(&obs.ssid, obs.bssid())
}
