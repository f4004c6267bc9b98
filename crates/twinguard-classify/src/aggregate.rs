//! Batch summary over classified networks.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::classified::{ClassifiedNetwork, Label};

/// Label counts and the strongest-signal network of one batch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ScanSummary {
    pub total: usize,
    #[serde(rename = "real")]
    pub real_count: usize,
    #[serde(rename = "fake")]
    pub fake_count: usize,
    /// Highest-RSSI network; absent for an empty batch or one where no
    /// network carries an RSSI. Serialized as `{}` when absent.
    #[serde(serialize_with = "strongest_or_empty")]
    pub strongest: Option<ClassifiedNetwork>,
}

impl ScanSummary {
    /// Summarize `networks`, keeping the first of equally strong networks.
    pub fn from_networks(networks: &[ClassifiedNetwork]) -> Self {
        let total = networks.len();
        let real_count = networks.iter().filter(|n| n.label == Label::Real).count();

        let mut strongest: Option<(&ClassifiedNetwork, i32)> = None;
        for net in networks {
            let Some(rssi) = net.rssi() else {
                continue;
            };
            match strongest {
                Some((_, best)) if rssi <= best => {}
                _ => strongest = Some((net, rssi)),
            }
        }

        Self {
            total,
            real_count,
            fake_count: total - real_count,
            strongest: strongest.map(|(net, _)| net.clone()),
        }
    }

    /// No network was classified at all, as opposed to "all real".
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

fn strongest_or_empty<S: Serializer>(
    strongest: &Option<ClassifiedNetwork>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match strongest {
        Some(net) => net.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use twinguard_wifiscan::{AuthKind, NetworkObservation, RadioDetails};

    use super::*;

    fn net(ssid: &str, rssi: i32, class: &str) -> ClassifiedNetwork {
        ClassifiedNetwork::new(
            NetworkObservation::with_radio(
                ssid,
                RadioDetails {
                    bssid: format!("aa:bb:cc:00:00:{:02x}", rssi.unsigned_abs()),
                    rssi,
                    auth: AuthKind::Open,
                    channel: 6,
                },
            ),
            class,
        )
    }

    #[test]
    fn empty_input() {
        let s = ScanSummary::from_networks(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.real_count, 0);
        assert_eq!(s.fake_count, 0);
        assert!(s.strongest.is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn empty_summary_serializes_strongest_as_empty_object() {
        let value = serde_json::to_value(ScanSummary::from_networks(&[])).unwrap();
        assert_eq!(
            value,
            json!({ "total": 0, "real": 0, "fake": 0, "strongest": {} })
        );
    }

    #[test]
    fn strongest_tie_keeps_first() {
        let nets = vec![
            net("a", -50, "real"),
            net("b", -30, "fake"),
            net("c", -30, "real"),
            net("d", -70, "fake"),
        ];
        let s = ScanSummary::from_networks(&nets);
        assert_eq!(s.strongest.as_ref().map(|n| n.observation.ssid.as_str()), Some("b"));
    }

    #[test]
    fn counts_always_add_up() {
        let nets = vec![
            net("a", -50, "real"),
            net("b", -30, "fake"),
            net("c", -30, "honeypot"),
            net("d", -70, "real"),
        ];
        let s = ScanSummary::from_networks(&nets);
        assert_eq!(s.total, 4);
        assert_eq!(s.real_count, 2);
        assert_eq!(s.fake_count, 2);
        assert_eq!(s.total, s.real_count + s.fake_count);
    }

    #[test]
    fn ssid_only_networks_have_no_strongest() {
        let nets = vec![
            ClassifiedNetwork::new(NetworkObservation::ssid_only("a"), "real"),
            ClassifiedNetwork::new(NetworkObservation::ssid_only("b"), "fake"),
        ];
        let s = ScanSummary::from_networks(&nets);
        assert_eq!(s.total, 2);
        assert!(s.strongest.is_none());
    }

    #[test]
    fn networks_without_rssi_are_skipped_for_strongest() {
        let nets = vec![
            ClassifiedNetwork::new(NetworkObservation::ssid_only("loud"), "real"),
            net("quiet", -80, "real"),
        ];
        let s = ScanSummary::from_networks(&nets);
        assert_eq!(s.strongest.unwrap().observation.ssid, "quiet");
    }
}
