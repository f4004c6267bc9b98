//! End-to-end tests: artifacts on disk, through the detector, into a report.
//!
//! The fixture pipeline scores only the last BSSID octet:
//! `decision = 10 - 0.1 * octet`, so `..:33` is real and `..:99` is fake.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tempfile::tempdir;
use twinguard_classify::{
    ClassifierGateway, Detector, DetectorConfig, Label, ModelKind, ModelPaths, ScanSummary,
};
use twinguard_wifiscan::{
    Acquisition, AkmSuite, AuthKind, BssidId, NativeScanRecord, NetworkObservation, RadioDetails,
    ScanError, WirelessInterface,
};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn pipeline_json() -> serde_json::Value {
    json!({
        "ssid": {
            "analyzer": "char",
            "ngram_range": [2, 2],
            "vocabulary": { "co": 0, "fe": 1 },
            "idf": [1.0, 1.5]
        },
        "rssi": { "mean": -60.0, "scale": 10.0 },
        "auth": { "categories": ["Open", "WPA2", "WPA3"] },
        "channel": { "mean": 0.0, "scale": 1.0 },
        "classifier": {
            "classes": ["fake", "real"],
            "coef": [[0.0, 0.0, -0.1, 0.0, 0.0, 0.0, 0.0, 0.0]],
            "intercept": [10.0]
        }
    })
}

fn text_model_json() -> serde_json::Value {
    json!({
        "classes": ["fake", "real"],
        "coef": [[-3.0, 1.0]],
        "intercept": [0.5]
    })
}

fn vectorizer_json() -> serde_json::Value {
    json!({
        "analyzer": "word",
        "ngram_range": [1, 1],
        "vocabulary": { "free": 0, "home": 1 },
        "idf": [1.0, 1.0]
    })
}

fn write(dir: &Path, name: &str, value: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn config_with_all(dir: &Path) -> DetectorConfig {
    DetectorConfig {
        pipeline_path: Some(write(dir, "pipeline.json", &pipeline_json())),
        text_model_path: Some(write(dir, "model.json", &text_model_json())),
        vectorizer_path: Some(write(dir, "vectorizer.json", &vectorizer_json())),
        settle_ms: 10,
        ..Default::default()
    }
}

fn coffee_shop_observations() -> Vec<NetworkObservation> {
    vec![
        NetworkObservation::with_radio(
            "CoffeeShop",
            RadioDetails {
                bssid: "AA:BB:CC:11:22:33".into(),
                rssi: -40,
                auth: AuthKind::Open,
                channel: 6,
            },
        ),
        NetworkObservation::with_radio(
            "CoffeeShop_Free",
            RadioDetails {
                bssid: "AA:BB:CC:11:22:99".into(),
                rssi: -60,
                auth: AuthKind::Open,
                channel: 6,
            },
        ),
    ]
}

/// Interface double returning fixed records.
struct FixedInterface {
    records: Vec<NativeScanRecord>,
}

#[async_trait]
impl WirelessInterface for FixedInterface {
    fn name(&self) -> &str {
        "test0"
    }

    async fn request_scan(&self) -> Result<(), ScanError> {
        Ok(())
    }

    async fn scan_results(&self) -> Result<Vec<NativeScanRecord>, ScanError> {
        Ok(self.records.clone())
    }
}

/// Interface double whose radio is switched off.
struct DeadInterface;

#[async_trait]
impl WirelessInterface for DeadInterface {
    fn name(&self) -> &str {
        "dead0"
    }

    async fn request_scan(&self) -> Result<(), ScanError> {
        Err(ScanError::interface_unavailable("dead0", "No such device (-19)"))
    }

    async fn scan_results(&self) -> Result<Vec<NativeScanRecord>, ScanError> {
        Ok(Vec::new())
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

/// Two CoffeeShop radios: the first real, the second fake, the first strongest.
#[test]
fn coffee_shop_scenario() {
    let tmp = tempdir().unwrap();
    let detector = Detector::from_config(config_with_all(tmp.path()));
    assert!(detector.gateway().pipeline_available());

    let acquisition = Acquisition {
        observations: coffee_shop_observations(),
        diagnostics: Vec::new(),
    };
    let report = detector.classify(acquisition, ModelKind::Full);

    assert_eq!(report.networks.len(), 2);
    assert_eq!(report.networks[0].label, Label::Real);
    assert_eq!(report.networks[1].label, Label::Fake);
    assert_eq!(report.summary.total, 2);
    assert_eq!(report.summary.real_count, 1);
    assert_eq!(report.summary.fake_count, 1);
    assert_eq!(
        report.summary.strongest.as_ref().map(|n| n.observation.ssid.as_str()),
        Some("CoffeeShop")
    );

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value["summary"],
        json!({
            "total": 2,
            "real": 1,
            "fake": 1,
            "strongest": {
                "ssid": "CoffeeShop",
                "bssid": "AA:BB:CC:11:22:33",
                "rssi": -40,
                "auth": "Open",
                "channel": 6,
                "prediction": "Real",
                "prediction_class": "real"
            }
        })
    );
}

#[tokio::test(start_paused = true)]
async fn structured_scan_through_fake_interface() {
    let tmp = tempdir().unwrap();
    let detector = Detector::from_config(config_with_all(tmp.path()));

    let iface = FixedInterface {
        records: vec![
            NativeScanRecord {
                ssid: "CoffeeShop".into(),
                bssid: BssidId::parse("aa:bb:cc:11:22:33").unwrap(),
                signal_dbm: -40,
                freq_mhz: 2437,
                akm: vec![],
            },
            NativeScanRecord {
                ssid: "CoffeeShop".into(),
                bssid: BssidId::parse("aa:bb:cc:11:22:99").unwrap(),
                signal_dbm: -35,
                freq_mhz: 2437,
                akm: vec![AkmSuite::Wpa2Psk, AkmSuite::Wpa3Sae],
            },
        ],
    };
    let report = detector.scan_with(&iface).await;

    assert!(report.diagnostics.is_empty());
    assert_eq!(report.summary.total, 2);
    assert_eq!(report.summary.real_count, 1);
    assert_eq!(report.networks[1].observation.auth(), Some(AuthKind::Wpa3));
    assert_eq!(report.networks[1].observation.channel(), Some(487));
    // The fake twin is louder.
    assert_eq!(report.summary.strongest.unwrap().label, Label::Fake);
}

#[tokio::test(start_paused = true)]
async fn dead_interface_gives_empty_report_with_diagnostic() {
    let tmp = tempdir().unwrap();
    let detector = Detector::from_config(config_with_all(tmp.path()));

    let report = detector.scan_with(&DeadInterface).await;
    assert_eq!(report.summary, ScanSummary::default());
    assert_eq!(report.diagnostics.len(), 1);
    assert!(report.diagnostics[0].contains("dead0"));
}

#[test]
fn manual_check_uses_text_model() {
    let tmp = tempdir().unwrap();
    let detector = Detector::from_config(config_with_all(tmp.path()));

    let fake = detector.check("Free WiFi", None).unwrap();
    assert_eq!(fake.label, Label::Fake);
    assert_eq!(fake.prediction(), "Fake");

    let real = detector
        .check("Home", Some("aa:bb:cc:dd:ee:ff"))
        .unwrap();
    assert_eq!(real.label, Label::Real);
    assert_eq!(real.observation.bssid(), Some("aa:bb:cc:dd:ee:ff"));
}

#[test]
fn text_batch_classification() {
    let tmp = tempdir().unwrap();
    let detector = Detector::from_config(config_with_all(tmp.path()));

    let acquisition = Acquisition {
        observations: ["Home", "Free Airport WiFi", "Office"]
            .into_iter()
            .map(NetworkObservation::ssid_only)
            .collect(),
        diagnostics: Vec::new(),
    };
    let report = detector.classify(acquisition, ModelKind::Text);
    let labels: Vec<Label> = report.networks.iter().map(|n| n.label).collect();
    assert_eq!(labels, vec![Label::Real, Label::Fake, Label::Real]);
    assert_eq!(report.summary.total, 3);
    assert!(report.summary.strongest.is_none());
}

// ---------------------------------------------------------------------------
// Degradation
// ---------------------------------------------------------------------------

#[test]
fn no_artifacts_is_a_silent_no_op() {
    let detector = Detector::from_config(DetectorConfig::default());
    assert!(!detector.gateway().pipeline_available());
    assert!(!detector.gateway().text_available());

    let gw = detector.gateway();
    assert!(gw.predict_full(&coffee_shop_observations()).is_empty());
    assert!(gw.predict_text(&coffee_shop_observations()).is_empty());
    assert!(detector.check("CoffeeShop", None).is_none());
}

#[test]
fn broken_pipeline_leaves_text_model_working() {
    let tmp = tempdir().unwrap();
    let mut bad = pipeline_json();
    // One category too many for the coefficient width.
    bad["auth"]["categories"] = json!(["Open", "WPA2", "WPA3", "OWE"]);

    let paths = ModelPaths {
        pipeline: Some(write(tmp.path(), "pipeline.json", &bad)),
        text_model: Some(write(tmp.path(), "model.json", &text_model_json())),
        vectorizer: Some(write(tmp.path(), "vectorizer.json", &vectorizer_json())),
    };
    let gw = ClassifierGateway::load(&paths);

    assert!(!gw.pipeline_available());
    assert!(gw.pipeline_slot().reason().unwrap().contains("Dimension mismatch"));
    assert!(gw.text_available());
    assert_eq!(gw.predict_pairs(&[("Home".into(), None)]).len(), 1);
}

#[test]
fn malformed_json_is_unavailable_not_fatal() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("pipeline.json");
    std::fs::write(&path, "not json at all").unwrap();

    let gw = ClassifierGateway::load(&ModelPaths {
        pipeline: Some(path),
        ..Default::default()
    });
    assert!(!gw.pipeline_available());
    assert!(gw.pipeline_slot().reason().unwrap().contains("Cannot parse"));
}

#[test]
fn gateway_is_shareable_across_threads() {
    let tmp = tempdir().unwrap();
    let detector = Detector::from_config(config_with_all(tmp.path()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let d = detector.clone();
            std::thread::spawn(move || {
                let report = d.classify(
                    Acquisition {
                        observations: coffee_shop_observations(),
                        diagnostics: Vec::new(),
                    },
                    ModelKind::Full,
                );
                report.summary.real_count
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), 1);
    }
}

#[test]
fn settle_comes_from_config() {
    let tmp = tempdir().unwrap();
    let detector = Detector::from_config(config_with_all(tmp.path()));
    assert_eq!(detector.config().settle(), Duration::from_millis(10));
}
