//! End-to-end orchestration: acquire, normalize, classify, aggregate.
//!
//! The three operations mirror what an operator can ask for:
//!
//! | Operation | Source | Model |
//! |---|---|---|
//! | [`Detector::scan`] | structured interface scan | full pipeline |
//! | [`Detector::check`] | operator-supplied SSID / BSSID | text |
//! | [`Detector::batch`] | command-line scan tool | text |
//!
//! None of them fails. Problems show up as an empty report whose
//! `diagnostics` explain why.

use serde::Serialize;
use tracing::{info, instrument};
use twinguard_wifiscan::{
    acquire_ssids, acquire_structured, platform_interface, Acquisition, ScanPlatform,
    WirelessInterface,
};

use crate::aggregate::ScanSummary;
use crate::classified::ClassifiedNetwork;
use crate::config::DetectorConfig;
use crate::gateway::ClassifierGateway;

/// Classified networks of one request, their summary, and anything that
/// went wrong on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub networks: Vec<ClassifiedNetwork>,
    pub summary: ScanSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
}

impl ScanReport {
    pub fn new(networks: Vec<ClassifiedNetwork>, diagnostics: Vec<String>) -> Self {
        let summary = ScanSummary::from_networks(&networks);
        Self {
            networks,
            summary,
            diagnostics,
        }
    }
}

/// Which model a batch of observations is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Full,
    Text,
}

/// The detection pipeline with its models loaded once.
#[derive(Debug, Clone)]
pub struct Detector {
    gateway: ClassifierGateway,
    config: DetectorConfig,
}

impl Detector {
    pub fn new(gateway: ClassifierGateway, config: DetectorConfig) -> Self {
        Self { gateway, config }
    }

    /// Load the configured artifacts and build a detector. Missing models
    /// only disable their path.
    pub fn from_config(config: DetectorConfig) -> Self {
        let gateway = ClassifierGateway::load(&config.model_paths());
        info!(
            pipeline = gateway.pipeline_available(),
            text = gateway.text_available(),
            "detector ready"
        );
        Self::new(gateway, config)
    }

    pub fn gateway(&self) -> &ClassifierGateway {
        &self.gateway
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Structured scan on the configured interface, classified by the full
    /// pipeline.
    pub async fn scan(&self) -> ScanReport {
        let timeout = self.config.command_timeout();
        match platform_interface(&self.config.interface, timeout) {
            Some(iface) => self.scan_with(iface.as_ref()).await,
            None => self.classify(
                Acquisition::failed(format!(
                    "no structured scan backend on {}",
                    std::env::consts::OS
                )),
                ModelKind::Full,
            ),
        }
    }

    /// Structured scan on a caller-provided interface.
    #[instrument(skip(self, iface), fields(interface = iface.name()))]
    pub async fn scan_with(&self, iface: &dyn WirelessInterface) -> ScanReport {
        let acquisition = acquire_structured(iface, self.config.settle()).await;
        self.classify(acquisition, ModelKind::Full)
    }

    /// Classify one operator-supplied network. `None` when the text model is
    /// unavailable.
    pub fn check(&self, ssid: &str, bssid: Option<&str>) -> Option<ClassifiedNetwork> {
        let bssid = bssid.map(str::trim).filter(|b| !b.is_empty());
        self.gateway
            .predict_pairs(&[(ssid.to_owned(), bssid.map(str::to_owned))])
            .into_iter()
            .next()
    }

    /// Command-line scan on `platform`, classified by the text model.
    #[instrument(skip(self))]
    pub async fn batch(&self, platform: &ScanPlatform) -> ScanReport {
        let acquisition = acquire_ssids(platform, self.config.command_timeout()).await;
        self.classify(acquisition, ModelKind::Text)
    }

    /// Classify an acquisition with the chosen model and summarize it.
    pub fn classify(&self, acquisition: Acquisition, model: ModelKind) -> ScanReport {
        let Acquisition {
            observations,
            mut diagnostics,
        } = acquisition;

        let (networks, slot_reason) = match model {
            ModelKind::Full => (
                self.gateway.predict_full(&observations),
                self.gateway.pipeline_slot().reason(),
            ),
            ModelKind::Text => (
                self.gateway.predict_text(&observations),
                self.gateway.text_slot().reason(),
            ),
        };
        if let Some(reason) = slot_reason {
            if !observations.is_empty() {
                diagnostics.push(format!("model unavailable: {reason}"));
            }
        }

        let report = ScanReport::new(networks, diagnostics);
        info!(
            observed = observations.len(),
            total = report.summary.total,
            real = report.summary.real_count,
            fake = report.summary.fake_count,
            "classification complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinguard_wifiscan::NetworkObservation;

    #[test]
    fn classify_without_models_reports_why() {
        let detector = Detector::new(ClassifierGateway::unavailable(), DetectorConfig::default());
        let acq = Acquisition {
            observations: vec![NetworkObservation::ssid_only("Lobby")],
            diagnostics: Vec::new(),
        };
        let report = detector.classify(acq, ModelKind::Text);
        assert!(report.networks.is_empty());
        assert_eq!(report.summary.total, 0);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].starts_with("model unavailable"));
    }

    #[test]
    fn empty_acquisition_keeps_only_its_diagnostics() {
        let detector = Detector::new(ClassifierGateway::unavailable(), DetectorConfig::default());
        let report = detector.classify(Acquisition::failed("radio off"), ModelKind::Full);
        assert_eq!(report.diagnostics, vec!["radio off".to_string()]);
    }

    #[test]
    fn check_without_text_model_is_none() {
        let detector = Detector::new(ClassifierGateway::unavailable(), DetectorConfig::default());
        assert!(detector.check("Lobby", Some("aa:bb:cc:dd:ee:ff")).is_none());
    }

    #[test]
    fn report_omits_empty_diagnostics() {
        let value = serde_json::to_value(ScanReport::new(Vec::new(), Vec::new())).unwrap();
        assert!(value.get("diagnostics").is_none());
        assert_eq!(value["networks"], serde_json::json!([]));
        assert_eq!(value["summary"]["strongest"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn batch_on_unsupported_platform_is_empty() {
        let detector = Detector::new(ClassifierGateway::unavailable(), DetectorConfig::default());
        let report = detector
            .batch(&ScanPlatform::Unsupported("plan9".into()))
            .await;
        assert_eq!(report.summary.total, 0);
        assert!(report.diagnostics[0].contains("plan9"));
    }
}
