//! # twinguard-classify
//!
//! Classification half of the rogue access point detector.
//!
//! ## Components
//!
//! - **Feature normalizer** ([`features`]): pipeline rows and the
//!   `"SSID BSSID"` text feature
//! - **Artifacts** ([`artifact`]): TF-IDF vectorizer, scaler, one-hot
//!   encoder and linear classifier loaded from JSON
//! - **Classifier gateway** ([`ClassifierGateway`]): both models behind one
//!   contract, each explicitly loaded or unavailable
//! - **Aggregator** ([`ScanSummary`]): label counts and strongest signal
//! - **Detector** ([`Detector`]): acquisition through aggregation
//!
//! ## Example
//!
//! ```rust,no_run
//! use twinguard_classify::{Detector, DetectorConfig};
//! use twinguard_wifiscan::ScanPlatform;
//!
//! # async fn run() {
//! let detector = Detector::from_config(DetectorConfig::default());
//! let report = detector.batch(&ScanPlatform::detect()).await;
//! println!("{} networks, {} fake", report.summary.total, report.summary.fake_count);
//! # }
//! ```

#![deny(unsafe_code)]

pub mod aggregate;
pub mod artifact;
pub mod classified;
pub mod config;
pub mod detector;
pub mod error;
pub mod features;
pub mod gateway;

pub use aggregate::ScanSummary;
pub use artifact::{FullPipeline, LinearClassifier, TextClassifier, TfidfVectorizer};
pub use classified::{ClassifiedNetwork, Label};
pub use config::DetectorConfig;
pub use detector::{Detector, ModelKind, ScanReport};
pub use error::{ConfigError, ModelError, ModelResult};
pub use features::{text_feature, PipelineRow};
pub use gateway::{ClassifierGateway, ModelPaths, ModelSlot};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
