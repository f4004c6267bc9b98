//! The full-feature pipeline: SSID text, BSSID, RSSI, Auth and Channel in,
//! one class name out.
//!
//! Feature vector layout, in order:
//!
//! ```text
//! [ tfidf(SSID) ... | last BSSID octet | scaled RSSI | one-hot Auth ... | scaled Channel ]
//! ```

use std::path::Path;

use ndarray::{s, Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::artifact::linear::LinearClassifier;
use crate::artifact::preprocess::{OneHotEncoder, StandardScaler};
use crate::artifact::read_json;
use crate::artifact::vectorizer::TfidfVectorizer;
use crate::error::{ModelError, ModelResult};
use crate::features::PipelineRow;

/// A fitted full-feature pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullPipeline {
    pub ssid: TfidfVectorizer,
    pub rssi: StandardScaler,
    pub auth: OneHotEncoder,
    pub channel: StandardScaler,
    pub classifier: LinearClassifier,
}

impl FullPipeline {
    /// Read and validate a pipeline artifact.
    pub fn load(path: &Path) -> ModelResult<Self> {
        let pipeline: Self = read_json(path)?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    /// Width of the assembled feature vector.
    pub fn n_features(&self) -> usize {
        self.ssid.n_features() + 1 + 1 + self.auth.n_features() + 1
    }

    pub fn validate(&self) -> ModelResult<()> {
        self.ssid.validate()?;
        self.rssi.validate()?;
        self.auth.validate()?;
        self.channel.validate()?;
        if self.classifier.n_features() != self.n_features() {
            return Err(ModelError::dimension_mismatch(
                "pipeline feature width",
                self.n_features(),
                self.classifier.n_features(),
            ));
        }
        Ok(())
    }

    /// Assemble the feature vector for one row.
    pub fn features(&self, row: &PipelineRow) -> Array1<f64> {
        let text_width = self.ssid.n_features();
        let auth_start = text_width + 2;
        let auth_end = auth_start + self.auth.n_features();

        let mut x = Array1::<f64>::zeros(self.n_features());
        x.slice_mut(s![..text_width])
            .assign(&self.ssid.transform_one(&row.ssid));
        x[text_width] = bssid_last_octet(&row.bssid);
        x[text_width + 1] = self.rssi.transform(row.rssi);
        if let Some(slot) = x.slice_mut(s![auth_start..auth_end]).as_slice_mut() {
            self.auth.encode_into(&row.auth, slot);
        }
        x[auth_end] = self.channel.transform(row.channel);
        x
    }

    /// Feature matrix for a batch, one row each.
    pub fn transform(&self, rows: &[PipelineRow]) -> Array2<f64> {
        let mut out = Array2::<f64>::zeros((rows.len(), self.n_features()));
        for (mut dst, row) in out.rows_mut().into_iter().zip(rows) {
            dst.assign(&self.features(row));
        }
        out
    }

    /// Raw class names, one per row, in input order.
    pub fn predict(&self, rows: &[PipelineRow]) -> Vec<String> {
        let x = self.transform(rows);
        self.classifier
            .predict(x.view())
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}

/// Last `:`-separated group of a BSSID read as hex, or `-1` when it is
/// absent or not hex.
pub fn bssid_last_octet(bssid: &str) -> f64 {
    let last = bssid.rsplit(':').next().unwrap_or_default().trim();
    let digits = last
        .strip_prefix("0x")
        .or_else(|| last.strip_prefix("0X"))
        .unwrap_or(last);
    i64::from_str_radix(digits, 16).map_or(-1.0, |v| v as f64)
}
