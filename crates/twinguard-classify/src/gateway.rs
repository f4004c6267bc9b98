//! The classifier gateway: both models behind one prediction contract.
//!
//! Each model sits in a [`ModelSlot`] that is either loaded or explicitly
//! unavailable. Predicting through an unavailable slot yields an empty
//! list, never an error, so callers treat "no predictions" as an expected
//! outcome on hosts without provisioned models.
//!
//! Loaded models are immutable and shared through [`Arc`]; the gateway is
//! cheap to clone and safe to use from concurrent requests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use twinguard_wifiscan::NetworkObservation;

use crate::artifact::{FullPipeline, TextClassifier};
use crate::classified::ClassifiedNetwork;
use crate::error::ModelResult;
use crate::features::{observation_text, PipelineRow};

// ---------------------------------------------------------------------------
// ModelSlot
// ---------------------------------------------------------------------------

/// A model that either loaded or did not.
#[derive(Debug)]
pub enum ModelSlot<T> {
    Loaded(Arc<T>),
    Unavailable {
        /// Why the model is missing, for diagnostics.
        reason: String,
    },
}

impl<T> Clone for ModelSlot<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Loaded(model) => Self::Loaded(Arc::clone(model)),
            Self::Unavailable { reason } => Self::Unavailable {
                reason: reason.clone(),
            },
        }
    }
}

impl<T> ModelSlot<T> {
    pub fn loaded(model: T) -> Self {
        Self::Loaded(Arc::new(model))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Turn a load result into a slot, logging a failure under `what`.
    pub fn from_result(what: &str, result: ModelResult<T>) -> Self {
        match result {
            Ok(model) => {
                info!(model = what, "model loaded");
                Self::loaded(model)
            }
            Err(e) => {
                warn!(model = what, error = %e, "model unavailable");
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Loaded(model) => Some(model.as_ref()),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// The unavailability reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Loaded(_) => None,
            Self::Unavailable { reason } => Some(reason.as_str()),
        }
    }
}

// ---------------------------------------------------------------------------
// ModelPaths
// ---------------------------------------------------------------------------

/// Where the three artifacts live. Any may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelPaths {
    pub pipeline: Option<PathBuf>,
    pub text_model: Option<PathBuf>,
    pub vectorizer: Option<PathBuf>,
}

impl ModelPaths {
    pub fn new(
        pipeline: Option<&Path>,
        text_model: Option<&Path>,
        vectorizer: Option<&Path>,
    ) -> Self {
        Self {
            pipeline: pipeline.map(Path::to_path_buf),
            text_model: text_model.map(Path::to_path_buf),
            vectorizer: vectorizer.map(Path::to_path_buf),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pipeline.is_none() && self.text_model.is_none() && self.vectorizer.is_none()
    }
}

// ---------------------------------------------------------------------------
// ClassifierGateway
// ---------------------------------------------------------------------------

/// Both classifiers, each independently available or not.
#[derive(Debug, Clone)]
pub struct ClassifierGateway {
    pipeline: ModelSlot<FullPipeline>,
    text: ModelSlot<TextClassifier>,
}

impl ClassifierGateway {
    pub fn new(pipeline: ModelSlot<FullPipeline>, text: ModelSlot<TextClassifier>) -> Self {
        Self { pipeline, text }
    }

    /// A gateway with no models at all.
    pub fn unavailable() -> Self {
        Self::new(
            ModelSlot::unavailable("no pipeline configured"),
            ModelSlot::unavailable("no text model configured"),
        )
    }

    /// Load every configured artifact. Never fails: a missing or invalid
    /// artifact leaves its slot unavailable and the other slot unaffected.
    pub fn load(paths: &ModelPaths) -> Self {
        let pipeline = match &paths.pipeline {
            Some(path) => ModelSlot::from_result("pipeline", FullPipeline::load(path)),
            None => ModelSlot::unavailable("no pipeline path configured"),
        };
        let text = match (&paths.text_model, &paths.vectorizer) {
            (Some(model), Some(vectorizer)) => {
                ModelSlot::from_result("text", TextClassifier::load(model, vectorizer))
            }
            (None, None) => ModelSlot::unavailable("no text model or vectorizer path configured"),
            (None, Some(_)) => ModelSlot::unavailable("no text model path configured"),
            (Some(_), None) => ModelSlot::unavailable("no vectorizer path configured"),
        };
        Self::new(pipeline, text)
    }

    /// Replace the pipeline slot with a loaded model.
    pub fn with_pipeline(mut self, pipeline: FullPipeline) -> Self {
        self.pipeline = ModelSlot::loaded(pipeline);
        self
    }

    /// Replace the text slot with a loaded model.
    pub fn with_text(mut self, text: TextClassifier) -> Self {
        self.text = ModelSlot::loaded(text);
        self
    }

    pub fn pipeline_slot(&self) -> &ModelSlot<FullPipeline> {
        &self.pipeline
    }

    pub fn text_slot(&self) -> &ModelSlot<TextClassifier> {
        &self.text
    }

    pub fn pipeline_available(&self) -> bool {
        self.pipeline.is_loaded()
    }

    pub fn text_available(&self) -> bool {
        self.text.is_loaded()
    }

    /// Classify with the full-feature pipeline.
    ///
    /// Observations without radio details cannot form a pipeline row and are
    /// skipped. Output order follows input order.
    pub fn predict_full(&self, observations: &[NetworkObservation]) -> Vec<ClassifiedNetwork> {
        let Some(pipeline) = self.pipeline.get() else {
            return Vec::new();
        };

        let (eligible, rows): (Vec<&NetworkObservation>, Vec<PipelineRow>) = observations
            .iter()
            .filter_map(|obs| PipelineRow::from_observation(obs).map(|row| (obs, row)))
            .unzip();
        if eligible.len() < observations.len() {
            debug!(
                skipped = observations.len() - eligible.len(),
                "observations without radio details skipped by pipeline"
            );
        }

        let classes = pipeline.predict(&rows);
        eligible
            .into_iter()
            .zip(classes)
            .map(|(obs, class)| ClassifiedNetwork::new(obs.clone(), class))
            .collect()
    }

    /// Classify with the text-only model on `"SSID BSSID"` / `"SSID"` text.
    pub fn predict_text(&self, observations: &[NetworkObservation]) -> Vec<ClassifiedNetwork> {
        let Some(text) = self.text.get() else {
            return Vec::new();
        };
        let docs: Vec<String> = observations.iter().map(observation_text).collect();
        observations
            .iter()
            .cloned()
            .zip(text.predict(&docs))
            .map(|(obs, class)| ClassifiedNetwork::new(obs, class))
            .collect()
    }

    /// Classify operator-supplied SSID / optional BSSID pairs.
    pub fn predict_pairs(&self, pairs: &[(String, Option<String>)]) -> Vec<ClassifiedNetwork> {
        let observations: Vec<NetworkObservation> = pairs
            .iter()
            .map(|(ssid, bssid)| NetworkObservation::manual(ssid.clone(), bssid.clone()))
            .collect();
        self.predict_text(&observations)
    }

    /// Classify a mixed batch, routing each observation by what it carries:
    /// radio observations to the pipeline, the rest to the text model.
    ///
    /// Observations whose model is unavailable are dropped; the rest keep
    /// their input order.
    pub fn predict(&self, observations: &[NetworkObservation]) -> Vec<ClassifiedNetwork> {
        let (radio, other): (Vec<_>, Vec<_>) = observations
            .iter()
            .enumerate()
            .partition(|(_, obs)| obs.radio().is_some());

        let mut tagged: Vec<(usize, ClassifiedNetwork)> = Vec::with_capacity(observations.len());
        if self.pipeline_available() {
            let (index, obs): (Vec<usize>, Vec<NetworkObservation>) =
                radio.into_iter().map(|(i, o)| (i, o.clone())).unzip();
            tagged.extend(index.into_iter().zip(self.predict_full(&obs)));
        }
        if self.text_available() {
            let (index, obs): (Vec<usize>, Vec<NetworkObservation>) =
                other.into_iter().map(|(i, o)| (i, o.clone())).unzip();
            tagged.extend(index.into_iter().zip(self.predict_text(&obs)));
        }
        tagged.sort_by_key(|(i, _)| *i);
        tagged.into_iter().map(|(_, net)| net).collect()
    }
}

impl Default for ClassifierGateway {
    fn default() -> Self {
        Self::unavailable()
    }
}
