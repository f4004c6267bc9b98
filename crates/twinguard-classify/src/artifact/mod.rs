//! Model artifacts: JSON documents holding the fitted state of each model.
//!
//! | Artifact | Type |
//! |---|---|
//! | full pipeline | [`FullPipeline`] |
//! | text classifier | [`LinearClassifier`] |
//! | text vectorizer | [`TfidfVectorizer`] |
//!
//! Every loader validates dimensions before returning, so a model that
//! loads can always predict.

pub mod linear;
pub mod pipeline;
pub mod preprocess;
pub mod text;
pub mod vectorizer;

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

pub use linear::LinearClassifier;
pub use pipeline::{bssid_last_octet, FullPipeline};
pub use preprocess::{OneHotEncoder, StandardScaler};
pub use text::TextClassifier;
pub use vectorizer::{Analyzer, Norm, TfidfVectorizer};

use crate::error::{ModelError, ModelResult};

/// Read a JSON artifact of type `T` from `path`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> ModelResult<T> {
    debug!(path = %path.display(), "reading artifact");
    let contents = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ModelError::Json {
        path: path.to_path_buf(),
        source,
    })
}
