//! Single-column numeric scaling and categorical encoding.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Standardization `(x - mean) / scale` of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: f64,
    pub scale: f64,
}

impl StandardScaler {
    pub fn validate(&self) -> ModelResult<()> {
        if !self.mean.is_finite() || !self.scale.is_finite() {
            return Err(ModelError::invalid("scaler mean and scale must be finite"));
        }
        Ok(())
    }

    /// A zero scale (constant training column) divides by one instead.
    pub fn transform(&self, x: f64) -> f64 {
        let scale = if self.scale == 0.0 { 1.0 } else { self.scale };
        (x - self.mean) / scale
    }
}

/// One-hot encoding of one categorical column. Unknown categories encode to
/// all zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    /// Known categories, in column order.
    pub categories: Vec<String>,
}

impl OneHotEncoder {
    pub fn n_features(&self) -> usize {
        self.categories.len()
    }

    pub fn validate(&self) -> ModelResult<()> {
        if self.categories.is_empty() {
            return Err(ModelError::invalid("one-hot encoder has no categories"));
        }
        for (i, c) in self.categories.iter().enumerate() {
            if self.categories[..i].contains(c) {
                return Err(ModelError::invalid(format!("duplicate category {c:?}")));
            }
        }
        Ok(())
    }

    /// Column index of `value`, if it is a known category.
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == value)
    }

    /// Write the encoding of `value` into `out`, which must be zeroed and
    /// `n_features()` wide.
    pub fn encode_into(&self, value: &str, out: &mut [f64]) {
        if let Some(i) = self.index_of(value) {
            out[i] = 1.0;
        }
    }
}
