//! Linear decision model compatible with a fitted scikit-learn
//! `LogisticRegression` (or any `LinearClassifierMixin`).
//!
//! On disk the coefficients are a plain nested list; in memory they live in
//! an [`ndarray::Array2`] of shape `(n_rows, n_features)`.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Serialized form: `{ classes, coef: [[f64]], intercept: [f64] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawLinear {
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

/// A validated linear classifier.
///
/// Binary models carry a single coefficient row: a positive decision value
/// selects `classes[1]`, anything else `classes[0]`. Multiclass models carry
/// one row per class and select the first row with the highest score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLinear", into = "RawLinear")]
pub struct LinearClassifier {
    classes: Vec<String>,
    coef: Array2<f64>,
    intercept: Array1<f64>,
}

impl LinearClassifier {
    /// Build and validate a classifier.
    pub fn new(classes: Vec<String>, coef: Array2<f64>, intercept: Array1<f64>) -> ModelResult<Self> {
        if classes.len() < 2 {
            return Err(ModelError::invalid(format!(
                "classifier needs at least two classes, got {}",
                classes.len()
            )));
        }
        let expected_rows = if classes.len() == 2 { 1 } else { classes.len() };
        if coef.nrows() != expected_rows {
            return Err(ModelError::dimension_mismatch(
                "classifier coefficient rows",
                expected_rows,
                coef.nrows(),
            ));
        }
        if intercept.len() != coef.nrows() {
            return Err(ModelError::dimension_mismatch(
                "classifier intercept",
                coef.nrows(),
                intercept.len(),
            ));
        }
        if coef.iter().chain(intercept.iter()).any(|v| !v.is_finite()) {
            return Err(ModelError::invalid("classifier weights must be finite"));
        }
        Ok(Self {
            classes,
            coef,
            intercept,
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Width of the feature vectors this model accepts.
    pub fn n_features(&self) -> usize {
        self.coef.ncols()
    }

    /// Raw decision scores for one feature vector.
    pub fn decision_function(&self, x: ArrayView1<'_, f64>) -> Array1<f64> {
        self.coef.dot(&x) + &self.intercept
    }

    /// Predicted class for one feature vector of width [`n_features`].
    ///
    /// [`n_features`]: Self::n_features
    pub fn predict_one(&self, x: ArrayView1<'_, f64>) -> &str {
        let scores = self.decision_function(x);
        let index = if scores.len() == 1 {
            usize::from(scores[0] > 0.0)
        } else {
            first_argmax(scores.view())
        };
        &self.classes[index]
    }

    /// Predicted class for every row of `x`.
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Vec<&str> {
        x.axis_iter(Axis(0)).map(|row| self.predict_one(row)).collect()
    }
}

/// Index of the first maximum; NaN scores never win.
fn first_argmax(scores: ArrayView1<'_, f64>) -> usize {
    let mut best = 0;
    for (i, &s) in scores.iter().enumerate() {
        if s > scores[best] {
            best = i;
        }
    }
    best
}

impl TryFrom<RawLinear> for LinearClassifier {
    type Error = ModelError;

    fn try_from(raw: RawLinear) -> Result<Self, Self::Error> {
        let rows = raw.coef.len();
        let cols = raw.coef.first().map_or(0, Vec::len);
        if let Some(bad) = raw.coef.iter().find(|r| r.len() != cols) {
            return Err(ModelError::dimension_mismatch(
                "classifier coefficient row width",
                cols,
                bad.len(),
            ));
        }
        let flat: Vec<f64> = raw.coef.into_iter().flatten().collect();
        let coef = Array2::from_shape_vec((rows, cols), flat)
            .map_err(|e| ModelError::invalid(format!("coefficient matrix: {e}")))?;
        LinearClassifier::new(raw.classes, coef, Array1::from(raw.intercept))
    }
}

impl From<LinearClassifier> for RawLinear {
    fn from(model: LinearClassifier) -> Self {
        RawLinear {
            classes: model.classes,
            coef: model.coef.outer_iter().map(|r| r.to_vec()).collect(),
            intercept: model.intercept.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn binary() -> LinearClassifier {
        LinearClassifier::new(
            vec!["fake".into(), "real".into()],
            array![[1.0, -1.0]],
            array![0.0],
        )
        .unwrap()
    }

    #[test]
    fn binary_positive_decision_selects_second_class() {
        let m = binary();
        assert_eq!(m.predict_one(array![2.0, 1.0].view()), "real");
        assert_eq!(m.predict_one(array![1.0, 2.0].view()), "fake");
        // Exactly zero is not positive.
        assert_eq!(m.predict_one(array![1.0, 1.0].view()), "fake");
    }

    #[test]
    fn multiclass_first_argmax_wins_ties() {
        let m = LinearClassifier::new(
            vec!["evil_twin".into(), "real".into(), "honeypot".into()],
            array![[1.0, 0.0], [0.0, 1.0], [1.0, 0.0]],
            array![0.0, 0.0, 0.0],
        )
        .unwrap();
        assert_eq!(m.predict_one(array![0.0, 3.0].view()), "real");
        // Rows 0 and 2 tie; row 0 comes first.
        assert_eq!(m.predict_one(array![3.0, 0.0].view()), "evil_twin");
    }

    #[test]
    fn batch_predict_matches_rows() {
        let m = binary();
        let x = array![[2.0, 1.0], [0.0, 5.0]];
        assert_eq!(m.predict(x.view()), vec!["real", "fake"]);
    }

    #[test]
    fn rejects_bad_shapes() {
        let one_class = LinearClassifier::new(vec!["real".into()], array![[1.0]], array![0.0]);
        assert!(one_class.is_err());

        let wrong_rows = LinearClassifier::new(
            vec!["fake".into(), "real".into()],
            array![[1.0], [2.0]],
            array![0.0, 0.0],
        );
        assert!(matches!(wrong_rows, Err(ModelError::DimensionMismatch { .. })));

        let wrong_intercept = LinearClassifier::new(
            vec!["fake".into(), "real".into()],
            array![[1.0]],
            array![0.0, 1.0],
        );
        assert!(wrong_intercept.is_err());
    }

    #[test]
    fn json_shape_is_nested_lists() {
        let json = r#"{"classes":["fake","real"],"coef":[[0.5,-0.25]],"intercept":[0.1]}"#;
        let m: LinearClassifier = serde_json::from_str(json).unwrap();
        assert_eq!(m.n_features(), 2);
        assert_eq!(m.classes(), ["fake", "real"]);

        let back = serde_json::to_value(&m).unwrap();
        assert_eq!(back["coef"], serde_json::json!([[0.5, -0.25]]));
    }

    #[test]
    fn ragged_json_is_rejected() {
        let json = r#"{"classes":["a","b","c"],"coef":[[1.0],[1.0,2.0],[0.0]],"intercept":[0,0,0]}"#;
        assert!(serde_json::from_str::<LinearClassifier>(json).is_err());
    }
}
