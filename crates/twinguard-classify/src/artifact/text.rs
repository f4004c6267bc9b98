//! The text-only model: a TF-IDF vectorizer and a linear classifier stored
//! as two separate artifacts and always used together.

use std::path::Path;

use crate::artifact::linear::LinearClassifier;
use crate::artifact::read_json;
use crate::artifact::vectorizer::TfidfVectorizer;
use crate::error::{ModelError, ModelResult};

/// A vectorizer and the classifier fit on its output.
#[derive(Debug, Clone, PartialEq)]
pub struct TextClassifier {
    vectorizer: TfidfVectorizer,
    classifier: LinearClassifier,
}

impl TextClassifier {
    /// Pair a vectorizer with a classifier, checking that their widths agree.
    pub fn new(vectorizer: TfidfVectorizer, classifier: LinearClassifier) -> ModelResult<Self> {
        vectorizer.validate()?;
        if classifier.n_features() != vectorizer.n_features() {
            return Err(ModelError::dimension_mismatch(
                "text classifier feature width",
                vectorizer.n_features(),
                classifier.n_features(),
            ));
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Read both artifacts. Either one failing fails the pair.
    pub fn load(model_path: &Path, vectorizer_path: &Path) -> ModelResult<Self> {
        let classifier: LinearClassifier = read_json(model_path)?;
        let vectorizer: TfidfVectorizer = read_json(vectorizer_path)?;
        Self::new(vectorizer, classifier)
    }

    /// Raw class names, one per document, in input order.
    pub fn predict<S: AsRef<str>>(&self, docs: &[S]) -> Vec<String> {
        let x = self.vectorizer.transform(docs);
        self.classifier
            .predict(x.view())
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::artifact::vectorizer::{Analyzer, Norm};

    fn vectorizer() -> TfidfVectorizer {
        TfidfVectorizer {
            analyzer: Analyzer::Word,
            ngram_range: (1, 1),
            lowercase: true,
            sublinear_tf: false,
            norm: Some(Norm::L2),
            vocabulary: [("free".to_string(), 0), ("home".to_string(), 1)]
                .into_iter()
                .collect(),
            idf: vec![1.0, 1.0],
        }
    }

    fn classifier(width: usize) -> LinearClassifier {
        let mut coef = ndarray::Array2::<f64>::zeros((1, width));
        coef[[0, 0]] = -1.0;
        if width > 1 {
            coef[[0, 1]] = 1.0;
        }
        LinearClassifier::new(vec!["fake".into(), "real".into()], coef, array![0.0]).unwrap()
    }

    #[test]
    fn predicts_per_document() {
        let model = TextClassifier::new(vectorizer(), classifier(2)).unwrap();
        let preds = model.predict(&["Free WiFi", "Home Net", "Lobby"]);
        assert_eq!(preds, vec!["fake", "real", "fake"]);
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let err = TextClassifier::new(vectorizer(), classifier(3)).unwrap_err();
        assert!(matches!(err, ModelError::DimensionMismatch { .. }));
    }
}
