//! TF-IDF text vectorizer compatible with a fitted scikit-learn
//! `TfidfVectorizer`.
//!
//! Only the fitted state is stored: the vocabulary, the IDF weights and the
//! options that change how a document is turned into terms. Terms outside
//! the vocabulary are dropped.

use std::collections::{HashMap, HashSet};

use ndarray::{Array1, Array2};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Runs of two or more whitespace characters, collapsed to one space before
/// character n-grams are taken. A lone tab or newline is kept as is.
static WHITE_SPACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s\s+").expect("valid whitespace pattern"));

/// Default word token pattern: two or more word characters.
static WORD_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid word token pattern"));

/// How a document is split into terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Analyzer {
    /// Character n-grams over the whole document.
    Char,
    /// Character n-grams inside space-padded words.
    CharWb,
    /// Word n-grams.
    Word,
}

/// Row normalization applied after IDF weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_true() -> bool {
    true
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// A fitted TF-IDF vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    pub analyzer: Analyzer,
    /// Inclusive `[min_n, max_n]`.
    pub ngram_range: (usize, usize),
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    /// `null` disables normalization; omitted means L2.
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    /// Term to column index.
    pub vocabulary: HashMap<String, usize>,
    /// IDF weight per column.
    pub idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Number of output columns.
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Check that the fitted state is internally consistent.
    pub fn validate(&self) -> ModelResult<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ModelError::invalid(format!(
                "ngram_range ({min_n}, {max_n}) must satisfy 1 <= min <= max"
            )));
        }
        if self.vocabulary.len() != self.idf.len() {
            return Err(ModelError::dimension_mismatch(
                "vectorizer idf",
                self.vocabulary.len(),
                self.idf.len(),
            ));
        }
        let mut seen = HashSet::with_capacity(self.vocabulary.len());
        for (term, &index) in &self.vocabulary {
            if index >= self.idf.len() || !seen.insert(index) {
                return Err(ModelError::invalid(format!(
                    "vocabulary term {term:?} has bad column index {index}"
                )));
            }
        }
        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::invalid("idf weights must be finite"));
        }
        Ok(())
    }

    /// Extract the raw terms of a document, with repeats.
    pub fn analyze(&self, doc: &str) -> Vec<String> {
        let text = if self.lowercase {
            doc.to_lowercase()
        } else {
            doc.to_owned()
        };
        let (min_n, max_n) = self.ngram_range;
        match self.analyzer {
            Analyzer::Char => char_ngrams(&text, min_n, max_n),
            Analyzer::CharWb => char_wb_ngrams(&text, min_n, max_n),
            Analyzer::Word => word_ngrams(&text, min_n, max_n),
        }
    }

    /// Vectorize one document into a dense TF-IDF row.
    pub fn transform_one(&self, doc: &str) -> Array1<f64> {
        let mut row = Array1::<f64>::zeros(self.n_features());
        for term in self.analyze(doc) {
            if let Some(&index) = self.vocabulary.get(&term) {
                row[index] += 1.0;
            }
        }

        if self.sublinear_tf {
            row.mapv_inplace(|tf| if tf > 0.0 { 1.0 + tf.ln() } else { 0.0 });
        }
        row *= &Array1::from(self.idf.clone());

        match self.norm {
            Some(Norm::L2) => {
                let len = row.dot(&row).sqrt();
                if len > 0.0 {
                    row /= len;
                }
            }
            Some(Norm::L1) => {
                let len = row.iter().map(|v| v.abs()).sum::<f64>();
                if len > 0.0 {
                    row /= len;
                }
            }
            None => {}
        }
        row
    }

    /// Vectorize a batch of documents, one row each.
    pub fn transform<S: AsRef<str>>(&self, docs: &[S]) -> Array2<f64> {
        let mut out = Array2::<f64>::zeros((docs.len(), self.n_features()));
        for (mut row, doc) in out.rows_mut().into_iter().zip(docs) {
            row.assign(&self.transform_one(doc.as_ref()));
        }
        out
    }
}

/// Character n-grams over the whitespace-normalized document.
fn char_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let normalized = WHITE_SPACES.replace_all(text, " ");
    let chars: Vec<char> = normalized.chars().collect();
    let mut grams = Vec::new();
    for n in min_n..=max_n.min(chars.len()) {
        for window in chars.windows(n) {
            grams.push(window.iter().collect());
        }
    }
    grams
}

/// Character n-grams inside words padded with one space on each side.
///
/// A padded word no longer than `n` is emitted whole, once, and ends the
/// n-gram loop for that word.
fn char_wb_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let normalized = WHITE_SPACES.replace_all(text, " ");
    let mut grams = Vec::new();
    for word in normalized.split_whitespace() {
        let padded: Vec<char> = std::iter::once(' ')
            .chain(word.chars())
            .chain(std::iter::once(' '))
            .collect();
        for n in min_n..=max_n {
            if n >= padded.len() {
                grams.push(padded.iter().collect());
                break;
            }
            for window in padded.windows(n) {
                grams.push(window.iter().collect());
            }
        }
    }
    grams
}

/// Word n-grams joined by a single space.
fn word_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let tokens: Vec<&str> = WORD_TOKEN.find_iter(text).map(|m| m.as_str()).collect();
    let mut grams = Vec::new();
    for n in min_n..=max_n.min(tokens.len()) {
        for window in tokens.windows(n) {
            grams.push(window.join(" "));
        }
    }
    grams
}
