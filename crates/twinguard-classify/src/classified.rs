//! Classified observations and the binary label policy.

use std::fmt;

use serde::{Serialize, Serializer};
use twinguard_wifiscan::NetworkObservation;

/// Binary verdict for one observation.
///
/// Models may be trained with a richer class vocabulary; everything other
/// than exactly `"real"` collapses to [`Label::Fake`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Real,
    Fake,
}

impl Label {
    /// Collapse a raw model class onto the binary label.
    pub fn from_class(raw: &str) -> Self {
        if raw == "real" {
            Label::Real
        } else {
            Label::Fake
        }
    }

    /// Lowercase wire form (`"real"` / `"fake"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Real => "real",
            Label::Fake => "fake",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Real => f.write_str("Real"),
            Label::Fake => f.write_str("Fake"),
        }
    }
}

/// An observation together with the model's verdict on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedNetwork {
    pub observation: NetworkObservation,
    pub label: Label,
    /// Class name exactly as the model produced it.
    pub raw_class: String,
}

impl ClassifiedNetwork {
    pub fn new(observation: NetworkObservation, raw_class: impl Into<String>) -> Self {
        let raw_class = raw_class.into();
        Self {
            label: Label::from_class(&raw_class),
            observation,
            raw_class,
        }
    }

    /// Display form of the raw class: first character upper-cased, the rest
    /// lower-cased (`"real"` becomes `"Real"`).
    pub fn prediction(&self) -> String {
        capitalize(&self.raw_class)
    }

    pub fn rssi(&self) -> Option<i32> {
        self.observation.rssi()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[derive(Serialize)]
struct ClassifiedWire<'a> {
    #[serde(flatten)]
    observation: &'a NetworkObservation,
    prediction: String,
    prediction_class: Label,
}

impl Serialize for ClassifiedNetwork {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ClassifiedWire {
            observation: &self.observation,
            prediction: self.prediction(),
            prediction_class: self.label,
        }
        .serialize(serializer)
    }
}
