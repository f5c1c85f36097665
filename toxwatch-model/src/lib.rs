//! Pretrained toxicity classifier and its supporting text pipeline.
//!
//! Both artifacts load once at startup and loading is the only fallible part;
//! after [`ToxicityClassifier::load`] succeeds, [`ToxicityClassifier::classify`]
//! is infallible and pure.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod net;
pub mod normalize;
pub mod vocab;

pub use net::ModelWeights;
pub use vocab::Vocabulary;

/// Encoded sequences are padded/truncated to this many tokens; must match the
/// value the model was trained with.
pub const MAX_SEQUENCE_LEN: usize = 200;

/// Fixed decision threshold: strictly above is toxic.
pub const TOXICITY_THRESHOLD: f32 = 0.5;

#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("{kind} artifact not found: {path}")]
    MissingArtifact { kind: &'static str, path: PathBuf },

    #[error("failed to read {kind} artifact {path}: {message}")]
    Io {
        kind: &'static str,
        path: PathBuf,
        message: String,
    },

    #[error("failed to decode {kind} artifact {path}: {message}")]
    Decode {
        kind: &'static str,
        path: PathBuf,
        message: String,
    },

    #[error("model weights are inconsistent: {0}")]
    Invalid(String),
}

impl ModelError {
    pub(crate) fn from_io(kind: &'static str, path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            ModelError::MissingArtifact {
                kind,
                path: path.to_path_buf(),
            }
        } else {
            ModelError::Io {
                kind,
                path: path.to_path_buf(),
                message: err.to_string(),
            }
        }
    }
}

/// Binary toxicity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "toxic")]
    Toxic,
    #[serde(rename = "non-toxic")]
    NonToxic,
}

impl Label {
    pub fn from_probability(probability: f32) -> Self {
        if probability > TOXICITY_THRESHOLD {
            Label::Toxic
        } else {
            Label::NonToxic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Toxic => "toxic",
            Label::NonToxic => "non-toxic",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output for a single text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: Label,
    pub probability: f32,
}

#[derive(Debug)]
pub struct ToxicityClassifier {
    vocab: Vocabulary,
    weights: ModelWeights,
    max_len: usize,
}

impl ToxicityClassifier {
    /// Load both artifacts from disk. Callers treat failure as fatal before
    /// any request is served.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        weights_path: P,
        vocab_path: Q,
    ) -> Result<Self, ModelError> {
        let weights = ModelWeights::load(weights_path)?;
        let vocab = Vocabulary::load(vocab_path)?;
        Self::from_parts(vocab, weights)
    }

    /// Assemble a classifier from already-decoded parts (tests build tiny
    /// models this way).
    pub fn from_parts(vocab: Vocabulary, weights: ModelWeights) -> Result<Self, ModelError> {
        weights.validate()?;
        Ok(Self {
            vocab,
            weights,
            max_len: MAX_SEQUENCE_LEN,
        })
    }

    /// Normalize, encode, and score a text.
    pub fn classify(&self, text: &str) -> Verdict {
        let normalized = normalize::normalize(text);
        let sequence = self.vocab.encode(&normalized, self.max_len);
        let probability = self.weights.predict(&sequence);
        Verdict {
            label: Label::from_probability(probability),
            probability,
        }
    }
}
