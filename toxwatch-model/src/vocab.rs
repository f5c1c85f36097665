//! Vocabulary encoder: token → index lookup plus fixed-length sequencing.
//!
//! The artifact is a JSON object mapping tokens to 1-based indices (index 0
//! is the padding value). Unknown tokens are dropped, matching the Keras
//! tokenizer the original model was trained with.

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    index: HashMap<String, u32>,
}

impl Vocabulary {
    pub fn from_index(index: HashMap<String, u32>) -> Self {
        Self { index }
    }

    /// Load the token index from a JSON artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ModelError::from_io("vocabulary", path, e))?;
        let index: HashMap<String, u32> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ModelError::Decode {
                kind: "vocabulary",
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        tracing::info!(path = %path.display(), tokens = index.len(), "vocabulary loaded");
        Ok(Self { index })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Encode whitespace-separated tokens into a sequence of exactly
    /// `max_len` indices: unknown tokens drop, the tail is post-truncated,
    /// and the remainder is post-padded with zeros.
    pub fn encode(&self, text: &str, max_len: usize) -> Vec<u32> {
        let mut sequence: Vec<u32> = text
            .split_whitespace()
            .filter_map(|token| self.index.get(token).copied())
            .take(max_len)
            .collect();
        sequence.resize(max_len, 0);
        sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_vocab() -> Vocabulary {
        Vocabulary::from_index(HashMap::from([
            ("hello".to_string(), 1),
            ("world".to_string(), 2),
            ("toxic".to_string(), 3),
        ]))
    }

    #[test]
    fn encodes_known_tokens_in_order() {
        let seq = small_vocab().encode("hello toxic world", 5);
        assert_eq!(seq, vec![1, 3, 2, 0, 0]);
    }

    #[test]
    fn unknown_tokens_are_dropped() {
        let seq = small_vocab().encode("hello zebra world", 4);
        assert_eq!(seq, vec![1, 2, 0, 0]);
    }

    #[test]
    fn long_input_is_post_truncated() {
        let seq = small_vocab().encode("hello world toxic hello world", 3);
        assert_eq!(seq, vec![1, 2, 3]);
    }

    #[test]
    fn empty_input_is_all_padding() {
        let seq = small_vocab().encode("", 4);
        assert_eq!(seq, vec![0, 0, 0, 0]);
    }
}
