//! The pretrained network: an embedding table, mean pooling, and a dense
//! sigmoid head, serialized with bincode.

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelWeights {
    pub embed_dim: usize,
    /// One row per vocabulary index; row 0 is the padding vector and is
    /// ignored during pooling.
    pub embedding: Vec<Vec<f32>>,
    /// Dense layer over the pooled embedding, length `embed_dim`.
    pub dense: Vec<f32>,
    pub bias: f32,
}

impl ModelWeights {
    /// Load and validate the weights artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ModelError::from_io("model weights", path, e))?;
        let weights: ModelWeights =
            bincode::deserialize_from(BufReader::new(file)).map_err(|e| ModelError::Decode {
                kind: "model weights",
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        weights.validate()?;
        tracing::info!(
            path = %path.display(),
            vocab_rows = weights.embedding.len(),
            embed_dim = weights.embed_dim,
            "model weights loaded"
        );
        Ok(weights)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.embed_dim == 0 {
            return Err(ModelError::Invalid("embed_dim is zero".into()));
        }
        if self.dense.len() != self.embed_dim {
            return Err(ModelError::Invalid(format!(
                "dense layer has {} weights, expected {}",
                self.dense.len(),
                self.embed_dim
            )));
        }
        if let Some(bad) = self
            .embedding
            .iter()
            .position(|row| row.len() != self.embed_dim)
        {
            return Err(ModelError::Invalid(format!(
                "embedding row {} has length {}, expected {}",
                bad,
                self.embedding[bad].len(),
                self.embed_dim
            )));
        }
        Ok(())
    }

    /// Forward pass over an encoded sequence: mean-pool the embeddings of
    /// non-padding tokens, apply the dense layer, squash with a sigmoid.
    /// Always lands in [0, 1]; an all-padding sequence scores `sigmoid(bias)`.
    pub fn predict(&self, sequence: &[u32]) -> f32 {
        let mut pooled = vec![0.0f32; self.embed_dim];
        let mut count = 0usize;

        for &idx in sequence {
            if idx == 0 {
                continue;
            }
            let Some(row) = self.embedding.get(idx as usize) else {
                // Index beyond the table means vocabulary/weights mismatch;
                // treat it like padding rather than panicking mid-request.
                tracing::warn!(index = idx, rows = self.embedding.len(), "embedding index out of range");
                continue;
            };
            for (acc, w) in pooled.iter_mut().zip(row) {
                *acc += w;
            }
            count += 1;
        }

        if count > 0 {
            let inv = 1.0 / count as f32;
            for acc in pooled.iter_mut() {
                *acc *= inv;
            }
        }

        let logit: f32 = pooled
            .iter()
            .zip(&self.dense)
            .map(|(a, w)| a * w)
            .sum::<f32>()
            + self.bias;
        sigmoid(logit)
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> ModelWeights {
        ModelWeights {
            embed_dim: 2,
            embedding: vec![
                vec![0.0, 0.0],  // padding
                vec![2.0, 0.0],  // index 1: pushes toxic
                vec![-2.0, 0.0], // index 2: pushes non-toxic
            ],
            dense: vec![1.0, 1.0],
            bias: 0.0,
        }
    }

    #[test]
    fn probability_stays_in_unit_interval() {
        let w = weights();
        for seq in [vec![], vec![0, 0, 0], vec![1, 1, 1], vec![2, 2], vec![1, 2]] {
            let p = w.predict(&seq);
            assert!((0.0..=1.0).contains(&p), "p = {p}");
        }
    }

    #[test]
    fn all_padding_scores_sigmoid_of_bias() {
        let w = weights();
        let p = w.predict(&[0, 0, 0, 0]);
        assert!((p - 0.5).abs() < 1e-6);
    }

    #[test]
    fn opposing_tokens_cancel_under_mean_pooling() {
        let w = weights();
        let p = w.predict(&[1, 2, 0, 0]);
        assert!((p - 0.5).abs() < 1e-6);
    }

    #[test]
    fn toxic_token_raises_probability() {
        let w = weights();
        assert!(w.predict(&[1, 0, 0]) > 0.5);
        assert!(w.predict(&[2, 0, 0]) < 0.5);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let w = weights();
        let p = w.predict(&[99, 0]);
        assert!((p - 0.5).abs() < 1e-6);
    }

    #[test]
    fn mismatched_dense_layer_fails_validation() {
        let mut w = weights();
        w.dense = vec![1.0];
        assert!(w.validate().is_err());
    }

    #[test]
    fn ragged_embedding_fails_validation() {
        let mut w = weights();
        w.embedding[2] = vec![1.0];
        assert!(w.validate().is_err());
    }
}
