use serde::{Deserialize, Serialize};

use crate::config::NetworkConfig;
use crate::error::BrainError;
use crate::genome::Genome;

fn relu(x: f32) -> f32 {
    x.max(0.0)
}

/// One-hidden-layer feed-forward net: sensor vector in, action logits or
/// probabilities out. Pure inference over the genome it owns; evolution
/// rewrites the genome, never this code path.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShallowNet {
    pub cfg: NetworkConfig,
    pub genome: Genome,
}

impl ShallowNet {
    pub fn new(cfg: NetworkConfig, genome: Genome) -> Result<Self, BrainError> {
        cfg.validate()?;
        genome.check_shapes(&cfg)?;
        Ok(Self { cfg, genome })
    }

    /// Raw logits for one sensor reading: z1 = x·W1ᵗ + b1, ReLU,
    /// z2 = h1·W2ᵗ + b2. This is the per-tick path.
    pub fn forward_row(&self, x: &[f32]) -> Result<Vec<f32>, BrainError> {
        if x.len() != self.cfg.n_inputs {
            return Err(BrainError::InputShape {
                expected: self.cfg.n_inputs,
                got: x.len(),
            });
        }

        let hidden: Vec<f32> = self
            .genome
            .w1
            .iter()
            .zip(&self.genome.b1)
            .map(|(weights, b)| {
                relu(weights.iter().zip(x).map(|(w, i)| w * i).sum::<f32>() + b)
            })
            .collect();

        Ok(self
            .genome
            .w2
            .iter()
            .zip(&self.genome.b2)
            .map(|(weights, b)| {
                weights.iter().zip(&hidden).map(|(w, h)| w * h).sum::<f32>() + b
            })
            .collect())
    }

    /// Batch variant: one logit row per input row, shape (batch, n_outputs).
    pub fn forward(&self, batch: &[Vec<f32>]) -> Result<Vec<Vec<f32>>, BrainError> {
        batch.iter().map(|row| self.forward_row(row)).collect()
    }

    /// Softmax over the logits, applied independently to each row:
    /// subtract the row max before exponentiating, then divide by the row
    /// sum. Every row sums to 1.0 and large logits cannot overflow.
    pub fn predict_proba(&self, batch: &[Vec<f32>]) -> Result<Vec<Vec<f32>>, BrainError> {
        Ok(self.forward(batch)?.into_iter().map(softmax_row).collect())
    }

    pub fn predict_proba_row(&self, x: &[f32]) -> Result<Vec<f32>, BrainError> {
        Ok(softmax_row(self.forward_row(x)?))
    }

    /// Most probable action per row; ties go to the lowest index.
    pub fn predict_class(&self, batch: &[Vec<f32>]) -> Result<Vec<usize>, BrainError> {
        Ok(self
            .predict_proba(batch)?
            .iter()
            .map(|row| argmax(row))
            .collect())
    }
}

fn softmax_row(mut row: Vec<f32>) -> Vec<f32> {
    let max = row.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    for v in &mut row {
        *v = (*v - max).exp();
    }
    // at least one entry is exp(0) = 1, so the sum is never zero
    let sum: f32 = row.iter().sum();
    for v in &mut row {
        *v /= sum;
    }
    row
}

/// Argmax over a slice; strict `>` keeps ties at the lowest index.
fn argmax(v: &[f32]) -> usize {
    let mut best_i = 0;
    let mut best_v = v[0];
    for i in 1..v.len() {
        if v[i] > best_v {
            best_v = v[i];
            best_i = i;
        }
    }
    best_i
}
