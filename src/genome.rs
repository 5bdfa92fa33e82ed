use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::config::NetworkConfig;
use crate::error::BrainError;

/// One individual's full parameter set: two weight matrices and two bias
/// vectors. Rows are output neurons, so `w1` is (hidden x inputs) and
/// `w2` is (outputs x hidden).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub w1: Vec<Vec<f32>>,
    pub b1: Vec<f32>,
    pub w2: Vec<Vec<f32>>,
    pub b2: Vec<f32>,
}

impl Genome {
    /// Fresh random genome: every entry drawn independently from
    /// N(0, weight_scale^2) using the caller-supplied RNG. There is no
    /// global random state anywhere in the core, so two brains seeded
    /// differently can never share draws.
    pub fn random(cfg: &NetworkConfig, rng: &mut impl Rng) -> Result<Self, BrainError> {
        let normal = Normal::new(0.0f32, cfg.weight_scale)
            .map_err(|e| BrainError::Config(format!("weight_scale: {e}")))?;

        let w1 = (0..cfg.n_hidden)
            .map(|_| (0..cfg.n_inputs).map(|_| normal.sample(rng)).collect())
            .collect();
        let b1 = (0..cfg.n_hidden).map(|_| normal.sample(rng)).collect();
        let w2 = (0..cfg.n_outputs)
            .map(|_| (0..cfg.n_hidden).map(|_| normal.sample(rng)).collect())
            .collect();
        let b2 = (0..cfg.n_outputs).map(|_| normal.sample(rng)).collect();

        Ok(Self { w1, b1, w2, b2 })
    }

    /// Check every array against the configured dimensions. A wrong shape
    /// is a hard error, never a silent reshape or truncation.
    pub fn check_shapes(&self, cfg: &NetworkConfig) -> Result<(), BrainError> {
        check_matrix("w1", &self.w1, cfg.n_hidden, cfg.n_inputs)?;
        check_vector("b1", &self.b1, cfg.n_hidden)?;
        check_matrix("w2", &self.w2, cfg.n_outputs, cfg.n_hidden)?;
        check_vector("b2", &self.b2, cfg.n_outputs)?;
        Ok(())
    }
}

fn check_matrix(
    key: &'static str,
    m: &[Vec<f32>],
    rows: usize,
    cols: usize,
) -> Result<(), BrainError> {
    if m.len() != rows {
        let got_cols = m.first().map_or(0, |r| r.len());
        return Err(BrainError::ShapeMismatch {
            key,
            expected: (rows, cols),
            got: (m.len(), got_cols),
        });
    }
    // also catches ragged rows
    if let Some(bad) = m.iter().find(|r| r.len() != cols) {
        return Err(BrainError::ShapeMismatch {
            key,
            expected: (rows, cols),
            got: (m.len(), bad.len()),
        });
    }
    Ok(())
}

fn check_vector(key: &'static str, v: &[f32], len: usize) -> Result<(), BrainError> {
    if v.len() != len {
        return Err(BrainError::ShapeMismatch {
            key,
            expected: (len, 1),
            got: (v.len(), 1),
        });
    }
    Ok(())
}
