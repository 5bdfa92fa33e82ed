use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::BrainError;
use crate::genome::Genome;

/// How a selected weight is perturbed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationMode {
    /// w += sign * scale * w with sign uniformly ±1. Proportional to the
    /// current magnitude, so a weight at exactly zero stays at zero
    /// (accepted limitation of this mode).
    Multiplicative,
    /// w += (r - 0.5) * scale with r uniform in [0, 1). Magnitude of the
    /// step is independent of the current weight.
    Additive,
}

/// Which parameter arrays one mutate() call may touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationScope {
    /// All four arrays (w1, b1, w2, b2) in a single call. The default.
    AllArrays,
    /// One uniformly chosen array per call, the lower-intensity variant.
    SingleArray,
}

/// Knobs for the evolutionary search step.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MutationConfig {
    pub rate: f32,  // per-weight probability of being touched; 0 is a valid no-op
    pub scale: f32, // perturbation magnitude
    pub mode: MutationMode,
    pub scope: MutationScope,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            rate: 0.1,
            scale: 0.25,
            mode: MutationMode::Additive,
            scope: MutationScope::AllArrays,
        }
    }
}

impl MutationConfig {
    pub fn validate(&self) -> Result<(), BrainError> {
        if !self.rate.is_finite() || !(0.0..=1.0).contains(&self.rate) {
            return Err(BrainError::Config("mutation rate must be in [0, 1]".into()));
        }
        if !(self.scale > 0.0) || !self.scale.is_finite() {
            return Err(BrainError::Config(
                "perturbation scale must be positive and finite".into(),
            ));
        }
        Ok(())
    }
}

/// Perturb the genome in place and report which arrays actually changed
/// (tags `W1`/`B1`/`W2`/`B2`, in that fixed order) so the caller can
/// extend the lineage label.
pub fn mutate(
    genome: &mut Genome,
    cfg: &MutationConfig,
    rng: &mut impl Rng,
) -> Vec<&'static str> {
    let picked = match cfg.scope {
        MutationScope::AllArrays => None,
        MutationScope::SingleArray => Some(rng.gen_range(0..4usize)),
    };

    let mut touched = Vec::new();
    if picked.map_or(true, |p| p == 0) && perturb_matrix(&mut genome.w1, cfg, rng) {
        touched.push("W1");
    }
    if picked.map_or(true, |p| p == 1) && perturb_vector(&mut genome.b1, cfg, rng) {
        touched.push("B1");
    }
    if picked.map_or(true, |p| p == 2) && perturb_matrix(&mut genome.w2, cfg, rng) {
        touched.push("W2");
    }
    if picked.map_or(true, |p| p == 3) && perturb_vector(&mut genome.b2, cfg, rng) {
        touched.push("B2");
    }
    touched
}

fn perturb_matrix(m: &mut [Vec<f32>], cfg: &MutationConfig, rng: &mut impl Rng) -> bool {
    let mut changed = false;
    for row in m {
        changed |= perturb_vector(row, cfg, rng);
    }
    changed
}

fn perturb_vector(v: &mut [f32], cfg: &MutationConfig, rng: &mut impl Rng) -> bool {
    let mut changed = false;
    for w in v {
        if rng.r#gen::<f32>() < cfg.rate {
            let delta = match cfg.mode {
                MutationMode::Multiplicative => {
                    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                    sign * cfg.scale * *w
                }
                MutationMode::Additive => (rng.r#gen::<f32>() - 0.5) * cfg.scale,
            };
            *w += delta;
            changed |= delta != 0.0;
        }
    }
    changed
}
