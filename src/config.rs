use serde::{Deserialize, Serialize};

use crate::error::BrainError;

/// Network dimensions plus the init noise level. Fixed once a brain is
/// built; every genome and every restore source is checked against it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub n_inputs: usize,   // sensor vector width
    pub n_hidden: usize,   // hidden layer width
    pub n_outputs: usize,  // number of actions
    pub weight_scale: f32, // stddev of the zero-mean init distribution
}

impl NetworkConfig {
    pub fn new(
        n_inputs: usize,
        n_hidden: usize,
        n_outputs: usize,
        weight_scale: f32,
    ) -> Result<Self, BrainError> {
        let cfg = Self { n_inputs, n_hidden, n_outputs, weight_scale };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), BrainError> {
        if self.n_inputs == 0 {
            return Err(BrainError::Config("n_inputs must be positive".into()));
        }
        if self.n_hidden == 0 {
            return Err(BrainError::Config("n_hidden must be positive".into()));
        }
        if self.n_outputs == 0 {
            return Err(BrainError::Config("n_outputs must be positive".into()));
        }
        // !(x > 0.0) also rejects NaN
        if !(self.weight_scale > 0.0) || !self.weight_scale.is_finite() {
            return Err(BrainError::Config(
                "weight_scale must be positive and finite".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_dimensions() {
        assert!(NetworkConfig::new(9, 10, 4, 0.5).is_ok());
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(NetworkConfig::new(0, 10, 4, 0.5).is_err());
        assert!(NetworkConfig::new(9, 0, 4, 0.5).is_err());
        assert!(NetworkConfig::new(9, 10, 0, 0.5).is_err());
    }

    #[test]
    fn rejects_bad_weight_scale() {
        assert!(NetworkConfig::new(9, 10, 4, 0.0).is_err());
        assert!(NetworkConfig::new(9, 10, 4, -0.5).is_err());
        assert!(NetworkConfig::new(9, 10, 4, f32::NAN).is_err());
        assert!(NetworkConfig::new(9, 10, 4, f32::INFINITY).is_err());
    }
}
