use thiserror::Error;

/// Everything that can go wrong at the boundaries of the core: bad
/// construction parameters, a sensor vector of the wrong width, or a
/// restore source that does not match the configured network.
///
/// All of these are detected eagerly, before any state is touched.
#[derive(Debug, Error, PartialEq)]
pub enum BrainError {
    #[error("invalid config: {0}")]
    Config(String),

    #[error("input row has {got} values, network expects {expected}")]
    InputShape { expected: usize, got: usize },

    #[error("array `{key}` has shape {got:?}, expected {expected:?}")]
    ShapeMismatch {
        key: &'static str,
        // vectors are reported as (len, 1)
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("restore source has no entry `{key}`")]
    MissingEntry { key: &'static str },
}
