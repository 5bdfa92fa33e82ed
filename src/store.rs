use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::NetworkConfig;
use crate::error::BrainError;
use crate::genome::Genome;

/// A deep, independently owned copy of a genome plus its lineage label.
/// Never mutated after creation; cloning a brain across generations goes
/// through one of these. Serializes to the flat `w1`/`w2`/`b1`/`b2`/`NAME`
/// layout, so a snapshot written with serde_json is directly readable
/// back through [`JsonArchive`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub w1: Vec<Vec<f32>>,
    pub b1: Vec<f32>,
    pub w2: Vec<Vec<f32>>,
    pub b2: Vec<f32>,
    #[serde(rename = "NAME")]
    pub name: String,
}

impl Snapshot {
    pub fn capture(genome: &Genome, name: &str) -> Self {
        Self {
            w1: genome.w1.clone(),
            b1: genome.b1.clone(),
            w2: genome.w2.clone(),
            b2: genome.b2.clone(),
            name: name.to_string(),
        }
    }

    /// Rebuild an owned genome from the stored arrays.
    pub fn genome(&self) -> Genome {
        Genome {
            w1: self.w1.clone(),
            b1: self.b1.clone(),
            w2: self.w2.clone(),
            b2: self.b2.clone(),
        }
    }
}

/// Read-only named-array lookup under the keys `w1`, `w2`, `b1`, `b2`
/// and `NAME`. Anything that can hand out those five entries behaves as
/// a restore source: an in-memory [`Snapshot`], a parsed JSON checkpoint,
/// or any caller-side container. Lookups return owned copies: restore
/// deep-copies anyway, and it keeps archive adapters trivial.
pub trait ParameterSource {
    fn matrix(&self, key: &str) -> Option<Vec<Vec<f32>>>;
    fn vector(&self, key: &str) -> Option<Vec<f32>>;
    fn name(&self) -> Option<String>;
}

impl ParameterSource for Snapshot {
    fn matrix(&self, key: &str) -> Option<Vec<Vec<f32>>> {
        match key {
            "w1" => Some(self.w1.clone()),
            "w2" => Some(self.w2.clone()),
            _ => None,
        }
    }

    fn vector(&self, key: &str) -> Option<Vec<f32>> {
        match key {
            "b1" => Some(self.b1.clone()),
            "b2" => Some(self.b2.clone()),
            _ => None,
        }
    }

    fn name(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

/// Adapter for an already-loaded JSON container, the "archive file"
/// case. Expects the same flat layout the snapshots serialize to. The
/// crate never reads files itself; the caller loads the text and hands
/// it over.
pub struct JsonArchive {
    value: serde_json::Value,
}

impl JsonArchive {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    pub fn from_str(text: &str) -> Result<Self, serde_json::Error> {
        Ok(Self { value: serde_json::from_str(text)? })
    }
}

impl ParameterSource for JsonArchive {
    fn matrix(&self, key: &str) -> Option<Vec<Vec<f32>>> {
        serde_json::from_value(self.value.get(key)?.clone()).ok()
    }

    fn vector(&self, key: &str) -> Option<Vec<f32>> {
        serde_json::from_value(self.value.get(key)?.clone()).ok()
    }

    fn name(&self) -> Option<String> {
        self.value.get("NAME")?.as_str().map(str::to_string)
    }
}

/// Owns the cached snapshot a brain hands out, and the validated path
/// for replacing a genome from an external source.
#[derive(Clone, Debug)]
pub struct ParameterStore {
    cached: Snapshot,
}

impl ParameterStore {
    pub fn capture(genome: &Genome, name: &str) -> Self {
        Self { cached: Snapshot::capture(genome, name) }
    }

    /// Re-capture after the live genome changed (mutation or restore) so
    /// handed-out snapshots always reflect the current state.
    pub fn refresh(&mut self, genome: &Genome, name: &str) {
        self.cached = Snapshot::capture(genome, name);
    }

    /// Deep copy for the caller. Later mutation of the live genome can
    /// never reach it, and the caller cannot reach the live genome.
    pub fn snapshot(&self) -> Snapshot {
        self.cached.clone()
    }

    /// Pull a full genome + name out of `source`, validating every array
    /// shape against `cfg`. All-or-nothing: a missing entry or a shape
    /// mismatch returns the error and nothing is handed back.
    pub fn restore(
        source: &dyn ParameterSource,
        cfg: &NetworkConfig,
    ) -> Result<(Genome, String), BrainError> {
        let w1 = source.matrix("w1").ok_or(BrainError::MissingEntry { key: "w1" })?;
        let b1 = source.vector("b1").ok_or(BrainError::MissingEntry { key: "b1" })?;
        let w2 = source.matrix("w2").ok_or(BrainError::MissingEntry { key: "w2" })?;
        let b2 = source.vector("b2").ok_or(BrainError::MissingEntry { key: "b2" })?;
        let name = source.name().ok_or(BrainError::MissingEntry { key: "NAME" })?;

        let genome = Genome { w1, b1, w2, b2 };
        genome.check_shapes(cfg)?;
        debug!("restored parameters for {name}");
        Ok((genome, name))
    }
}
