use log::{debug, warn};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::NetworkConfig;
use crate::error::BrainError;
use crate::genome::Genome;
use crate::mutation::{self, MutationConfig};
use crate::network::ShallowNet;
use crate::store::{ParameterSource, ParameterStore, Snapshot};

/// How an episode's raw results fold into one fitness scalar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitnessFormula {
    /// distance^2 / time, rewards covering ground fast. The default.
    DistanceSquaredOverTime,
    /// distance / time + auxiliary bonus count, the linear variant.
    DistancePerTimePlusBonus,
}

/// Car state the simulation reports back between ticks. Bookkeeping for
/// the outer loop only; decide() never reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CarTelemetry {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
}

const LABEL_PREFIX: &str = "Safr_";

/// One evolvable decision unit: a shallow net, its lineage label, the
/// fitness score of the last episode, and an exclusively owned RNG.
/// Nothing here is shared between brains, so a whole population can be
/// evaluated in parallel with order-independent, reproducible results.
pub struct Brain {
    net: ShallowNet,
    store: ParameterStore,
    label: String,
    score: f32,
    rng: StdRng,
    mutation: MutationConfig,
    fitness: FitnessFormula,
    telemetry: CarTelemetry,
}

impl Brain {
    /// Default policies: additive all-array mutation, quadratic fitness.
    /// `seed` is this brain's private random stream; derive it from a
    /// master seed plus the brain's index for reproducible populations.
    pub fn new(cfg: NetworkConfig, seed: u64) -> Result<Self, BrainError> {
        Self::with_policies(
            cfg,
            MutationConfig::default(),
            FitnessFormula::DistanceSquaredOverTime,
            seed,
        )
    }

    pub fn with_policies(
        cfg: NetworkConfig,
        mutation: MutationConfig,
        fitness: FitnessFormula,
        seed: u64,
    ) -> Result<Self, BrainError> {
        cfg.validate()?;
        mutation.validate()?;

        let mut rng = StdRng::seed_from_u64(seed);
        let genome = Genome::random(&cfg, &mut rng)?;
        let label = format!("{LABEL_PREFIX}{}", random_tag(&mut rng, 5));
        let store = ParameterStore::capture(&genome, &label);
        let net = ShallowNet::new(cfg, genome)?;
        debug!("{label}: created ({} -> {} -> {})", cfg.n_inputs, cfg.n_hidden, cfg.n_outputs);

        Ok(Self {
            net,
            store,
            label,
            score: 0.0,
            rng,
            mutation,
            fitness,
            telemetry: CarTelemetry::default(),
        })
    }

    /// One sensor reading in, one action-probability vector out.
    pub fn decide(&self, sensors: &[f32]) -> Result<Vec<f32>, BrainError> {
        self.net.predict_proba_row(sensors)
    }

    /// The evolutionary search step: perturb the genome under the
    /// configured policy, extend the lineage label with the arrays that
    /// changed, and refresh the cached snapshot so get_parameters()
    /// reflects the new state.
    pub fn mutate(&mut self) {
        let touched = mutation::mutate(&mut self.net.genome, &self.mutation, &mut self.rng);
        if !touched.is_empty() {
            let suffix = if touched.len() == 4 {
                "_MUT_ALL".to_string()
            } else {
                format!("_MUT_{}", touched.join("_"))
            };
            self.label.push_str(&suffix);
            debug!("{}: mutated {:?}", self.label, touched);
        }
        self.store.refresh(&self.net.genome, &self.label);
    }

    /// Fold an episode's results into the fitness score. Zero (or
    /// negative) elapsed time is defined as score 0 rather than letting
    /// an infinity leak into the selection loop.
    pub fn calculate_score(&mut self, distance: f32, time: f32, auxiliary_count: u32) {
        if time <= 0.0 {
            warn!("{}: episode time {time}, score forced to 0", self.label);
            self.score = 0.0;
            return;
        }
        self.score = match self.fitness {
            FitnessFormula::DistanceSquaredOverTime => distance * distance / time,
            FitnessFormula::DistancePerTimePlusBonus => {
                distance / time + auxiliary_count as f32
            }
        };
    }

    pub fn getscore(&self) -> f32 {
        self.score
    }

    /// Deep snapshot of the current genome + label for the selection loop.
    pub fn get_parameters(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Replace the genome and label from any named-array source. Shapes
    /// are validated first; on error the brain keeps its prior state.
    pub fn set_parameters(&mut self, source: &dyn ParameterSource) -> Result<(), BrainError> {
        let (genome, name) = ParameterStore::restore(source, &self.net.cfg)?;
        self.net.genome = genome;
        self.label = name;
        self.store.refresh(&self.net.genome, &self.label);
        Ok(())
    }

    /// Position/speed feedback from the simulation.
    pub fn record_telemetry(&mut self, x: f32, y: f32, speed: f32) {
        self.telemetry = CarTelemetry { x, y, speed };
    }

    pub fn telemetry(&self) -> CarTelemetry {
        self.telemetry
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.net.cfg
    }

    pub fn net(&self) -> &ShallowNet {
        &self.net
    }
}

fn random_tag(rng: &mut impl Rng, len: usize) -> String {
    std::iter::repeat_with(|| rng.sample(Alphanumeric))
        .take(len)
        .map(char::from)
        .collect()
}
