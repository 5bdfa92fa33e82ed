//! Evolvable driving brains for a GA racing population.
//!
//! Each [`Brain`] owns a one-hidden-layer feed-forward net with randomly
//! initialized weights, a lineage label, a fitness score and a private
//! RNG. The outer evolutionary loop calls [`Brain::decide`] every
//! simulation tick, [`Brain::calculate_score`] once per episode, and
//! clones the top performers through [`Brain::get_parameters`] /
//! [`Brain::set_parameters`] + [`Brain::mutate`] to build the next
//! generation. Simulation physics, rendering and the selection loop
//! itself live outside this crate.

pub mod brain;
pub mod config;
pub mod error;
pub mod genome;
pub mod mutation;
pub mod network;
pub mod store;

pub use brain::{Brain, CarTelemetry, FitnessFormula};
pub use config::NetworkConfig;
pub use error::BrainError;
pub use genome::Genome;
pub use mutation::{MutationConfig, MutationMode, MutationScope};
pub use network::ShallowNet;
pub use store::{JsonArchive, ParameterSource, ParameterStore, Snapshot};
