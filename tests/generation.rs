//! The crate's boundary contract as the outer evolutionary loop uses it:
//! build a population, decide every tick, score episodes, clone the best
//! through snapshots, mutate the clones.

use rayon::prelude::*;
use safr_brain::{
    Brain, FitnessFormula, JsonArchive, MutationConfig, NetworkConfig,
};

fn cfg() -> NetworkConfig {
    NetworkConfig::new(9, 10, 4, 0.5).unwrap()
}

#[test]
fn fixed_seed_decisions_are_deterministic() {
    let sensors = vec![0.0; 9];

    let brain = Brain::new(cfg(), 1234).unwrap();
    let first = brain.decide(&sensors).unwrap();
    assert_eq!(first.len(), 4);
    assert!((first.iter().sum::<f32>() - 1.0).abs() < 1e-5);

    // same brain, every call
    for _ in 0..10 {
        assert_eq!(brain.decide(&sensors).unwrap(), first);
    }

    // a rebuilt brain with the same seed lands on the same genome
    let rebuilt = Brain::new(cfg(), 1234).unwrap();
    assert_eq!(rebuilt.decide(&sensors).unwrap(), first);

    // a different seed does not
    let other = Brain::new(cfg(), 1235).unwrap();
    assert_ne!(other.decide(&sensors).unwrap(), first);
}

#[test]
fn snapshot_round_trip_preserves_behavior_exactly() {
    let sensors = vec![0.4, -0.2, 0.9, 0.0, 0.1, -0.7, 0.3, 0.8, -0.5];

    let parent = Brain::new(cfg(), 555).unwrap();
    let parent_probs = parent.decide(&sensors).unwrap();

    // re-seed a differently initialized brain from the parent's snapshot
    let mut child = Brain::new(cfg(), 777).unwrap();
    assert_ne!(child.decide(&sensors).unwrap(), parent_probs);

    child.set_parameters(&parent.get_parameters()).unwrap();
    assert_eq!(child.decide(&sensors).unwrap(), parent_probs);
    assert_eq!(child.label(), parent.label());

    // restoring into the parent itself is also bit-identical
    let mut parent = parent;
    let own_snapshot = parent.get_parameters();
    parent.set_parameters(&own_snapshot).unwrap();
    assert_eq!(parent.decide(&sensors).unwrap(), parent_probs);
}

#[test]
fn snapshots_survive_a_json_checkpoint_cycle() {
    let sensors = vec![0.25; 9];
    let brain = Brain::new(cfg(), 808).unwrap();
    let probs = brain.decide(&sensors).unwrap();

    // the caller persists snapshots however it likes; JSON text stands in
    // for its checkpoint file here
    let text = serde_json::to_string(&brain.get_parameters()).unwrap();
    let archive = JsonArchive::from_str(&text).unwrap();

    let mut restored = Brain::new(cfg(), 999).unwrap();
    restored.set_parameters(&archive).unwrap();
    assert_eq!(restored.decide(&sensors).unwrap(), probs);
}

#[test]
fn one_generation_of_the_selection_loop() {
    let sensors = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];
    let master_seed = 9000u64;

    // evaluate a small population
    let mut population: Vec<Brain> = (0..8)
        .map(|i| Brain::new(cfg(), master_seed + i).unwrap())
        .collect();
    for (i, brain) in population.iter_mut().enumerate() {
        brain.record_telemetry(i as f32, 0.0, 5.0);
        brain.calculate_score(10.0 + i as f32, 2.0, 0);
    }

    // pick the top performer and snapshot it
    let best = population
        .iter()
        .max_by(|a, b| a.getscore().partial_cmp(&b.getscore()).unwrap())
        .unwrap();
    assert_eq!(best.getscore(), 17.0 * 17.0 / 2.0);
    let elite = best.get_parameters();
    let elite_probs = best.decide(&sensors).unwrap();

    // next generation: clones of the elite, most of them mutated
    let mut next: Vec<Brain> = (0..8)
        .map(|i| {
            let mut b = Brain::new(cfg(), master_seed + 100 + i).unwrap();
            b.set_parameters(&elite).unwrap();
            if i > 0 {
                b.mutate();
            }
            b
        })
        .collect();

    // the unmutated clone behaves exactly like the elite
    assert_eq!(next[0].decide(&sensors).unwrap(), elite_probs);
    // scores reset with the new episode, not inherited
    assert!(next.iter().all(|b| b.getscore() == 0.0));
    // mutated clones carry the lineage trail
    assert!(next[1].label().starts_with(elite.name.as_str()));
    for brain in &mut next {
        brain.calculate_score(5.0, 1.0, 0);
        assert_eq!(brain.getscore(), 25.0);
    }
}

#[test]
fn parallel_evaluation_matches_sequential() {
    // every brain owns its RNG, so evaluation order cannot change results
    let seeds: Vec<u64> = (0..16).map(|i| 0xA5A5_0000 + i).collect();
    let sensors = vec![0.33; 9];

    let sequential: Vec<Vec<f32>> = seeds
        .iter()
        .map(|&s| Brain::new(cfg(), s).unwrap().decide(&sensors).unwrap())
        .collect();

    let parallel: Vec<Vec<f32>> = seeds
        .par_iter()
        .map(|&s| Brain::new(cfg(), s).unwrap().decide(&sensors).unwrap())
        .collect();

    assert_eq!(sequential, parallel);
}

#[test]
fn mutation_policy_is_configurable_per_brain() {
    let mut zero = Brain::with_policies(
        cfg(),
        MutationConfig { rate: 0.0, ..MutationConfig::default() },
        FitnessFormula::DistanceSquaredOverTime,
        31337,
    )
    .unwrap();
    let before = zero.get_parameters();
    for _ in 0..5 {
        zero.mutate();
    }
    // rate 0 is an explicit no-op: same genome, same label
    assert_eq!(zero.get_parameters(), before);

    let bad = MutationConfig { rate: 2.0, ..MutationConfig::default() };
    assert!(Brain::with_policies(cfg(), bad, FitnessFormula::DistanceSquaredOverTime, 1).is_err());
}
