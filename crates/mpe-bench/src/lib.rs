//! Benchmark profiles and utilities for multi-agent particle environments.
//!
//! Provides pre-built environment profiles for benchmarking and examples:
//!
//! - [`reference_profile`]: `simple_reference` (2 agents, 10 channels)
//! - [`spread_profile`]: `simple_spread` with a configurable agent count
//! - [`uniform_actions`]: one uniformly random action vector per agent

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use mpe::prelude::*;
use mpe::scenario::SimpleSpread;
use rand::Rng;

/// Build the `simple_reference` environment seeded with `seed`.
pub fn reference_profile(seed: u64) -> Result<MultiAgentEnv, MakeEnvError> {
    make_env_with(
        &ScenarioRegistry::builtin(),
        "simple_reference",
        false,
        EnvConfig::default().with_seed(seed),
    )
}

/// Build `simple_spread` with `num_agents` agents (and landmarks).
///
/// Contact forces are O(N²) in the entity count, so this profile is the
/// one to scale up for stress testing.
pub fn spread_profile(num_agents: usize, seed: u64) -> Result<MultiAgentEnv, MakeEnvError> {
    let mut registry = ScenarioRegistry::new();
    registry.register("simple_spread", move || {
        Box::new(SimpleSpread::new(num_agents))
    });
    make_env_with(
        &registry,
        "simple_spread",
        true,
        EnvConfig::default().with_seed(seed),
    )
}

/// One action vector per policy agent with entries drawn from `[0, 1)`.
pub fn uniform_actions<R: Rng>(env: &MultiAgentEnv, rng: &mut R) -> Vec<Vec<f32>> {
    env.action_space()
        .iter()
        .map(|space| (0..space.flat_dim()).map(|_| rng.random::<f32>()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn profiles_build() {
        assert_eq!(reference_profile(1).unwrap().n(), 2);
        assert_eq!(spread_profile(8, 1).unwrap().n(), 8);
    }

    #[test]
    fn uniform_actions_fit_spaces() {
        let env = reference_profile(0).unwrap();
        let actions = uniform_actions(&env, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(actions.len(), 2);
        assert!(actions.iter().all(|a| a.len() == 15));
    }
}
