//! The [`Scenario`] and [`Benchmark`] traits.

use mpe_core::{AgentId, BenchmarkData, ScenarioError};
use mpe_world::World;
use rand_chacha::ChaCha8Rng;

/// A pluggable multi-agent task definition.
///
/// # Contract
///
/// - `make_world()` builds a fresh world and leaves it in a reset state;
///   every call returns an independent world.
/// - `reset_world()` re-randomizes an existing world in place. All
///   randomness comes from `rng` so runs are reproducible per seed.
/// - `reward()` and `observation()` are pure functions of the world.
///   The observation length must not change across steps.
///
/// # Object safety
///
/// This trait is object-safe; the registry hands out scenarios as
/// `Arc<dyn Scenario>` and the environment binds them as callbacks.
pub trait Scenario: Send + Sync + 'static {
    /// Registry name, e.g. `"simple_reference"`.
    fn name(&self) -> &str;

    /// Build a new world in its initial (reset) state.
    fn make_world(&self, rng: &mut ChaCha8Rng) -> Result<World, ScenarioError>;

    /// Re-randomize positions, goals and colors of an existing world.
    fn reset_world(&self, world: &mut World, rng: &mut ChaCha8Rng);

    /// Reward for `agent` in the current world state.
    fn reward(&self, agent: AgentId, world: &World) -> f32;

    /// Observation vector for `agent` in the current world state.
    fn observation(&self, agent: AgentId, world: &World) -> Vec<f32>;

    /// Diagnostic capability, if this scenario provides one.
    ///
    /// Default: `None`.
    fn benchmark(&self) -> Option<&dyn Benchmark> {
        None
    }
}

/// Optional evaluation diagnostics for a scenario.
pub trait Benchmark {
    /// Diagnostics for `agent` in the current world state.
    fn benchmark_data(&self, agent: AgentId, world: &World) -> BenchmarkData;
}
