//! Callbacks bound into an environment.
//!
//! Every callback is optional. A missing callback falls back to a neutral
//! result: no reset, zero reward, empty observation, empty info and
//! never done.

use rand_chacha::ChaCha8Rng;

use mpe_core::{AgentId, BenchmarkData};
use mpe_world::World;

/// Re-randomize a world in place.
pub type ResetCallback = Box<dyn Fn(&mut World, &mut ChaCha8Rng) + Send>;
/// Reward of one agent in the current world state.
pub type RewardCallback = Box<dyn Fn(AgentId, &World) -> f32 + Send>;
/// Observation vector of one agent.
pub type ObservationCallback = Box<dyn Fn(AgentId, &World) -> Vec<f32> + Send>;
/// Diagnostics for one agent, reported as step info.
pub type InfoCallback = Box<dyn Fn(AgentId, &World) -> BenchmarkData + Send>;
/// Whether one agent's episode has terminated.
pub type DoneCallback = Box<dyn Fn(AgentId, &World) -> bool + Send>;

/// The set of callbacks an environment invokes.
#[derive(Default)]
pub struct EnvCallbacks {
    /// Called by `reset()`.
    pub reset: Option<ResetCallback>,
    /// Per-agent reward.
    pub reward: Option<RewardCallback>,
    /// Per-agent observation.
    pub observation: Option<ObservationCallback>,
    /// Per-agent step info (bound in benchmark mode).
    pub info: Option<InfoCallback>,
    /// Per-agent termination.
    pub done: Option<DoneCallback>,
}

impl EnvCallbacks {
    pub(crate) fn reset(&self, world: &mut World, rng: &mut ChaCha8Rng) {
        if let Some(f) = &self.reset {
            f(world, rng);
        }
    }

    pub(crate) fn reward(&self, agent: AgentId, world: &World) -> f32 {
        self.reward.as_ref().map_or(0.0, |f| f(agent, world))
    }

    pub(crate) fn observation(&self, agent: AgentId, world: &World) -> Vec<f32> {
        self.observation
            .as_ref()
            .map_or_else(Vec::new, |f| f(agent, world))
    }

    pub(crate) fn info(&self, agent: AgentId, world: &World) -> BenchmarkData {
        self.info
            .as_ref()
            .map_or_else(BenchmarkData::new, |f| f(agent, world))
    }

    pub(crate) fn done(&self, agent: AgentId, world: &World) -> bool {
        self.done.as_ref().is_some_and(|f| f(agent, world))
    }
}

impl std::fmt::Debug for EnvCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvCallbacks")
            .field("reset", &self.reset.is_some())
            .field("reward", &self.reward.is_some())
            .field("observation", &self.observation.is_some())
            .field("info", &self.info.is_some())
            .field("done", &self.done.is_some())
            .finish()
    }
}
