//! Reusable scenario test fixtures.
//!
//! Three mock scenarios for factory and wrapper testing:
//!
//! - [`FixedLayoutScenario`]: one movable, speaking agent whose
//!   observation exposes exactly what its action drove.
//! - [`FailingScenario`]: `make_world` always fails.
//! - [`EmptyWorldScenario`]: builds a world with no agents.

use mpe_core::{AgentId, BenchmarkData, ScenarioError};
use mpe_scenario::{Benchmark, Scenario};
use mpe_world::{Agent, Landmark, World};
use rand_chacha::ChaCha8Rng;

/// One agent, one landmark, `dim_c` channels, no noise, no damping.
///
/// The observation is `[p_vel (2), comm (dim_c)]`, so after one step from
/// rest the first two entries are `u * dt / mass` and the rest echo the
/// communication action. The reward is the agent's x position.
pub struct FixedLayoutScenario {
    pub dim_c: usize,
}

impl FixedLayoutScenario {
    pub const DEFAULT_DIM_C: usize = 4;

    pub fn new(dim_c: usize) -> Self {
        Self { dim_c }
    }
}

impl Default for FixedLayoutScenario {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIM_C)
    }
}

impl Scenario for FixedLayoutScenario {
    fn name(&self) -> &str {
        "fixed_layout"
    }

    fn make_world(&self, rng: &mut ChaCha8Rng) -> Result<World, ScenarioError> {
        let mut world = World::new();
        world.dim_c = self.dim_c;
        world.damping = 0.0;
        let mut agent = Agent::new("agent 0");
        agent.entity.collide = false;
        world.agents.push(agent);
        let mut landmark = Landmark::new("landmark 0");
        landmark.entity.collide = false;
        world.landmarks.push(landmark);
        self.reset_world(&mut world, rng);
        Ok(world)
    }

    fn reset_world(&self, world: &mut World, _rng: &mut ChaCha8Rng) {
        let dim_c = world.dim_c;
        for agent in &mut world.agents {
            agent.entity.place([0.0, 0.0]);
            agent.reset_comm(dim_c);
        }
        for landmark in &mut world.landmarks {
            landmark.entity.place([1.0, 0.0]);
        }
    }

    fn reward(&self, agent: AgentId, world: &World) -> f32 {
        world.agents[agent.0].entity.state.p_pos[0]
    }

    fn observation(&self, agent: AgentId, world: &World) -> Vec<f32> {
        let me = &world.agents[agent.0];
        let mut obs = me.entity.state.p_vel.to_vec();
        obs.extend_from_slice(&me.comm);
        obs
    }

    fn benchmark(&self) -> Option<&dyn Benchmark> {
        Some(self)
    }
}

impl Benchmark for FixedLayoutScenario {
    fn benchmark_data(&self, agent: AgentId, world: &World) -> BenchmarkData {
        let me = &world.agents[agent.0];
        BenchmarkData::new()
            .with("x", me.entity.state.p_pos[0])
            .with("y", me.entity.state.p_pos[1])
    }
}

/// A scenario whose world construction always fails.
pub struct FailingScenario;

impl FailingScenario {
    pub const REASON: &'static str = "mock construction failure";
}

impl Scenario for FailingScenario {
    fn name(&self) -> &str {
        "failing"
    }

    fn make_world(&self, _rng: &mut ChaCha8Rng) -> Result<World, ScenarioError> {
        Err(ScenarioError::InvalidConfig {
            reason: Self::REASON.into(),
        })
    }

    fn reset_world(&self, _world: &mut World, _rng: &mut ChaCha8Rng) {}

    fn reward(&self, _agent: AgentId, _world: &World) -> f32 {
        0.0
    }

    fn observation(&self, _agent: AgentId, _world: &World) -> Vec<f32> {
        Vec::new()
    }
}

/// A scenario that "succeeds" in building a world with no agents.
pub struct EmptyWorldScenario;

impl Scenario for EmptyWorldScenario {
    fn name(&self) -> &str {
        "empty_world"
    }

    fn make_world(&self, _rng: &mut ChaCha8Rng) -> Result<World, ScenarioError> {
        let mut world = World::new();
        world.landmarks.push(Landmark::new("landmark 0"));
        Ok(world)
    }

    fn reset_world(&self, _world: &mut World, _rng: &mut ChaCha8Rng) {}

    fn reward(&self, _agent: AgentId, _world: &World) -> f32 {
        0.0
    }

    fn observation(&self, _agent: AgentId, _world: &World) -> Vec<f32> {
        Vec::new()
    }
}
