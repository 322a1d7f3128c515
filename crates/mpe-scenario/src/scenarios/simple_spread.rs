//! `simple_spread`: N agents cover N landmarks without bumping into each other.

use mpe_core::math;
use mpe_core::{AgentId, BenchmarkData, Color, ScenarioError};
use mpe_world::{overlaps, Agent, Landmark, World};
use rand_chacha::ChaCha8Rng;

use super::{landmark_offsets, scatter};
use crate::scenario::{Benchmark, Scenario};

const AGENT_SIZE: f32 = 0.15;
const OCCUPIED_DISTANCE: f32 = 0.1;
const LANDMARK_EXTENT: f32 = 0.95;

/// Cooperative navigation. Agents are rewarded by how close the nearest
/// agent is to each landmark and penalized per collision.
#[derive(Clone, Copy, Debug)]
pub struct SimpleSpread {
    num_agents: usize,
}

impl SimpleSpread {
    /// Default number of agents (and landmarks).
    pub const DEFAULT_AGENTS: usize = 3;

    /// A spread task with `num_agents` agents and as many landmarks.
    ///
    /// Zero agents is accepted here and rejected by
    /// [`make_world`](Scenario::make_world).
    pub fn new(num_agents: usize) -> Self {
        Self { num_agents }
    }

    /// Number of agents (and landmarks).
    pub fn num_agents(&self) -> usize {
        self.num_agents
    }

    /// Distance from each landmark to its nearest agent.
    fn nearest_distances(world: &World) -> Vec<f32> {
        world
            .landmarks
            .iter()
            .map(|l| {
                world
                    .agents
                    .iter()
                    .map(|a| math::dist(a.entity.state.p_pos, l.entity.state.p_pos))
                    .fold(f32::INFINITY, f32::min)
            })
            .collect()
    }

    /// Number of other agents overlapping `agent`.
    fn collisions(agent: AgentId, world: &World) -> usize {
        let me = &world.agents[agent.0];
        if !me.entity.collide {
            return 0;
        }
        world
            .agents
            .iter()
            .enumerate()
            .filter(|(i, other)| *i != agent.0 && overlaps(&other.entity, &me.entity))
            .count()
    }
}

impl Default for SimpleSpread {
    fn default() -> Self {
        Self::new(Self::DEFAULT_AGENTS)
    }
}

impl Scenario for SimpleSpread {
    fn name(&self) -> &str {
        "simple_spread"
    }

    fn make_world(&self, rng: &mut ChaCha8Rng) -> Result<World, ScenarioError> {
        if self.num_agents == 0 {
            return Err(ScenarioError::InvalidConfig {
                reason: "simple_spread needs at least one agent".into(),
            });
        }
        let mut world = World::new();
        world.dim_c = 2;
        world.collaborative = true;
        for i in 0..self.num_agents {
            let mut agent = Agent::new(format!("agent {i}"));
            agent.silent = true;
            agent.entity.size = AGENT_SIZE;
            world.agents.push(agent);
        }
        for i in 0..self.num_agents {
            let mut landmark = Landmark::new(format!("landmark {i}"));
            landmark.entity.collide = false;
            world.landmarks.push(landmark);
        }
        self.reset_world(&mut world, rng);
        Ok(world)
    }

    fn reset_world(&self, world: &mut World, rng: &mut ChaCha8Rng) {
        for agent in &mut world.agents {
            agent.entity.color = Color([0.35, 0.35, 0.85]);
        }
        for landmark in &mut world.landmarks {
            landmark.entity.color = Color::GRAY;
        }
        scatter(world, rng, LANDMARK_EXTENT);
    }

    fn reward(&self, agent: AgentId, world: &World) -> f32 {
        let coverage: f32 = Self::nearest_distances(world).iter().sum();
        -coverage - Self::collisions(agent, world) as f32
    }

    fn observation(&self, agent: AgentId, world: &World) -> Vec<f32> {
        let me = &world.agents[agent.0];
        let origin = me.entity.state.p_pos;

        let mut obs = me.entity.state.p_vel.to_vec();
        obs.extend_from_slice(&origin);
        obs.extend(landmark_offsets(agent, world));
        let others = world
            .agents
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != agent.0)
            .map(|(_, a)| a);
        for other in others.clone() {
            obs.extend(math::sub(other.entity.state.p_pos, origin));
        }
        for other in others {
            obs.extend_from_slice(&other.comm);
        }
        obs
    }

    fn benchmark(&self) -> Option<&dyn Benchmark> {
        Some(self)
    }
}

impl Benchmark for SimpleSpread {
    fn benchmark_data(&self, agent: AgentId, world: &World) -> BenchmarkData {
        let nearest = Self::nearest_distances(world);
        let occupied = nearest.iter().filter(|&&d| d < OCCUPIED_DISTANCE).count();
        BenchmarkData::new()
            .with("reward", self.reward(agent, world))
            .with("collisions", Self::collisions(agent, world) as f32)
            .with("min_dists", nearest.iter().sum())
            .with("occupied_landmarks", occupied as f32)
    }
}
