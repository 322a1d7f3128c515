//! `simple`: one agent, one landmark, reward for proximity.

use mpe_core::{AgentId, Color, EntityRef, LandmarkId, ScenarioError};
use mpe_world::{Agent, Landmark, World};
use rand_chacha::ChaCha8Rng;

use super::{landmark_offsets, neg_sq_distance, scatter};
use crate::scenario::Scenario;

/// Single agent navigating to a single landmark. Used for debugging
/// policies; no communication, no collisions, no benchmark data.
#[derive(Clone, Copy, Debug, Default)]
pub struct Simple;

impl Scenario for Simple {
    fn name(&self) -> &str {
        "simple"
    }

    fn make_world(&self, rng: &mut ChaCha8Rng) -> Result<World, ScenarioError> {
        let mut world = World::new();
        let mut agent = Agent::new("agent 0");
        agent.entity.collide = false;
        agent.silent = true;
        world.agents.push(agent);

        let mut landmark = Landmark::new("landmark 0");
        landmark.entity.collide = false;
        world.landmarks.push(landmark);

        self.reset_world(&mut world, rng);
        Ok(world)
    }

    fn reset_world(&self, world: &mut World, rng: &mut ChaCha8Rng) {
        for agent in &mut world.agents {
            agent.entity.color = Color::GRAY;
        }
        for landmark in &mut world.landmarks {
            landmark.entity.color = Color::LIGHT_GRAY;
        }
        if let Some(first) = world.landmarks.first_mut() {
            first.entity.color = Color::RED;
        }
        scatter(world, rng, 1.0);
    }

    fn reward(&self, agent: AgentId, world: &World) -> f32 {
        neg_sq_distance(
            world,
            Some(EntityRef::Agent(agent)),
            Some(EntityRef::Landmark(LandmarkId(0))),
        )
    }

    fn observation(&self, agent: AgentId, world: &World) -> Vec<f32> {
        let mut obs = world.agents[agent.0].entity.state.p_vel.to_vec();
        obs.extend(landmark_offsets(agent, world));
        obs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn world() -> World {
        Simple
            .make_world(&mut ChaCha8Rng::seed_from_u64(0))
            .unwrap()
    }

    #[test]
    fn one_agent_one_landmark() {
        let w = world();
        assert_eq!(w.agents.len(), 1);
        assert_eq!(w.landmarks.len(), 1);
        assert!(w.validate().is_ok());
    }

    #[test]
    fn reward_is_negative_squared_distance() {
        let mut w = world();
        w.agents[0].entity.place([0.0, 0.0]);
        w.landmarks[0].entity.place([0.3, 0.4]);
        assert!((Simple.reward(AgentId(0), &w) + 0.25).abs() < 1e-6);
    }

    #[test]
    fn observation_is_velocity_and_landmark_offset() {
        let mut w = world();
        w.agents[0].entity.place([0.5, 0.5]);
        w.agents[0].entity.state.p_vel = [0.1, -0.1];
        w.landmarks[0].entity.place([1.0, 0.0]);
        assert_eq!(
            Simple.observation(AgentId(0), &w),
            vec![0.1, -0.1, 0.5, -0.5]
        );
    }

    #[test]
    fn positions_within_unit_square() {
        let w = world();
        for e in w.entities() {
            assert!(e.state.p_pos.iter().all(|c| (-1.0..1.0).contains(c)));
        }
    }

    #[test]
    fn no_benchmark_capability() {
        assert!(Simple.benchmark().is_none());
    }
}
