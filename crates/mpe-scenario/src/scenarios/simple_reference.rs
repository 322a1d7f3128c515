//! `simple_reference`: two agents that each know the other's goal.
//!
//! Each agent's `goal_a` is the *other* agent and its `goal_b` a random
//! landmark. An agent can only see its own `goal_b` color, so the pair
//! must talk: agent 0 tells agent 1 where to go and vice versa. The
//! reward is shared (collaborative world).

use mpe_core::{AgentId, Color, EntityRef, ScenarioError};
use mpe_world::{Agent, Landmark, World};
use rand_chacha::ChaCha8Rng;

use super::{landmark_offsets, neg_sq_distance, random_landmark, scatter};
use crate::scenario::Scenario;

const NUM_AGENTS: usize = 2;
const NUM_LANDMARKS: usize = 3;
const DIM_C: usize = 10;
const LANDMARK_COLORS: [Color; NUM_LANDMARKS] = [Color::RED, Color::GREEN, Color::BLUE];

/// Two-agent referential communication task.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleReference;

impl Scenario for SimpleReference {
    fn name(&self) -> &str {
        "simple_reference"
    }

    fn make_world(&self, rng: &mut ChaCha8Rng) -> Result<World, ScenarioError> {
        let mut world = World::new();
        world.dim_c = DIM_C;
        world.collaborative = true;
        for i in 0..NUM_AGENTS {
            let mut agent = Agent::new(format!("agent {i}"));
            agent.entity.collide = false;
            world.agents.push(agent);
        }
        for i in 0..NUM_LANDMARKS {
            let mut landmark = Landmark::new(format!("landmark {i}"));
            landmark.entity.collide = false;
            world.landmarks.push(landmark);
        }
        self.reset_world(&mut world, rng);
        Ok(world)
    }

    fn reset_world(&self, world: &mut World, rng: &mut ChaCha8Rng) {
        let n = world.agents.len();
        for i in 0..n {
            let partner = AgentId((i + 1) % n);
            let goal = random_landmark(world, rng).map(EntityRef::Landmark);
            let agent = &mut world.agents[i];
            agent.goal_a = Some(EntityRef::Agent(partner));
            agent.goal_b = goal;
            agent.entity.color = Color::GRAY;
        }
        for (landmark, color) in world.landmarks.iter_mut().zip(LANDMARK_COLORS) {
            landmark.entity.color = color;
        }
        // The partner wears the color of the landmark it must reach.
        for i in 0..n {
            let (goal_a, goal_b) = (world.agents[i].goal_a, world.agents[i].goal_b);
            let color = goal_b.and_then(|r| world.entity(r)).map(|e| e.color);
            if let (Some(target), Some(color)) = (goal_a, color) {
                if let Some(e) = world.entity_mut(target) {
                    e.color = color;
                }
            }
        }
        scatter(world, rng, 1.0);
    }

    fn reward(&self, agent: AgentId, world: &World) -> f32 {
        let a = &world.agents[agent.0];
        neg_sq_distance(world, a.goal_a, a.goal_b)
    }

    fn observation(&self, agent: AgentId, world: &World) -> Vec<f32> {
        let me = &world.agents[agent.0];
        let goal_color = me
            .goal_b
            .and_then(|r| world.entity(r))
            .map(|e| e.color)
            .unwrap_or_default();

        let mut obs = me.entity.state.p_vel.to_vec();
        obs.extend(landmark_offsets(agent, world));
        obs.extend_from_slice(goal_color.as_slice());
        for (i, other) in world.agents.iter().enumerate() {
            if i != agent.0 {
                obs.extend_from_slice(&other.comm);
            }
        }
        obs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn world() -> World {
        SimpleReference
            .make_world(&mut ChaCha8Rng::seed_from_u64(11))
            .unwrap()
    }

    #[test]
    fn world_layout() {
        let w = world();
        assert_eq!(w.agents.len(), 2);
        assert_eq!(w.landmarks.len(), 3);
        assert_eq!(w.dim_c, 10);
        assert!(w.collaborative);
        assert!(w.validate().is_ok());
    }

    #[test]
    fn goals_point_at_partner_and_a_landmark() {
        let w = world();
        assert_eq!(w.agents[0].goal_a, Some(EntityRef::Agent(AgentId(1))));
        assert_eq!(w.agents[1].goal_a, Some(EntityRef::Agent(AgentId(0))));
        for a in &w.agents {
            assert!(matches!(a.goal_b, Some(EntityRef::Landmark(_))));
        }
    }

    #[test]
    fn partner_wears_goal_color() {
        let w = world();
        for a in &w.agents {
            let target = w.entity(a.goal_a.unwrap()).unwrap();
            let goal = w.entity(a.goal_b.unwrap()).unwrap();
            assert_eq!(target.color, goal.color);
        }
    }

    #[test]
    fn observation_has_21_values() {
        let w = world();
        assert_eq!(SimpleReference.observation(AgentId(0), &w).len(), 21);
        assert_eq!(SimpleReference.observation(AgentId(1), &w).len(), 21);
    }

    #[test]
    fn observation_ends_with_partner_comm() {
        let mut w = world();
        w.agents[1].comm[4] = 1.0;
        let obs = SimpleReference.observation(AgentId(0), &w);
        let comm = &obs[obs.len() - DIM_C..];
        assert_eq!(comm[4], 1.0);
        assert_eq!(comm.iter().sum::<f32>(), 1.0);
    }

    #[test]
    fn reward_measures_partner_to_goal() {
        let mut w = world();
        let goal = w.agents[0].goal_b.unwrap();
        let goal_pos = w.entity(goal).unwrap().state.p_pos;
        w.agents[1].entity.place(goal_pos);
        assert_eq!(SimpleReference.reward(AgentId(0), &w), 0.0);
        assert!(SimpleReference.reward(AgentId(1), &w) <= 0.0);
    }
}
