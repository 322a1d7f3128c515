//! `simple_speaker_listener`: a static speaker guides a silent listener.

use mpe_core::{AgentId, BenchmarkData, Color, EntityRef, ScenarioError};
use mpe_world::{Agent, Landmark, World};
use rand_chacha::ChaCha8Rng;

use super::{landmark_offsets, neg_sq_distance, random_landmark, scatter};
use crate::scenario::{Benchmark, Scenario};

const NUM_LANDMARKS: usize = 3;
const DIM_C: usize = 3;
const SPEAKER: usize = 0;
const LISTENER: usize = 1;
const LANDMARK_COLORS: [Color; NUM_LANDMARKS] = [
    Color([0.65, 0.15, 0.15]),
    Color([0.15, 0.65, 0.15]),
    Color([0.15, 0.15, 0.65]),
];
const HIGHLIGHT: f32 = 0.45;

/// Cooperative communication: agent 0 (speaker, immovable) sees the goal
/// color and talks; agent 1 (listener, silent) hears it and moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleSpeakerListener;

impl Scenario for SimpleSpeakerListener {
    fn name(&self) -> &str {
        "simple_speaker_listener"
    }

    fn make_world(&self, rng: &mut ChaCha8Rng) -> Result<World, ScenarioError> {
        let mut world = World::new();
        world.dim_c = DIM_C;
        world.collaborative = true;

        let mut speaker = Agent::new("agent 0");
        speaker.entity.collide = false;
        speaker.entity.size = 0.075;
        speaker.entity.movable = false;
        let mut listener = Agent::new("agent 1");
        listener.entity.collide = false;
        listener.entity.size = 0.075;
        listener.silent = true;
        world.agents = vec![speaker, listener];

        for i in 0..NUM_LANDMARKS {
            let mut landmark = Landmark::new(format!("landmark {i}"));
            landmark.entity.collide = false;
            landmark.entity.size = 0.04;
            world.landmarks.push(landmark);
        }
        self.reset_world(&mut world, rng);
        Ok(world)
    }

    fn reset_world(&self, world: &mut World, rng: &mut ChaCha8Rng) {
        for agent in &mut world.agents {
            agent.goal_a = None;
            agent.goal_b = None;
            agent.entity.color = Color::GRAY;
        }
        let goal = random_landmark(world, rng).map(EntityRef::Landmark);
        world.agents[SPEAKER].goal_a = Some(EntityRef::Agent(AgentId(LISTENER)));
        world.agents[SPEAKER].goal_b = goal;

        for (landmark, color) in world.landmarks.iter_mut().zip(LANDMARK_COLORS) {
            landmark.entity.color = color;
        }
        // The listener is tinted with a lighter shade of its goal.
        if let Some(goal_color) = goal.and_then(|r| world.entity(r)).map(|e| e.color) {
            let tinted = goal_color.0.map(|c| c + HIGHLIGHT);
            world.agents[LISTENER].entity.color = Color(tinted);
        }
        scatter(world, rng, 1.0);
    }

    fn reward(&self, _agent: AgentId, world: &World) -> f32 {
        let speaker = &world.agents[SPEAKER];
        neg_sq_distance(world, speaker.goal_a, speaker.goal_b)
    }

    fn observation(&self, agent: AgentId, world: &World) -> Vec<f32> {
        let me = &world.agents[agent.0];
        if !me.entity.movable {
            let goal_color = me
                .goal_b
                .and_then(|r| world.entity(r))
                .map(|e| e.color)
                .unwrap_or_default();
            return goal_color.as_slice().to_vec();
        }

        let mut obs = me.entity.state.p_vel.to_vec();
        obs.extend(landmark_offsets(agent, world));
        for (i, other) in world.agents.iter().enumerate() {
            if i != agent.0 {
                obs.extend_from_slice(&other.comm);
            }
        }
        obs
    }

    fn benchmark(&self) -> Option<&dyn Benchmark> {
        Some(self)
    }
}

impl Benchmark for SimpleSpeakerListener {
    fn benchmark_data(&self, agent: AgentId, world: &World) -> BenchmarkData {
        BenchmarkData::new().with("reward", self.reward(agent, world))
    }
}
