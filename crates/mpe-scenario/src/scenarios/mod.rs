//! Built-in scenarios.

mod simple;
mod simple_reference;
mod simple_speaker_listener;
mod simple_spread;

pub use simple::Simple;
pub use simple_reference::SimpleReference;
pub use simple_speaker_listener::SimpleSpeakerListener;
pub use simple_spread::SimpleSpread;

use mpe_core::math::{self, Vec2};
use mpe_core::{AgentId, EntityRef, LandmarkId};
use mpe_world::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Uniform position in `[-extent, extent)²`.
fn uniform_pos(rng: &mut ChaCha8Rng, extent: f32) -> Vec2 {
    [
        rng.random_range(-extent..extent),
        rng.random_range(-extent..extent),
    ]
}

/// Scatter every agent and landmark uniformly, at rest, with silent comms.
fn scatter(world: &mut World, rng: &mut ChaCha8Rng, landmark_extent: f32) {
    let dim_c = world.dim_c;
    for agent in &mut world.agents {
        agent.entity.place(uniform_pos(rng, 1.0));
        agent.reset_comm(dim_c);
    }
    for landmark in &mut world.landmarks {
        landmark.entity.place(uniform_pos(rng, landmark_extent));
    }
}

/// A landmark chosen uniformly at random.
fn random_landmark(world: &World, rng: &mut ChaCha8Rng) -> Option<LandmarkId> {
    if world.landmarks.is_empty() {
        None
    } else {
        Some(LandmarkId(rng.random_range(0..world.landmarks.len())))
    }
}

/// Offsets of every landmark relative to `agent`, flattened.
fn landmark_offsets(agent: AgentId, world: &World) -> Vec<f32> {
    let origin = world.agents[agent.0].entity.state.p_pos;
    world
        .landmarks
        .iter()
        .flat_map(|l| math::sub(l.entity.state.p_pos, origin))
        .collect()
}

/// `-‖a − b‖²` for two referenced entities, `0.0` if either is unset.
fn neg_sq_distance(world: &World, a: Option<EntityRef>, b: Option<EntityRef>) -> f32 {
    match (
        a.and_then(|r| world.entity(r)),
        b.and_then(|r| world.entity(r)),
    ) {
        (Some(a), Some(b)) => -math::dist2(a.state.p_pos, b.state.p_pos),
        _ => 0.0,
    }
}
