//! Particle dynamics: force accumulation and semi-implicit Euler integration.
//!
//! One [`World::step`] runs, in order:
//!
//! 1. scripted agents choose their actions,
//! 2. action forces (`u` plus optional Gaussian noise) on movable agents,
//! 3. soft contact forces between every colliding pair,
//! 4. damping, force integration, speed clamp and position update,
//! 5. communication state update (silent agents emit zeros).

use mpe_core::math::{self, Vec2, ZERO};
use mpe_core::{AgentId, Entity};
use rand::Rng;

use crate::agent::ScriptedPolicy;
use crate::noise::{perturb, standard_normal};
use crate::world::World;

/// Contact force between two entities, `(force on a, force on b)`.
///
/// The penetration term is `k * softplus(-(dist - dist_min) / k)` with
/// `k = contact_margin`, so the force decays smoothly to zero once the
/// bodies separate. Only movable entities receive a force. Entities that
/// do not collide, or that sit at exactly the same position, exchange no
/// force.
pub fn collision_force(
    a: &Entity,
    b: &Entity,
    contact_force: f32,
    contact_margin: f32,
) -> (Option<Vec2>, Option<Vec2>) {
    if !a.collide || !b.collide {
        return (None, None);
    }
    let delta = math::sub(a.state.p_pos, b.state.p_pos);
    let dist = math::norm(delta);
    if dist == 0.0 {
        return (None, None);
    }
    let dist_min = a.size + b.size;
    let k = contact_margin;
    let penetration = math::softplus(-(dist - dist_min) / k) * k;
    let force = math::scale(delta, contact_force * penetration / dist);
    (
        a.movable.then_some(force),
        b.movable.then_some(math::scale(force, -1.0)),
    )
}

/// Whether two bodies overlap (`dist < size_a + size_b`).
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    math::dist(a.state.p_pos, b.state.p_pos) < a.size + b.size
}

fn accumulate(slot: &mut Option<Vec2>, f: Vec2) {
    *slot = Some(math::add(slot.unwrap_or(ZERO), f));
}

impl World {
    /// Advance the world by one timestep.
    ///
    /// `rng` drives action and communication noise; worlds without noisy
    /// agents never draw from it.
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        let scripted: Vec<(usize, ScriptedPolicy)> = self
            .agents
            .iter()
            .enumerate()
            .filter_map(|(i, a)| a.policy.map(|p| (i, p)))
            .collect();
        for (i, policy) in scripted {
            let action = policy(AgentId(i), self);
            self.agents[i].action = action;
        }

        let mut p_force: Vec<Option<Vec2>> = vec![None; self.entity_count()];
        self.apply_action_force(&mut p_force, rng);
        self.apply_environment_force(&mut p_force);
        self.integrate_state(&p_force);

        let dim_c = self.dim_c;
        for agent in &mut self.agents {
            agent.comm = if agent.silent {
                vec![0.0; dim_c]
            } else {
                let mut c = agent.action.c.clone();
                c.resize(dim_c, 0.0);
                perturb(rng, &c, agent.c_noise)
            };
        }
    }

    fn apply_action_force<R: Rng>(&self, p_force: &mut [Option<Vec2>], rng: &mut R) {
        for (i, agent) in self.agents.iter().enumerate() {
            if !agent.entity.movable {
                continue;
            }
            let noise = match agent.u_noise {
                Some(s) => [s * standard_normal(rng), s * standard_normal(rng)],
                None => ZERO,
            };
            p_force[i] = Some(math::add(agent.action.u, noise));
        }
    }

    fn apply_environment_force(&self, p_force: &mut [Option<Vec2>]) {
        let entities: Vec<&Entity> = self.entities().collect();
        for (a, ea) in entities.iter().enumerate() {
            for (b, eb) in entities.iter().enumerate().skip(a + 1) {
                let (fa, fb) = collision_force(ea, eb, self.contact_force, self.contact_margin);
                if let Some(f) = fa {
                    accumulate(&mut p_force[a], f);
                }
                if let Some(f) = fb {
                    accumulate(&mut p_force[b], f);
                }
            }
        }
    }

    fn integrate_state(&mut self, p_force: &[Option<Vec2>]) {
        let (dt, damping) = (self.dt, self.damping);
        for (entity, force) in self.entities_mut().zip(p_force) {
            if !entity.movable {
                continue;
            }
            let mut vel = math::scale(entity.state.p_vel, 1.0 - damping);
            if let Some(f) = force {
                vel = math::add(vel, math::scale(*f, dt / entity.mass()));
            }
            if let Some(max_speed) = entity.max_speed {
                let speed = math::norm(vel);
                if speed > max_speed {
                    vel = math::scale(vel, max_speed / speed);
                }
            }
            entity.state.p_vel = vel;
            entity.state.p_pos = math::add(entity.state.p_pos, math::scale(vel, dt));
        }
    }
}
