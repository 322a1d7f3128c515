//! Agents and landmarks.

use mpe_core::{Action, AgentId, Entity, EntityRef};

use crate::world::World;

/// A hard-coded policy for a scripted agent.
///
/// Called once per [`World::step`] before forces are applied. Agents with
/// a scripted policy are not controlled by the environment wrapper.
pub type ScriptedPolicy = fn(AgentId, &World) -> Action;

/// An agent: a movable entity that acts and communicates.
#[derive(Clone, Debug)]
pub struct Agent {
    /// Physical body.
    pub entity: Entity,
    /// Silent agents cannot communicate; their utterance is all zeros.
    pub silent: bool,
    /// Marks an agent that should not see the world. Neither the physics
    /// nor the environment wrapper read it; observation callbacks written
    /// by scenario authors decide what blindness hides.
    pub blind: bool,
    /// Standard deviation of Gaussian noise added to the physical action.
    pub u_noise: Option<f32>,
    /// Standard deviation of Gaussian noise added to the utterance.
    pub c_noise: Option<f32>,
    /// Bound of the continuous physical action space.
    pub u_range: f32,
    /// Current utterance, visible to other agents (length `dim_c`).
    pub comm: Vec<f32>,
    /// Action applied on the next step.
    pub action: Action,
    /// Scripted policy, if the agent is not policy-controlled.
    pub policy: Option<ScriptedPolicy>,
    /// Primary task target (e.g. the entity this agent must guide).
    pub goal_a: Option<EntityRef>,
    /// Secondary task target (e.g. the landmark `goal_a` must reach).
    pub goal_b: Option<EntityRef>,
}

impl Agent {
    /// Create a movable, non-silent agent with default properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            entity: Entity::new(name, true),
            silent: false,
            blind: false,
            u_noise: None,
            c_noise: None,
            u_range: 1.0,
            comm: Vec::new(),
            action: Action::default(),
            policy: None,
            goal_a: None,
            goal_b: None,
        }
    }

    /// Whether a scripted policy drives this agent.
    pub fn is_scripted(&self) -> bool {
        self.policy.is_some()
    }

    /// Zero the utterance and pending action for `dim_c` channels.
    pub fn reset_comm(&mut self, dim_c: usize) {
        self.comm = vec![0.0; dim_c];
        self.action = Action::zeros(dim_c);
    }
}

/// A landmark: an immovable (by default) entity agents navigate around.
#[derive(Clone, Debug, PartialEq)]
pub struct Landmark {
    /// Physical body.
    pub entity: Entity,
}

impl Landmark {
    /// Create an immovable landmark with default properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            entity: Entity::new(name, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_defaults() {
        let a = Agent::new("agent 0");
        assert!(a.entity.movable);
        assert!(!a.silent);
        assert!(!a.is_scripted());
        assert_eq!(a.u_range, 1.0);
    }

    #[test]
    fn reset_comm_sizes_channels() {
        let mut a = Agent::new("agent 0");
        a.reset_comm(3);
        assert_eq!(a.comm, vec![0.0; 3]);
        assert_eq!(a.action.c.len(), 3);
    }

    #[test]
    fn landmark_is_immovable() {
        assert!(!Landmark::new("landmark 0").entity.movable);
    }
}
