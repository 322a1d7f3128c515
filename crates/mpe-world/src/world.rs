//! The [`World`] container: entities, physical parameters and validation.

use mpe_core::{AgentId, Color, Entity, EntityRef, LandmarkId, ScenarioError};

use crate::agent::{Agent, Landmark};

/// Simulated state of one environment: agents, landmarks and the
/// parameters of their dynamics.
///
/// Created by a scenario's `make_world()` and exclusively owned by the
/// environment built from it. Entities are addressed in two ways: by
/// typed id ([`AgentId`], [`LandmarkId`], [`EntityRef`]) or by flat
/// entity index, where agents come first followed by landmarks.
#[derive(Clone, Debug)]
pub struct World {
    /// Agents, policy-controlled and scripted.
    pub agents: Vec<Agent>,
    /// Landmarks.
    pub landmarks: Vec<Landmark>,
    /// Communication channel dimensionality. Default: 0.
    pub dim_c: usize,
    /// Simulation timestep. Default: 0.1.
    pub dt: f32,
    /// Fraction of velocity lost per step. Default: 0.25.
    pub damping: f32,
    /// Contact response stiffness. Default: 100.0.
    pub contact_force: f32,
    /// Softness of the contact response. Default: 0.001.
    pub contact_margin: f32,
    /// Agents share the summed reward. Default: false.
    pub collaborative: bool,
    /// Force discrete (one-hot argmax) interpretation of actions. Default: false.
    pub discrete_action: bool,
}

impl Default for World {
    fn default() -> Self {
        Self {
            agents: Vec::new(),
            landmarks: Vec::new(),
            dim_c: 0,
            dt: 0.1,
            damping: 0.25,
            contact_force: 1e2,
            contact_margin: 1e-3,
            collaborative: false,
            discrete_action: false,
        }
    }
}

impl World {
    /// Physical dimensionality.
    pub const DIM_P: usize = 2;
    /// Color dimensionality.
    pub const DIM_COLOR: usize = Color::DIM;

    /// An empty world with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Physical dimensionality (always 2).
    pub fn dim_p(&self) -> usize {
        Self::DIM_P
    }

    /// Color dimensionality (always 3).
    pub fn dim_color(&self) -> usize {
        Self::DIM_COLOR
    }

    /// Total number of entities (agents + landmarks).
    pub fn entity_count(&self) -> usize {
        self.agents.len() + self.landmarks.len()
    }

    /// Agents without a scripted policy, in index order.
    pub fn policy_agents(&self) -> Vec<AgentId> {
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.is_scripted())
            .map(|(i, _)| AgentId(i))
            .collect()
    }

    /// Agents driven by a scripted policy, in index order.
    pub fn scripted_agents(&self) -> Vec<AgentId> {
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_scripted())
            .map(|(i, _)| AgentId(i))
            .collect()
    }

    /// All agent ids.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> {
        (0..self.agents.len()).map(AgentId)
    }

    /// All landmark ids.
    pub fn landmark_ids(&self) -> impl Iterator<Item = LandmarkId> {
        (0..self.landmarks.len()).map(LandmarkId)
    }

    /// Look up an agent.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.0)
    }

    /// Look up an agent mutably.
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.0)
    }

    /// Look up a landmark.
    pub fn landmark(&self, id: LandmarkId) -> Option<&Landmark> {
        self.landmarks.get(id.0)
    }

    /// Resolve an [`EntityRef`] to its physical body.
    pub fn entity(&self, r: EntityRef) -> Option<&Entity> {
        match r {
            EntityRef::Agent(id) => self.agents.get(id.0).map(|a| &a.entity),
            EntityRef::Landmark(id) => self.landmarks.get(id.0).map(|l| &l.entity),
        }
    }

    /// Resolve an [`EntityRef`] to its physical body, mutably.
    pub fn entity_mut(&mut self, r: EntityRef) -> Option<&mut Entity> {
        match r {
            EntityRef::Agent(id) => self.agents.get_mut(id.0).map(|a| &mut a.entity),
            EntityRef::Landmark(id) => self.landmarks.get_mut(id.0).map(|l| &mut l.entity),
        }
    }

    /// Map a flat entity index to an [`EntityRef`].
    pub fn entity_ref_at(&self, index: usize) -> Option<EntityRef> {
        let n = self.agents.len();
        if index < n {
            Some(EntityRef::Agent(AgentId(index)))
        } else if index < self.entity_count() {
            Some(EntityRef::Landmark(LandmarkId(index - n)))
        } else {
            None
        }
    }

    /// All entity bodies in flat index order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.agents
            .iter()
            .map(|a| &a.entity)
            .chain(self.landmarks.iter().map(|l| &l.entity))
    }

    /// All entity bodies in flat index order, mutably.
    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.agents
            .iter_mut()
            .map(|a| &mut a.entity)
            .chain(self.landmarks.iter_mut().map(|l| &mut l.entity))
    }

    /// Validate structural invariants.
    ///
    /// Called by the environment factory on every freshly built world.
    /// Checks parameters and entity properties, not scenario semantics.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let invalid = |reason: String| Err(ScenarioError::InvalidWorld { reason });

        if self.agents.is_empty() {
            return invalid("world has no agents".into());
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return invalid(format!("dt must be finite and positive, got {}", self.dt));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return invalid(format!("damping must be in [0, 1], got {}", self.damping));
        }
        if !self.contact_force.is_finite() || self.contact_force < 0.0 {
            return invalid(format!(
                "contact_force must be finite and >= 0, got {}",
                self.contact_force
            ));
        }
        if !self.contact_margin.is_finite() || self.contact_margin <= 0.0 {
            return invalid(format!(
                "contact_margin must be finite and positive, got {}",
                self.contact_margin
            ));
        }
        for e in self.entities() {
            if !e.size.is_finite() || e.size <= 0.0 {
                return invalid(format!("{}: size must be positive, got {}", e.name, e.size));
            }
            if !e.initial_mass.is_finite() || e.initial_mass <= 0.0 {
                return invalid(format!(
                    "{}: mass must be positive, got {}",
                    e.name, e.initial_mass
                ));
            }
        }
        for a in &self.agents {
            if !a.u_range.is_finite() || a.u_range <= 0.0 || !(2.0 * a.u_range).is_finite() {
                return invalid(format!(
                    "{}: u_range must be finite and positive, got {}",
                    a.entity.name, a.u_range
                ));
            }
            if a.comm.len() != self.dim_c {
                return invalid(format!(
                    "{}: communication state has {} channels, world has dim_c={}",
                    a.entity.name,
                    a.comm.len(),
                    self.dim_c
                ));
            }
        }
        Ok(())
    }
}
