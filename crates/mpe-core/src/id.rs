//! Strongly-typed entity identifiers.

use std::fmt;

/// Identifies an agent within a world.
///
/// `AgentId(n)` corresponds to the n-th agent in `World::agents`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub usize);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for AgentId {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Identifies a landmark within a world.
///
/// `LandmarkId(n)` corresponds to the n-th landmark in `World::landmarks`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LandmarkId(pub usize);

impl fmt::Display for LandmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for LandmarkId {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// A reference to any entity in a world: an agent or a landmark.
///
/// Scenarios use this for task targets, e.g. "agent 0 should guide
/// agent 1 to landmark 2".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// An agent.
    Agent(AgentId),
    /// A landmark.
    Landmark(LandmarkId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Agent(id) => write!(f, "agent {id}"),
            Self::Landmark(id) => write!(f, "landmark {id}"),
        }
    }
}

impl From<AgentId> for EntityRef {
    fn from(id: AgentId) -> Self {
        Self::Agent(id)
    }
}

impl From<LandmarkId> for EntityRef {
    fn from(id: LandmarkId) -> Self {
        Self::Landmark(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ref_display() {
        assert_eq!(EntityRef::from(AgentId(1)).to_string(), "agent 1");
        assert_eq!(EntityRef::from(LandmarkId(2)).to_string(), "landmark 2");
    }

    #[test]
    fn ids_order_by_index() {
        assert!(AgentId(0) < AgentId(1));
        assert!(LandmarkId(3) > LandmarkId(2));
    }
}
