//! Errors raised by [`MultiAgentEnv`](crate::MultiAgentEnv) at runtime.

use std::error::Error;
use std::fmt;

use mpe_core::{ActionError, AgentId};

/// Errors from [`reset`](crate::MultiAgentEnv::reset) and
/// [`step`](crate::MultiAgentEnv::step).
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The supplied actions could not be routed. The world was not stepped.
    Action(ActionError),
    /// An observation does not match the agent's declared observation space.
    ObservationShape {
        /// The observing agent.
        agent: AgentId,
        /// Length declared at construction.
        expected: usize,
        /// Length produced by the observation callback.
        got: usize,
    },
    /// A callback produced a NaN or infinite value.
    NonFinite {
        /// The agent concerned.
        agent: AgentId,
        /// Which quantity was non-finite (`"reward"` or `"observation"`).
        quantity: &'static str,
    },
    /// The world's policy agents no longer match those the environment
    /// was built for, e.g. after agents were added or removed through
    /// [`world_mut`](crate::MultiAgentEnv::world_mut).
    AgentsChanged {
        /// Policy agents at construction.
        declared: Vec<AgentId>,
        /// Policy agents in the world now.
        found: Vec<AgentId>,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(e) => write!(f, "action: {e}"),
            Self::ObservationShape {
                agent,
                expected,
                got,
            } => write!(
                f,
                "agent {agent}: observation has length {got}, declared space has {expected}"
            ),
            Self::NonFinite { agent, quantity } => {
                write!(f, "agent {agent}: non-finite {quantity}")
            }
            Self::AgentsChanged { declared, found } => write!(
                f,
                "policy agents changed: built for {} agents, world now has {}",
                declared.len(),
                found.len()
            ),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Action(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ActionError> for StepError {
    fn from(e: ActionError) -> Self {
        Self::Action(e)
    }
}
