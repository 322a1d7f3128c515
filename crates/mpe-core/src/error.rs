//! Error types shared across the MPE workspace.
//!
//! Organized by subsystem: scenario construction (world building) and
//! action routing (converting flat action vectors into agent actions).

use std::error::Error;
use std::fmt;

use crate::id::AgentId;

/// Errors from a scenario's world construction.
///
/// This is the construction error surfaced by the environment factory
/// when `make_world()` fails. It is propagated unmodified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScenarioError {
    /// The scenario's own parameters are invalid (e.g. zero agents).
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// The world produced by the scenario violates a structural invariant.
    InvalidWorld {
        /// Description of the violated invariant.
        reason: String,
    },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid scenario config: {reason}"),
            Self::InvalidWorld { reason } => write!(f, "invalid world: {reason}"),
        }
    }
}

impl Error for ScenarioError {}

/// Errors from converting per-agent action vectors into agent actions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionError {
    /// The number of action vectors does not match the number of agents.
    AgentCountMismatch {
        /// Agents controlled by the environment.
        expected: usize,
        /// Action vectors supplied.
        got: usize,
    },
    /// An agent's action vector has the wrong length for its action space.
    LengthMismatch {
        /// The agent whose action was malformed.
        agent: AgentId,
        /// Length required by the agent's action layout.
        expected: usize,
        /// Length supplied.
        got: usize,
    },
    /// An index-valued action component is outside its discrete range.
    IndexOutOfRange {
        /// The agent whose action was malformed.
        agent: AgentId,
        /// The offending value.
        value: i64,
        /// Number of valid choices.
        n: usize,
    },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AgentCountMismatch { expected, got } => {
                write!(f, "expected actions for {expected} agents, got {got}")
            }
            Self::LengthMismatch {
                agent,
                expected,
                got,
            } => write!(
                f,
                "agent {agent}: action vector has length {got}, expected {expected}"
            ),
            Self::IndexOutOfRange { agent, value, n } => {
                write!(f, "agent {agent}: action index {value} not in [0, {n})")
            }
        }
    }
}

impl Error for ActionError {}
