//! Environment configuration and validation.
//!
//! [`EnvConfig`] controls how flat action vectors are interpreted, how
//! rewards are aggregated and how the environment RNG is seeded. Call
//! [`EnvConfig::validate()`] (done by [`MultiAgentEnv::new`]) before use.
//!
//! [`MultiAgentEnv::new`]: crate::MultiAgentEnv::new

use std::error::Error;
use std::fmt;

/// Default scale applied to physical actions when an agent has no `accel`.
pub const DEFAULT_SENSITIVITY: f32 = 5.0;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EnvConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `action_sensitivity` must be finite and positive.
    InvalidSensitivity {
        /// The invalid value.
        value: f32,
    },
    /// Index-valued action input only applies to discrete action spaces.
    IndexInputRequiresDiscrete,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSensitivity { value } => {
                write!(f, "action_sensitivity must be finite and positive, got {value}")
            }
            Self::IndexInputRequiresDiscrete => {
                write!(f, "discrete_action_input requires discrete_action_space")
            }
        }
    }
}

impl Error for ConfigError {}

// ── EnvConfig ──────────────────────────────────────────────────────

/// Knobs for a [`MultiAgentEnv`](crate::MultiAgentEnv).
#[derive(Clone, Debug, PartialEq)]
pub struct EnvConfig {
    /// Physical actions are `Discrete(2 * dim_p + 1)` instead of a box.
    pub discrete_action_space: bool,
    /// Actions are given as one index per component rather than a
    /// one-hot/logit vector.
    pub discrete_action_input: bool,
    /// Collapse physical action vectors to the one-hot of their argmax.
    /// `None` follows the world's `discrete_action` flag.
    pub force_discrete_action: Option<bool>,
    /// Every agent receives the sum of all rewards.
    /// `None` follows the world's `collaborative` flag.
    pub shared_reward: Option<bool>,
    /// Scale applied to physical actions of agents without an `accel`.
    pub action_sensitivity: f32,
    /// Seed for the environment RNG (resets, noise).
    pub seed: u64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            discrete_action_space: true,
            discrete_action_input: false,
            force_discrete_action: None,
            shared_reward: None,
            action_sensitivity: DEFAULT_SENSITIVITY,
            seed: 0,
        }
    }
}

impl EnvConfig {
    /// Check the configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.action_sensitivity.is_finite() || self.action_sensitivity <= 0.0 {
            return Err(ConfigError::InvalidSensitivity {
                value: self.action_sensitivity,
            });
        }
        if self.discrete_action_input && !self.discrete_action_space {
            return Err(ConfigError::IndexInputRequiresDiscrete);
        }
        Ok(())
    }

    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
