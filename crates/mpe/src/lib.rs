//! MPE: multi-agent particle environments for reinforcement learning.
//!
//! This is the top-level facade crate. It provides the environment
//! factory ([`make_env`]) and re-exports the public API of the MPE
//! sub-crates. For most users, adding `mpe` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use mpe::prelude::*;
//!
//! let mut env = make_env("simple_reference", false)?;
//! let obs = env.reset()?;
//! assert_eq!(obs.len(), env.n());
//!
//! // One all-zero action vector per agent: physical entries first,
//! // communication entries second.
//! let actions: Vec<Vec<f32>> = env
//!     .action_space()
//!     .iter()
//!     .map(|space| vec![0.0; space.flat_dim()])
//!     .collect();
//! let step = env.step(&actions)?;
//! assert_eq!(step.rewards.len(), env.n());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `mpe-core` | IDs, vector math, entities, actions, errors |
//! | [`world`] | `mpe-world` | Agents, landmarks, world container and physics |
//! | [`scenario`] | `mpe-scenario` | Scenario trait, registry, built-in scenarios |
//! | [`env`] | `mpe-env` | Environment wrapper, spaces, action routing, render frames |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod factory;

pub use factory::{bind, make_env, make_env_with, MakeEnvError};

/// Alias of [`make_env`] under its descriptive name.
pub use factory::make_env as create_environment;

/// Core types, IDs, and errors (`mpe-core`).
pub use mpe_core as types;

/// World container and particle dynamics (`mpe-world`).
///
/// [`world::World`] holds agents and landmarks; [`world::World::step`]
/// advances the physics by one `dt`.
pub use mpe_world as world;

/// Scenario trait, registry and built-in scenarios (`mpe-scenario`).
pub use mpe_scenario as scenario;

/// Environment wrapper (`mpe-env`).
///
/// [`env::MultiAgentEnv`] exposes `reset`, `step` and `render` along with
/// per-agent [`env::Space`]s.
pub use mpe_env as env;

/// Common imports for typical MPE usage.
///
/// ```rust
/// use mpe::prelude::*;
/// ```
pub mod prelude {
    // Factory
    pub use crate::factory::{make_env, make_env_with, MakeEnvError};

    // Core types
    pub use mpe_core::{Action, AgentId, BenchmarkData, Color, EntityRef, LandmarkId};

    // Errors
    pub use mpe_core::{ActionError, ScenarioError};
    pub use mpe_env::{ConfigError, StepError};
    pub use mpe_scenario::ResolutionError;

    // World
    pub use mpe_world::{Agent, Landmark, World};

    // Scenarios
    pub use mpe_scenario::{Benchmark, Scenario, ScenarioRegistry};

    // Environment
    pub use mpe_env::{
        EnvCallbacks, EnvConfig, Frame, MultiAgentEnv, Space, StepMetrics, StepResult,
    };
}
