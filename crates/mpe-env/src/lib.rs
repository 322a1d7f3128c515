//! Multi-agent environment wrapper for particle worlds.
//!
//! [`MultiAgentEnv`] turns a [`World`](mpe_world::World) plus a set of
//! [`EnvCallbacks`] into a reinforcement-learning environment with
//! gym-style `reset`/`step`/`render`, per-agent action and observation
//! [`Space`]s, and an [`ActionLayout`] that routes each policy agent's
//! flat action vector into physical and communication actions.
//!
//! The wrapper is task-agnostic: rewards, observations, resets and
//! diagnostics all come from callbacks, typically bound from a scenario
//! by the `mpe` facade's `make_env`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod callbacks;
pub mod config;
pub mod environment;
pub mod error;
pub mod metrics;
pub mod render;
pub mod space;

pub use action::{ActionLayout, Segment, SegmentKind};
pub use callbacks::{
    DoneCallback, EnvCallbacks, InfoCallback, ObservationCallback, ResetCallback, RewardCallback,
};
pub use config::{ConfigError, EnvConfig, DEFAULT_SENSITIVITY};
pub use environment::{MultiAgentEnv, StepResult};
pub use error::StepError;
pub use metrics::StepMetrics;
pub use render::{EntityKind, Frame, FrameEntity};
pub use space::Space;
