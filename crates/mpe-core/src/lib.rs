//! Core types and errors for multi-agent particle environments.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared across the MPE workspace:
//! entity identifiers, 2-D vector math, entity and action types,
//! benchmark diagnostics, and the construction/action error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod benchmark;
pub mod entity;
pub mod error;
pub mod id;
pub mod math;

pub use benchmark::BenchmarkData;
pub use entity::{Action, Color, Entity, EntityState};
pub use error::{ActionError, ScenarioError};
pub use id::{AgentId, EntityRef, LandmarkId};
pub use math::Vec2;
