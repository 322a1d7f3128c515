//! World container and particle dynamics.
//!
//! A [`World`] holds the agents and landmarks of one environment along
//! with its physical parameters. [`World::step`] advances the simulation
//! by one `dt`: scripted agents pick actions, action and contact forces
//! are accumulated, velocities and positions are integrated, and agents'
//! communication state is updated.
//!
//! The world knows nothing about rewards, observations or action spaces;
//! those belong to scenarios and the environment wrapper.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod noise;
pub mod physics;
pub mod world;

pub use agent::{Agent, Landmark, ScriptedPolicy};
pub use physics::{collision_force, overlaps};
pub use world::World;
