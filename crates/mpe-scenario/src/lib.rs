//! Scenario definitions and name-based scenario resolution.
//!
//! A [`Scenario`] describes one multi-agent task: how to build its world,
//! how to reset it, and how to score and observe it per agent. Scenarios
//! that support evaluation diagnostics additionally expose a
//! [`Benchmark`] capability.
//!
//! [`ScenarioRegistry`] maps scenario names to factories. The built-in
//! registry ([`ScenarioRegistry::builtin`]) contains:
//!
//! | Name | Agents | Task |
//! |------|--------|------|
//! | `simple` | 1 | reach the landmark |
//! | `simple_reference` | 2 | guide the other agent to its goal by talking |
//! | `simple_speaker_listener` | 2 | a static speaker directs a silent listener |
//! | `simple_spread` | N | cover all landmarks without colliding |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod registry;
pub mod scenario;
pub mod scenarios;

pub use error::ResolutionError;
pub use registry::{ScenarioFactory, ScenarioRegistry};
pub use scenario::{Benchmark, Scenario};
pub use scenarios::{Simple, SimpleReference, SimpleSpeakerListener, SimpleSpread};
