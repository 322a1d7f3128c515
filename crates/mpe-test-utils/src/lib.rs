//! Test utilities and mock scenarios for MPE development.
//!
//! Provides mock implementations of the
//! [`Scenario`](mpe_scenario::Scenario) trait with known, hand-checkable
//! shapes, and a [`mock_registry`] containing only those mocks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{EmptyWorldScenario, FailingScenario, FixedLayoutScenario};

use mpe_scenario::ScenarioRegistry;

/// A registry with every mock scenario under its own name.
pub fn mock_registry() -> ScenarioRegistry {
    let mut registry = ScenarioRegistry::new();
    registry.register("fixed_layout", || Box::new(FixedLayoutScenario::default()));
    registry.register("failing", || Box::new(FailingScenario));
    registry.register("empty_world", || Box::new(EmptyWorldScenario));
    registry
}

