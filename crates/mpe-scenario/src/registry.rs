//! Name → scenario resolution.
//!
//! Scenarios are registered explicitly at startup instead of being
//! discovered at runtime. Lookup is by exact, case-sensitive name.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::ResolutionError;
use crate::scenario::Scenario;
use crate::scenarios::{Simple, SimpleReference, SimpleSpeakerListener, SimpleSpread};

/// Builds a fresh scenario instance.
pub type ScenarioFactory = Arc<dyn Fn() -> Box<dyn Scenario> + Send + Sync>;

/// Ordered mapping from scenario name to factory.
#[derive(Clone, Default)]
pub struct ScenarioRegistry {
    entries: IndexMap<String, ScenarioFactory>,
}

impl ScenarioRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry containing every built-in scenario.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("simple", || Box::new(Simple));
        registry.register("simple_reference", || Box::new(SimpleReference));
        registry.register("simple_speaker_listener", || {
            Box::new(SimpleSpeakerListener)
        });
        registry.register("simple_spread", || Box::new(SimpleSpread::default()));
        registry
    }

    /// Register `factory` under `name`, replacing any previous entry.
    ///
    /// Returns `true` if an entry was replaced.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> bool
    where
        F: Fn() -> Box<dyn Scenario> + Send + Sync + 'static,
    {
        self.entries
            .insert(name.into(), Arc::new(factory))
            .is_some()
    }

    /// Build a fresh instance of the named scenario.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::UnknownScenario`] if nothing is
    /// registered under `name`.
    pub fn load(&self, name: &str) -> Result<Arc<dyn Scenario>, ResolutionError> {
        match self.entries.get(name) {
            Some(factory) => Ok(Arc::from(factory())),
            None => Err(ResolutionError::UnknownScenario {
                name: name.to_string(),
                available: self.names().map(str::to_string).collect(),
            }),
        }
    }

    /// Whether a scenario is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered scenarios.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ScenarioRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioRegistry")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_in_registration_order() {
        let r = ScenarioRegistry::builtin();
        let names: Vec<&str> = r.names().collect();
        assert_eq!(
            names,
            [
                "simple",
                "simple_reference",
                "simple_speaker_listener",
                "simple_spread"
            ]
        );
    }

    #[test]
    fn load_returns_named_scenario() {
        let r = ScenarioRegistry::builtin();
        let s = r.load("simple_reference").unwrap();
        assert_eq!(s.name(), "simple_reference");
    }

    #[test]
    fn lookup_is_exact() {
        let r = ScenarioRegistry::builtin();
        assert!(r.contains("simple"));
        assert!(!r.contains("Simple"));
        assert!(!r.contains("simple "));
        assert!(r.load("simple_spread_v2").is_err());
    }

    #[test]
    fn unknown_name_is_resolution_error() {
        let r = ScenarioRegistry::builtin();
        match r.load("does_not_exist") {
            Err(ResolutionError::UnknownScenario { name, available }) => {
                assert_eq!(name, "does_not_exist");
                assert_eq!(available.len(), 4);
            }
            other => panic!("expected UnknownScenario, got {:?}", other.err()),
        }
    }

    #[test]
    fn empty_name_is_unknown() {
        assert!(ScenarioRegistry::builtin().load("").is_err());
    }

    #[test]
    fn register_replaces_existing() {
        let mut r = ScenarioRegistry::new();
        assert!(r.is_empty());
        assert!(!r.register("custom", || Box::new(Simple)));
        assert!(r.register("custom", || Box::new(SimpleSpread::new(2))));
        assert_eq!(r.len(), 1);
        assert_eq!(r.load("custom").unwrap().name(), "simple_spread");
    }

    #[test]
    fn each_load_is_a_fresh_instance() {
        let r = ScenarioRegistry::builtin();
        let a = r.load("simple").unwrap();
        let b = r.load("simple").unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
