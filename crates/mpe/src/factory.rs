//! Environment construction by scenario name.
//!
//! [`make_env`] resolves a scenario through the built-in registry, builds
//! its world, and binds the scenario's callbacks into a
//! [`MultiAgentEnv`]. [`make_env_with`] does the same against a caller
//! supplied registry and configuration.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use mpe_core::{AgentId, ScenarioError};
use mpe_env::{ConfigError, EnvCallbacks, EnvConfig, MultiAgentEnv};
use mpe_scenario::{ResolutionError, Scenario, ScenarioRegistry};
use mpe_world::World;

/// Capability name reported when benchmark data is requested but absent.
pub const BENCHMARK_CAPABILITY: &str = "benchmark_data";

// ── MakeEnvError ────────────────────────────────────────────────

/// Errors from [`make_env`] and [`make_env_with`].
///
/// Every variant is terminal: no environment is returned and nothing is
/// left to clean up. The wrapped error is available via
/// [`source()`](Error::source).
#[derive(Clone, Debug, PartialEq)]
pub enum MakeEnvError {
    /// The scenario name is unknown, or lacks a requested capability.
    Resolution(ResolutionError),
    /// The scenario failed to build a valid world.
    Construction(ScenarioError),
    /// The environment configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for MakeEnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution(e) => write!(f, "resolution: {e}"),
            Self::Construction(e) => write!(f, "construction: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for MakeEnvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Resolution(e) => Some(e),
            Self::Construction(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<ResolutionError> for MakeEnvError {
    fn from(e: ResolutionError) -> Self {
        Self::Resolution(e)
    }
}

impl From<ScenarioError> for MakeEnvError {
    fn from(e: ScenarioError) -> Self {
        Self::Construction(e)
    }
}

impl From<ConfigError> for MakeEnvError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── Factory ─────────────────────────────────────────────────────

/// Build the environment for a built-in scenario with default settings.
///
/// When `benchmark` is true the scenario's benchmark data is bound as the
/// per-step info; scenarios without that capability are rejected.
///
/// # Errors
///
/// See [`make_env_with`].
pub fn make_env(scenario_name: &str, benchmark: bool) -> Result<MultiAgentEnv, MakeEnvError> {
    make_env_with(
        &ScenarioRegistry::builtin(),
        scenario_name,
        benchmark,
        EnvConfig::default(),
    )
}

/// Build the environment for `scenario_name` from `registry`.
///
/// The world is built with an RNG seeded from `config.seed` and checked
/// with [`World::validate`] before it is wrapped.
///
/// # Errors
///
/// - [`MakeEnvError::Config`] if `config` is invalid (checked first).
/// - [`MakeEnvError::Resolution`] if the name is not registered, or if
///   `benchmark` is requested from a scenario without benchmark data.
/// - [`MakeEnvError::Construction`] if `make_world` fails or returns a
///   world that violates its structural invariants.
pub fn make_env_with(
    registry: &ScenarioRegistry,
    scenario_name: &str,
    benchmark: bool,
    config: EnvConfig,
) -> Result<MultiAgentEnv, MakeEnvError> {
    config.validate()?;

    let scenario = registry.load(scenario_name)?;
    if benchmark && scenario.benchmark().is_none() {
        return Err(ResolutionError::MissingCapability {
            scenario: scenario_name.to_string(),
            capability: BENCHMARK_CAPABILITY,
        }
        .into());
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let world = scenario.make_world(&mut rng)?;
    world.validate()?;

    let env = MultiAgentEnv::new(world, bind(scenario, benchmark), config)?;
    tracing::debug!(
        scenario = scenario_name,
        benchmark,
        n = env.n(),
        "environment built"
    );
    Ok(env)
}

/// Bind a scenario's capabilities as environment callbacks.
///
/// `info` is bound only when `benchmark` is set.
pub fn bind(scenario: Arc<dyn Scenario>, benchmark: bool) -> EnvCallbacks {
    let reset = Arc::clone(&scenario);
    let reward = Arc::clone(&scenario);
    let observation = Arc::clone(&scenario);

    let info: Option<mpe_env::InfoCallback> = benchmark.then(|| {
        let s = Arc::clone(&scenario);
        Box::new(move |a: AgentId, w: &World| {
            s.benchmark()
                .map(|b| b.benchmark_data(a, w))
                .unwrap_or_default()
        }) as mpe_env::InfoCallback
    });

    EnvCallbacks {
        reset: Some(Box::new(move |w: &mut World, rng: &mut ChaCha8Rng| {
            reset.reset_world(w, rng)
        })),
        reward: Some(Box::new(move |a: AgentId, w: &World| reward.reward(a, w))),
        observation: Some(Box::new(move |a: AgentId, w: &World| {
            observation.observation(a, w)
        })),
        info,
        done: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_stage() {
        let e = MakeEnvError::from(ScenarioError::InvalidWorld {
            reason: "world has no agents".into(),
        });
        assert_eq!(e.to_string(), "construction: invalid world: world has no agents");
        assert!(e.source().is_some());
    }

    #[test]
    fn bind_without_benchmark_has_no_info() {
        let scenario = ScenarioRegistry::builtin().load("simple_spread").unwrap();
        let callbacks = bind(scenario, false);
        assert!(callbacks.info.is_none());
        assert!(callbacks.done.is_none());
        assert!(callbacks.reset.is_some());
    }

    #[test]
    fn bind_with_benchmark_has_info() {
        let scenario = ScenarioRegistry::builtin().load("simple_spread").unwrap();
        assert!(bind(scenario, true).info.is_some());
    }
}
