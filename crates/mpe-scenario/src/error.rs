//! Scenario resolution errors.

use std::error::Error;
use std::fmt;

/// The named scenario cannot be resolved.
///
/// Terminal: the caller must supply a known scenario name (or drop the
/// capability it asked for).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolutionError {
    /// No scenario is registered under this name.
    UnknownScenario {
        /// The requested name.
        name: String,
        /// Names that are registered, in registration order.
        available: Vec<String>,
    },
    /// The scenario exists but lacks a capability the caller requires.
    MissingCapability {
        /// The scenario's name.
        scenario: String,
        /// The missing capability, e.g. `"benchmark_data"`.
        capability: &'static str,
    },
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownScenario { name, available } => {
                write!(f, "unknown scenario '{name}'")?;
                if !available.is_empty() {
                    write!(f, " (available: {})", available.join(", "))?;
                }
                Ok(())
            }
            Self::MissingCapability {
                scenario,
                capability,
            } => write!(f, "scenario '{scenario}' does not provide {capability}"),
        }
    }
}

impl Error for ResolutionError {}
