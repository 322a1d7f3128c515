//! Per-step timing metrics for the environment wrapper.
//!
//! [`StepMetrics`] captures where wall-clock time went during the most
//! recent [`MultiAgentEnv::step`](crate::MultiAgentEnv::step).

/// Timing metrics collected during a single step.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step.
    pub total_us: u64,
    /// Time spent in the world's physics step (including scripted agents).
    pub world_step_us: u64,
    /// Time spent in the observation callback across all agents.
    pub observation_us: u64,
    /// Time spent in the reward callback across all agents.
    pub reward_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.world_step_us, 0);
        assert_eq!(m.observation_us, 0);
        assert_eq!(m.reward_us, 0);
    }
}
