//! The multi-agent environment wrapper.
//!
//! [`MultiAgentEnv`] owns a [`World`] and the callbacks that give it a
//! task. Each [`step()`](MultiAgentEnv::step) routes one flat action
//! vector per policy agent, advances the physics by one `dt`, and
//! collects observations, rewards, termination flags and info.
//!
//! # Ownership model
//!
//! `MultiAgentEnv` is [`Send`] (can be moved to a worker thread) but all
//! mutation goes through `&mut self`. Parallel rollouts construct one
//! environment per worker.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use mpe_core::{Action, AgentId, BenchmarkData};
use mpe_world::World;

use crate::action::ActionLayout;
use crate::callbacks::EnvCallbacks;
use crate::config::{ConfigError, EnvConfig};
use crate::error::StepError;
use crate::metrics::StepMetrics;
use crate::render::Frame;
use crate::space::Space;

// Compile-time assertion: MultiAgentEnv is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<MultiAgentEnv>();
    }
};

// ── StepResult ──────────────────────────────────────────────────

/// Per-agent results of one [`MultiAgentEnv::step()`].
///
/// Every vector has one entry per policy agent, in agent order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepResult {
    /// Observations after the step.
    pub observations: Vec<Vec<f32>>,
    /// Rewards (the shared total for every agent when rewards are shared).
    pub rewards: Vec<f32>,
    /// Termination flags.
    pub dones: Vec<bool>,
    /// Diagnostics (empty unless an info callback is bound).
    pub infos: Vec<BenchmarkData>,
}

impl StepResult {
    /// Whether every agent reports done.
    pub fn all_done(&self) -> bool {
        !self.dones.is_empty() && self.dones.iter().all(|&d| d)
    }
}

// ── MultiAgentEnv ───────────────────────────────────────────────

/// A multi-agent environment: a world plus the callbacks defining its task.
///
/// # Example
///
/// ```ignore
/// let mut env = MultiAgentEnv::new(world, callbacks, EnvConfig::default())?;
/// let obs = env.reset()?;
/// let mut rng = ChaCha8Rng::seed_from_u64(0);
/// let actions: Vec<Vec<f32>> = env.action_space().iter().map(|s| s.sample(&mut rng)).collect();
/// let result = env.step(&actions)?;
/// ```
pub struct MultiAgentEnv {
    world: World,
    callbacks: EnvCallbacks,
    config: EnvConfig,
    agents: Vec<AgentId>,
    layouts: Vec<ActionLayout>,
    action_space: Vec<Space>,
    observation_space: Vec<Space>,
    shared_reward: bool,
    rng: ChaCha8Rng,
    time: u64,
    last_metrics: StepMetrics,
}

impl MultiAgentEnv {
    /// Wrap `world` with `callbacks` under `config`.
    ///
    /// Validates the configuration, derives each policy agent's action
    /// layout and space, and sizes each observation space from the
    /// observation callback's output on `world` as given.
    pub fn new(
        world: World,
        callbacks: EnvCallbacks,
        config: EnvConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let force_discrete = config
            .force_discrete_action
            .unwrap_or(world.discrete_action);
        let shared_reward = config.shared_reward.unwrap_or(world.collaborative);
        let agents = world.policy_agents();

        let layouts: Vec<ActionLayout> = agents
            .iter()
            .map(|&id| {
                ActionLayout::new(id, &world.agents[id.0], &world, &config, force_discrete)
            })
            .collect();
        let action_space = layouts.iter().map(ActionLayout::space).collect();
        let observation_space = agents
            .iter()
            .map(|&id| Space::unbounded(callbacks.observation(id, &world).len()))
            .collect();

        tracing::debug!(
            agents = agents.len(),
            landmarks = world.landmarks.len(),
            dim_c = world.dim_c,
            shared_reward,
            force_discrete,
            info = callbacks.info.is_some(),
            "environment created"
        );

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            world,
            callbacks,
            config,
            agents,
            layouts,
            action_space,
            observation_space,
            shared_reward,
            time: 0,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Re-randomize the world and return the initial observations.
    ///
    /// # Errors
    ///
    /// [`StepError::AgentsChanged`] if the world's policy agents were
    /// changed since construction; the reset callback is not called.
    /// [`StepError::ObservationShape`] or [`StepError::NonFinite`] if an
    /// observation disagrees with the declared space.
    pub fn reset(&mut self) -> Result<Vec<Vec<f32>>, StepError> {
        self.check_agents()?;
        self.callbacks.reset(&mut self.world, &mut self.rng);
        self.time = 0;
        tracing::debug!(agents = self.agents.len(), "environment reset");
        self.observe_all()
    }

    /// Reseed the environment RNG, then [`reset()`](Self::reset).
    pub fn reset_with_seed(&mut self, seed: u64) -> Result<Vec<Vec<f32>>, StepError> {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.reset()
    }

    /// Apply one flat action vector per policy agent and advance one step.
    ///
    /// All actions are routed before anything is mutated, so an
    /// [`StepError::Action`] or [`StepError::AgentsChanged`] leaves the
    /// environment untouched. Observation
    /// and reward errors are detected after the world has stepped.
    pub fn step<A: AsRef<[f32]>>(&mut self, actions: &[A]) -> Result<StepResult, StepError> {
        let start = Instant::now();

        self.check_agents()?;
        let routed = self.route(actions)?;
        for (&id, action) in self.agents.iter().zip(routed) {
            if let Some(agent) = self.world.agent_mut(id) {
                agent.action = action;
            }
        }

        let t = Instant::now();
        self.world.step(&mut self.rng);
        let world_step_us = t.elapsed().as_micros() as u64;

        let t = Instant::now();
        let observations = self.observe_all()?;
        let observation_us = t.elapsed().as_micros() as u64;

        let t = Instant::now();
        let mut rewards = Vec::with_capacity(self.agents.len());
        for &id in &self.agents {
            let r = self.callbacks.reward(id, &self.world);
            if !r.is_finite() {
                tracing::warn!(agent = id.0, reward = r, "non-finite reward");
                return Err(StepError::NonFinite {
                    agent: id,
                    quantity: "reward",
                });
            }
            rewards.push(r);
        }
        if self.shared_reward {
            let total: f32 = rewards.iter().sum();
            rewards.iter_mut().for_each(|r| *r = total);
        }
        let reward_us = t.elapsed().as_micros() as u64;

        let dones = self
            .agents
            .iter()
            .map(|&id| self.callbacks.done(id, &self.world))
            .collect();
        let infos = self
            .agents
            .iter()
            .map(|&id| self.callbacks.info(id, &self.world))
            .collect();

        self.time += 1;
        self.last_metrics = StepMetrics {
            total_us: start.elapsed().as_micros() as u64,
            world_step_us,
            observation_us,
            reward_us,
        };
        tracing::trace!(time = self.time, total_us = self.last_metrics.total_us, "step");

        Ok(StepResult {
            observations,
            rewards,
            dones,
            infos,
        })
    }

    /// A drawable snapshot of the current world.
    pub fn render(&self) -> Frame {
        Frame::capture(&self.world, self.time)
    }

    // ── Accessors ────────────────────────────────────────────────

    /// Number of policy agents.
    pub fn n(&self) -> usize {
        self.agents.len()
    }

    /// The policy agents, in action order.
    pub fn agents(&self) -> &[AgentId] {
        &self.agents
    }

    /// Action space per policy agent.
    pub fn action_space(&self) -> &[Space] {
        &self.action_space
    }

    /// Observation space per policy agent.
    pub fn observation_space(&self) -> &[Space] {
        &self.observation_space
    }

    /// Action layout per policy agent.
    pub fn action_layouts(&self) -> &[ActionLayout] {
        &self.layouts
    }

    /// The wrapped world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the wrapped world.
    ///
    /// Entity state may be edited freely. Adding, removing or scripting
    /// agents makes later [`reset()`](Self::reset) and
    /// [`step()`](Self::step) calls fail with
    /// [`StepError::AgentsChanged`].
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Steps since the last reset.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Timing of the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Whether step info comes from a bound info callback.
    pub fn has_info_callback(&self) -> bool {
        self.callbacks.info.is_some()
    }

    /// Whether rewards are summed and shared.
    pub fn shared_reward(&self) -> bool {
        self.shared_reward
    }

    /// The configuration the environment was built with.
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    // ── Internals ────────────────────────────────────────────────

    fn route<A: AsRef<[f32]>>(&self, actions: &[A]) -> Result<Vec<Action>, StepError> {
        if actions.len() != self.agents.len() {
            return Err(mpe_core::ActionError::AgentCountMismatch {
                expected: self.agents.len(),
                got: actions.len(),
            }
            .into());
        }
        self.layouts
            .iter()
            .zip(actions)
            .map(|(layout, a)| {
                let agent = self
                    .world
                    .agent(layout.agent())
                    .ok_or_else(|| self.agents_changed())?;
                layout.route(agent, a.as_ref()).map_err(StepError::from)
            })
            .collect()
    }

    fn check_agents(&self) -> Result<(), StepError> {
        if self.world.policy_agents() == self.agents {
            Ok(())
        } else {
            Err(self.agents_changed())
        }
    }

    fn agents_changed(&self) -> StepError {
        StepError::AgentsChanged {
            declared: self.agents.clone(),
            found: self.world.policy_agents(),
        }
    }

    fn observe_all(&self) -> Result<Vec<Vec<f32>>, StepError> {
        self.agents
            .iter()
            .zip(&self.observation_space)
            .map(|(&id, space)| {
                let obs = self.callbacks.observation(id, &self.world);
                let expected = space.flat_dim();
                if obs.len() != expected {
                    return Err(StepError::ObservationShape {
                        agent: id,
                        expected,
                        got: obs.len(),
                    });
                }
                if obs.iter().any(|v| !v.is_finite()) {
                    return Err(StepError::NonFinite {
                        agent: id,
                        quantity: "observation",
                    });
                }
                Ok(obs)
            })
            .collect()
    }
}

impl std::fmt::Debug for MultiAgentEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiAgentEnv")
            .field("n", &self.agents.len())
            .field("time", &self.time)
            .field("shared_reward", &self.shared_reward)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpe_world::{Agent, Landmark};
    use smallvec::smallvec;

    /// Two agents, one landmark, 2 channels; observation is own position.
    fn env_with(config: EnvConfig, callbacks: EnvCallbacks) -> MultiAgentEnv {
        let mut world = World::new();
        world.dim_c = 2;
        for i in 0..2 {
            let mut a = Agent::new(format!("agent {i}"));
            a.reset_comm(2);
            world.agents.push(a);
        }
        world.landmarks.push(Landmark::new("landmark 0"));
        MultiAgentEnv::new(world, callbacks, config).unwrap()
    }

    fn position_obs() -> EnvCallbacks {
        EnvCallbacks {
            observation: Some(Box::new(|a: AgentId, w: &World| {
                w.agents[a.0].entity.state.p_pos.to_vec()
            })),
            reward: Some(Box::new(|a: AgentId, _: &World| a.0 as f32 + 1.0)),
            ..EnvCallbacks::default()
        }
    }

    #[test]
    fn spaces_follow_world() {
        let env = env_with(EnvConfig::default(), position_obs());
        assert_eq!(env.n(), 2);
        assert_eq!(
            env.action_space()[0],
            Space::MultiDiscrete {
                nvec: smallvec![5, 2]
            }
        );
        assert_eq!(env.observation_space()[1], Space::unbounded(2));
        assert!(!env.has_info_callback());
    }

    #[test]
    fn step_moves_agent_and_counts_time() {
        let mut env = env_with(EnvConfig::default(), position_obs());
        env.reset().unwrap();
        // agent 0 pushes +x, agent 1 idles.
        let actions = [
            vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ];
        let result = env.step(&actions).unwrap();
        assert_eq!(env.time(), 1);
        assert!(result.observations[0][0] > 0.0);
        assert_eq!(result.observations[1], vec![0.0, 0.0]);
        assert_eq!(result.dones, vec![false, false]);
        assert!(result.infos.iter().all(BenchmarkData::is_empty));
    }

    #[test]
    fn communication_segment_reaches_world() {
        let mut env = env_with(EnvConfig::default(), position_obs());
        let actions = [vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0], vec![0.0; 7]];
        env.step(&actions).unwrap();
        assert_eq!(env.world().agents[0].comm, vec![0.0, 1.0]);
    }

    #[test]
    fn independent_rewards_by_default() {
        let mut env = env_with(EnvConfig::default(), position_obs());
        let result = env.step(&[vec![0.0; 7], vec![0.0; 7]]).unwrap();
        assert_eq!(result.rewards, vec![1.0, 2.0]);
    }

    #[test]
    fn shared_reward_sums() {
        let config = EnvConfig {
            shared_reward: Some(true),
            ..EnvConfig::default()
        };
        let mut env = env_with(config, position_obs());
        assert!(env.shared_reward());
        let result = env.step(&[vec![0.0; 7], vec![0.0; 7]]).unwrap();
        assert_eq!(result.rewards, vec![3.0, 3.0]);
    }

    #[test]
    fn bad_actions_leave_environment_untouched() {
        let mut env = env_with(EnvConfig::default(), position_obs());
        let err = env.step(&[vec![0.0; 7]]).unwrap_err();
        assert!(matches!(err, StepError::Action(_)));
        let err = env.step(&[vec![0.0; 7], vec![0.0; 6]]).unwrap_err();
        assert!(matches!(err, StepError::Action(_)));
        assert_eq!(env.time(), 0);
    }

    #[test]
    fn observation_shape_is_checked() {
        let callbacks = EnvCallbacks {
            observation: Some(Box::new(|_: AgentId, w: &World| vec![0.0; 1 + w.landmarks.len()])),
            ..EnvCallbacks::default()
        };
        let mut env = env_with(EnvConfig::default(), callbacks);
        env.world_mut().landmarks.push(Landmark::new("landmark 1"));
        assert!(matches!(
            env.reset(),
            Err(StepError::ObservationShape {
                expected: 2,
                got: 3,
                ..
            })
        ));
    }

    #[test]
    fn non_finite_reward_is_reported() {
        let callbacks = EnvCallbacks {
            reward: Some(Box::new(|_: AgentId, _: &World| f32::NAN)),
            ..EnvCallbacks::default()
        };
        let mut env = env_with(EnvConfig::default(), callbacks);
        let err = env.step(&[vec![0.0; 7], vec![0.0; 7]]).unwrap_err();
        assert_eq!(
            err,
            StepError::NonFinite {
                agent: AgentId(0),
                quantity: "reward"
            }
        );
    }

    #[test]
    fn done_and_info_callbacks() {
        let callbacks = EnvCallbacks {
            done: Some(Box::new(|_: AgentId, _: &World| true)),
            info: Some(Box::new(|a: AgentId, _: &World| BenchmarkData::new().with("id", a.0 as f32))),
            ..EnvCallbacks::default()
        };
        let mut env = env_with(EnvConfig::default(), callbacks);
        assert!(env.has_info_callback());
        let result = env.step(&[vec![0.0; 7], vec![0.0; 7]]).unwrap();
        assert!(result.all_done());
        assert_eq!(result.infos[1].get("id"), Some(1.0));
    }

    #[test]
    fn reset_resets_time_and_calls_reset_callback() {
        let callbacks = EnvCallbacks {
            reset: Some(Box::new(|w: &mut World, _: &mut ChaCha8Rng| {
                w.agents[0].entity.place([0.5, 0.5]);
            })),
            observation: Some(Box::new(|a: AgentId, w: &World| {
                w.agents[a.0].entity.state.p_pos.to_vec()
            })),
            ..EnvCallbacks::default()
        };
        let mut env = env_with(EnvConfig::default(), callbacks);
        env.step(&[vec![0.0; 7], vec![0.0; 7]]).unwrap();
        let obs = env.reset().unwrap();
        assert_eq!(env.time(), 0);
        assert_eq!(obs[0], vec![0.5, 0.5]);
    }

    #[test]
    fn reset_with_seed_is_reproducible() {
        let callbacks = || EnvCallbacks {
            reset: Some(Box::new(|w: &mut World, rng: &mut ChaCha8Rng| {
                use rand::Rng;
                w.agents[0].entity.place([rng.random(), rng.random()]);
            })),
            observation: Some(Box::new(|a: AgentId, w: &World| {
                w.agents[a.0].entity.state.p_pos.to_vec()
            })),
            ..EnvCallbacks::default()
        };
        let mut a = env_with(EnvConfig::default(), callbacks());
        let mut b = env_with(EnvConfig::default(), callbacks());
        a.reset().unwrap();
        assert_eq!(a.reset_with_seed(5).unwrap(), b.reset_with_seed(5).unwrap());
    }

    #[test]
    fn scripted_agents_are_not_policy_agents() {
        fn idle(_: AgentId, w: &World) -> Action {
            Action::zeros(w.dim_c)
        }
        let mut world = World::new();
        world.agents.push(Agent::new("agent 0"));
        let mut scripted = Agent::new("agent 1");
        scripted.policy = Some(idle as mpe_world::ScriptedPolicy);
        world.agents.push(scripted);
        let env = MultiAgentEnv::new(world, EnvCallbacks::default(), EnvConfig::default()).unwrap();
        assert_eq!(env.n(), 1);
        assert_eq!(env.agents(), &[AgentId(0)]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EnvConfig {
            action_sensitivity: 0.0,
            ..EnvConfig::default()
        };
        let err = MultiAgentEnv::new(World::new(), EnvCallbacks::default(), config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSensitivity { .. }));
    }

    #[test]
    fn render_reflects_time() {
        let mut env = env_with(EnvConfig::default(), position_obs());
        env.step(&[vec![0.0; 7], vec![0.0; 7]]).unwrap();
        let frame = env.render();
        assert_eq!(frame.time, 1);
        assert_eq!(frame.entities.len(), 3);
        assert_eq!(frame.messages.len(), 2);
    }

    // ── World flags ─────────────────────────────────────────────

    fn flagged_world(discrete_action: bool, collaborative: bool) -> World {
        let mut world = World::new();
        world.dim_c = 2;
        world.discrete_action = discrete_action;
        world.collaborative = collaborative;
        for i in 0..2 {
            let mut a = Agent::new(format!("agent {i}"));
            a.entity.collide = false;
            a.reset_comm(2);
            world.agents.push(a);
        }
        world
    }

    fn velocity_obs() -> EnvCallbacks {
        EnvCallbacks {
            observation: Some(Box::new(|a: AgentId, w: &World| {
                w.agents[a.0].entity.state.p_vel.to_vec()
            })),
            reward: Some(Box::new(|a: AgentId, _: &World| a.0 as f32 + 1.0)),
            ..EnvCallbacks::default()
        }
    }

    fn assert_close(got: &[f32], want: [f32; 2]) {
        for (g, w) in got.iter().zip(want) {
            assert!((g - w).abs() < 1e-5, "got {got:?}, want {want:?}");
        }
    }

    // +x with weight 0.3, +y with weight 0.6; silent on both channels.
    const SOFT_ACTION: [f32; 7] = [0.0, 0.3, 0.0, 0.6, 0.0, 0.0, 0.0];

    #[test]
    fn discrete_world_forces_argmax_when_config_is_silent() {
        let world = flagged_world(true, false);
        let mut env = MultiAgentEnv::new(world, velocity_obs(), EnvConfig::default()).unwrap();
        let obs = env.step(&[SOFT_ACTION; 2]).unwrap().observations;
        // argmax picks +y only: u = (0, 5), v = u * dt / mass
        assert_close(&obs[0], [0.0, 0.5]);
    }

    #[test]
    fn config_overrides_discrete_world() {
        let config = EnvConfig {
            force_discrete_action: Some(false),
            ..EnvConfig::default()
        };
        let mut env = MultiAgentEnv::new(flagged_world(true, false), velocity_obs(), config).unwrap();
        let obs = env.step(&[SOFT_ACTION; 2]).unwrap().observations;
        assert_close(&obs[0], [0.15, 0.3]);
    }

    #[test]
    fn collaborative_world_shares_reward_by_default() {
        let mut env =
            MultiAgentEnv::new(flagged_world(false, true), velocity_obs(), EnvConfig::default())
                .unwrap();
        assert!(env.shared_reward());
        let result = env.step(&[vec![0.0; 7], vec![0.0; 7]]).unwrap();
        assert_eq!(result.rewards, vec![3.0, 3.0]);
    }

    #[test]
    fn config_overrides_collaborative_world() {
        let config = EnvConfig {
            shared_reward: Some(false),
            ..EnvConfig::default()
        };
        let mut env = MultiAgentEnv::new(flagged_world(false, true), velocity_obs(), config).unwrap();
        assert!(!env.shared_reward());
        let result = env.step(&[vec![0.0; 7], vec![0.0; 7]]).unwrap();
        assert_eq!(result.rewards, vec![1.0, 2.0]);
    }

    // ── Agent set changes ───────────────────────────────────────

    #[test]
    fn removing_an_agent_fails_step_without_stepping() {
        let mut env = env_with(EnvConfig::default(), position_obs());
        env.world_mut().agents.pop();
        let err = env.step(&[vec![0.0; 7], vec![0.0; 7]]).unwrap_err();
        assert_eq!(
            err,
            StepError::AgentsChanged {
                declared: vec![AgentId(0), AgentId(1)],
                found: vec![AgentId(0)],
            }
        );
        assert_eq!(env.time(), 0);
    }

    #[test]
    fn removing_an_agent_fails_reset_before_callback() {
        let callbacks = EnvCallbacks {
            reset: Some(Box::new(|w: &mut World, _: &mut ChaCha8Rng| {
                w.agents[1].entity.place([0.5, 0.5]);
            })),
            ..position_obs()
        };
        let mut env = env_with(EnvConfig::default(), callbacks);
        env.world_mut().agents.pop();
        assert!(matches!(
            env.reset(),
            Err(StepError::AgentsChanged { .. })
        ));
    }

    #[test]
    fn scripting_a_policy_agent_is_an_agent_change() {
        fn idle(_: AgentId, w: &World) -> Action {
            Action::zeros(w.dim_c)
        }
        let mut env = env_with(EnvConfig::default(), position_obs());
        env.world_mut().agents[1].policy = Some(idle as mpe_world::ScriptedPolicy);
        assert!(matches!(
            env.step(&[vec![0.0; 7], vec![0.0; 7]]),
            Err(StepError::AgentsChanged { .. })
        ));
    }

    #[test]
    fn editing_entity_state_is_allowed() {
        let mut env = env_with(EnvConfig::default(), position_obs());
        env.world_mut().agents[0].entity.place([0.25, 0.0]);
        let result = env.step(&[vec![0.0; 7], vec![0.0; 7]]).unwrap();
        assert_close(&result.observations[0], [0.25, 0.0]);
    }
}
