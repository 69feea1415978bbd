//! Episode rollout loop.
//!
//! Drives an `OkeyEnv` with an `Agent` and records the transitions. The
//! runner never learns; it only produces data for an external trainer.

use log::debug;

use crate::core::action::ACTION_SPACE_SIZE;
use crate::core::GameRng;
use crate::error::EngineError;
use crate::games::okey::OkeyEnv;
use crate::nn::{masked_argmax, EncodedState, PolicyNetwork};
use crate::rules::index_reward;

use super::trajectory::{ExperienceBuffer, Trajectory, Transition};

/// Chooses an action index from an observation and the legal set.
pub trait Agent {
    /// Pick one of `legal`, or `None` to stop the episode early.
    fn select_action(&mut self, state: &EncodedState, legal: &[usize]) -> Option<usize>;
}

/// Uniformly random legal actions.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, _state: &EncodedState, legal: &[usize]) -> Option<usize> {
        self.rng.choose(legal).copied()
    }
}

/// Always takes the legal action with the highest immediate reward.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyAgent;

impl Agent for GreedyAgent {
    fn select_action(&mut self, _state: &EncodedState, legal: &[usize]) -> Option<usize> {
        let scores: Vec<f32> = (0..ACTION_SPACE_SIZE)
            .map(|index| index_reward(index).unwrap_or(f32::MIN))
            .collect();
        masked_argmax(&scores, legal)
    }
}

/// Picks the highest-scoring legal action under a network.
#[derive(Clone, Debug)]
pub struct PolicyAgent<P: PolicyNetwork> {
    network: P,
}

impl<P: PolicyNetwork> PolicyAgent<P> {
    pub fn new(network: P) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &P {
        &self.network
    }
}

impl<P: PolicyNetwork> Agent for PolicyAgent<P> {
    fn select_action(&mut self, state: &EncodedState, legal: &[usize]) -> Option<usize> {
        let scores = self.network.predict(state);
        masked_argmax(&scores, legal)
    }
}

/// Configuration for episode rollouts.
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Steps after which an episode is cut off even if not terminal.
    pub max_steps_per_episode: usize,

    /// Seed for agents the runner builds itself.
    pub seed: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_steps_per_episode: 25,
            seed: 0,
        }
    }
}

impl RunnerConfig {
    /// Create a new runner config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum steps per episode.
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps_per_episode = max;
        self
    }

    /// Set the agent seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Runs episodes and collects trajectories.
pub struct EpisodeRunner<A: Agent> {
    agent: A,
    config: RunnerConfig,
    episodes: usize,
}

impl EpisodeRunner<RandomAgent> {
    /// A runner with a `RandomAgent` seeded from `config`.
    pub fn random(config: RunnerConfig) -> Self {
        let agent = RandomAgent::new(config.seed);
        Self::new(agent, config)
    }
}

impl<A: Agent> EpisodeRunner<A> {
    pub fn new(agent: A, config: RunnerConfig) -> Self {
        Self {
            agent,
            config,
            episodes: 0,
        }
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Episodes run so far.
    pub fn episodes(&self) -> usize {
        self.episodes
    }

    /// Reset `env` and play one episode.
    pub fn run_episode(&mut self, env: &mut OkeyEnv) -> Result<Trajectory, EngineError> {
        let mut trajectory = Trajectory::new(self.episodes);
        self.episodes += 1;
        let mut state = env.reset();

        for _ in 0..self.config.max_steps_per_episode {
            let legal = env.get_valid_actions();
            let Some(action) = self.agent.select_action(&state, &legal) else {
                break;
            };
            let result = env.step(action)?;
            trajectory.push(Transition {
                state,
                action,
                reward: result.reward,
                next_state: result.state.clone(),
                done: result.done,
            });
            state = result.state;
            if result.done {
                break;
            }
        }

        trajectory.end = env.end_reason();
        debug!(
            "episode {}: {} steps, reward {}, end {:?}",
            trajectory.episode,
            trajectory.len(),
            trajectory.total_reward(),
            trajectory.end
        );
        Ok(trajectory)
    }

    /// Play `count` episodes into `buffer`. Returns each episode's reward.
    pub fn fill_buffer(
        &mut self,
        env: &mut OkeyEnv,
        buffer: &mut ExperienceBuffer,
        count: usize,
    ) -> Result<Vec<f32>, EngineError> {
        let mut rewards = Vec::with_capacity(count);
        for _ in 0..count {
            let trajectory = self.run_episode(env)?;
            rewards.push(trajectory.total_reward());
            buffer.extend(trajectory);
        }
        Ok(rewards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;
    use crate::nn::UniformPolicy;

    #[test]
    fn test_runner_config_builder() {
        let config = RunnerConfig::new().with_max_steps(10).with_seed(3);
        assert_eq!(config.max_steps_per_episode, 10);
        assert_eq!(config.seed, 3);
        assert_eq!(RunnerConfig::default().max_steps_per_episode, 25);
    }

    #[test]
    fn test_random_episode_terminates() {
        let mut env = OkeyEnv::new(EngineConfig::default().with_seed(4));
        let mut runner = EpisodeRunner::random(RunnerConfig::default());
        let trajectory = runner.run_episode(&mut env).unwrap();

        assert!(trajectory.is_complete());
        assert!(trajectory.transitions.last().is_some_and(|t| t.done));
        assert!(trajectory.transitions.iter().rev().skip(1).all(|t| !t.done));
        assert_eq!(trajectory.total_reward(), env.episode_return());
    }

    #[test]
    fn test_step_cap() {
        let mut env = OkeyEnv::new(EngineConfig::default().with_seed(4));
        let mut runner = EpisodeRunner::random(RunnerConfig::default().with_max_steps(2));
        let trajectory = runner.run_episode(&mut env).unwrap();

        assert!(trajectory.len() <= 2);
    }

    #[test]
    fn test_transitions_chain() {
        let mut env = OkeyEnv::new(EngineConfig::default().with_seed(8));
        let mut runner = EpisodeRunner::new(GreedyAgent, RunnerConfig::default());
        let trajectory = runner.run_episode(&mut env).unwrap();

        for pair in trajectory.transitions.windows(2) {
            assert_eq!(pair[0].next_state, pair[1].state);
        }
    }

    #[test]
    fn test_greedy_prefers_best_meld() {
        let mut agent = GreedyAgent;
        let state = EncodedState::zeros(vec![72]);
        // triplet of 2s (30), uniform run from 1 (50), a discard (0)
        assert_eq!(agent.select_action(&state, &[1, 8, 25]), Some(8));
        assert_eq!(agent.select_action(&state, &[25, 30]), Some(25));
        assert_eq!(agent.select_action(&state, &[]), None);
    }

    #[test]
    fn test_policy_agent_only_picks_legal() {
        let mut agent = PolicyAgent::new(UniformPolicy::new(44));
        let state = EncodedState::zeros(vec![72]);
        assert_eq!(agent.select_action(&state, &[22, 30]), Some(22));
    }

    #[test]
    fn test_fill_buffer() {
        let mut env = OkeyEnv::new(EngineConfig::default().with_seed(12));
        let mut runner = EpisodeRunner::random(RunnerConfig::default().with_seed(1));
        let mut buffer = ExperienceBuffer::new(1000);

        let rewards = runner.fill_buffer(&mut env, &mut buffer, 5).unwrap();
        assert_eq!(rewards.len(), 5);
        assert_eq!(runner.episodes(), 5);
        assert!(buffer.len() >= 5);
    }
}
