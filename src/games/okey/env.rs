//! Reinforcement-learning facade over `OkeyGame`.
//!
//! `OkeyEnv` owns one episode at a time: the state, the shuffle RNG, the
//! cached legal set and the bookkeeping needed to answer `step` after the
//! episode has ended. Instances share nothing, so independent environments
//! can run on separate threads.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::game::OkeyGame;
use crate::core::{Action, EngineConfig, GameRng, GameRngState, GameState, IllegalActionPolicy};
use crate::error::EngineError;
use crate::nn::{EncodedState, OkeyEncoder, StateEncoder};
use crate::rules::{EpisodeEnd, LegalActions, RulesEngine};
use crate::tiles::Tile;
use crate::zones::{DiscardPile, Hand};

/// What `OkeyEnv::step` returns.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    /// Observation after the step.
    pub state: EncodedState,
    pub reward: f32,
    pub done: bool,
}

/// Serialized form of an environment, for checkpointing mid-episode.
#[derive(Serialize, Deserialize)]
struct EnvSnapshot {
    config: EngineConfig,
    state: GameState,
    rng: GameRngState,
    end: Option<EpisodeEnd>,
    steps: u32,
    episode_return: f32,
}

/// A single-player Okey environment.
#[derive(Clone, Debug)]
pub struct OkeyEnv {
    game: OkeyGame,
    encoder: OkeyEncoder,
    rng: GameRng,
    state: GameState,
    legal: Option<LegalActions>,
    end: Option<EpisodeEnd>,
    steps: u32,
    episode_return: f32,
}

impl Default for OkeyEnv {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl OkeyEnv {
    /// Create an environment and deal its first episode.
    pub fn new(config: EngineConfig) -> Self {
        let mut rng = GameRng::new(config.resolve_seed());
        let game = OkeyGame::new(config);
        let state = game.deal(&mut rng);
        debug!("created env with seed {}", rng.seed());

        Self {
            game,
            encoder: OkeyEncoder::new(),
            rng,
            state,
            legal: None,
            end: None,
            steps: 0,
            episode_return: 0.0,
        }
    }

    /// Start a new episode with a freshly shuffled deck.
    pub fn reset(&mut self) -> EncodedState {
        let state = self.game.deal(&mut self.rng);
        self.start(state)
    }

    /// Start a new episode from a fixed draw order.
    pub fn reset_with_deck(&mut self, order: Vec<Tile>) -> Result<EncodedState, EngineError> {
        let state = self.game.deal_stacked(order)?;
        Ok(self.start(state))
    }

    fn start(&mut self, state: GameState) -> EncodedState {
        self.state = state;
        self.legal = None;
        self.end = None;
        self.steps = 0;
        self.episode_return = 0.0;
        debug!(
            "episode start: hand {:?}, deck {}",
            self.state.hand.occupied().map(|(_, t)| t.to_string()).collect::<Vec<_>>(),
            self.state.deck.len()
        );
        self.observe()
    }

    /// Legal action indices for the current state, ascending.
    ///
    /// Empty once the episode has ended. The enumerated set is cached for
    /// the next `step`.
    pub fn get_valid_actions(&mut self) -> Vec<usize> {
        if self.end.is_some() {
            return Vec::new();
        }
        self.current_legal().indices().to_vec()
    }

    fn current_legal(&mut self) -> &LegalActions {
        if !matches!(&self.legal, Some(legal) if legal.is_current_for(&self.state)) {
            self.legal = None;
        }
        let (game, state) = (&self.game, &self.state);
        self.legal.get_or_insert_with(|| game.legal_actions(state))
    }

    /// Apply action `index` and advance the episode.
    ///
    /// Illegal indices follow the configured `IllegalActionPolicy`. Under
    /// `Terminate`, stepping a finished episode returns the final observation
    /// with reward 0 and `done = true`; under `Reject` it is an error.
    pub fn step(&mut self, index: usize) -> Result<StepResult, EngineError> {
        let policy = self.game.config().illegal_action;
        if self.end.is_some() {
            return match policy {
                IllegalActionPolicy::Terminate => Ok(self.terminal_result()),
                IllegalActionPolicy::Reject => Err(EngineError::EpisodeFinished),
            };
        }

        let action = match Action::from_index(index) {
            Ok(action) if self.current_legal().contains(index) => action,
            Ok(_) => return self.illegal(index, EngineError::IllegalAction { index }),
            Err(err) => return self.illegal(index, err),
        };

        let legal = match self.legal.take() {
            Some(legal) => legal,
            None => self.game.legal_actions(&self.state),
        };
        let outcome = self.game.apply_action(&mut self.state, action, &legal)?;

        self.steps += 1;
        self.episode_return += outcome.reward;
        self.end = self.game.is_terminal(&self.state);
        trace!(
            "step {}: {} reward {} deck {}",
            self.steps,
            action,
            outcome.reward,
            self.state.deck.len()
        );
        if let Some(end) = self.end {
            debug!(
                "episode end: {:?} after {} steps, return {}",
                end, self.steps, self.episode_return
            );
        }

        Ok(StepResult {
            state: self.observe(),
            reward: outcome.reward,
            done: self.end.is_some(),
        })
    }

    fn illegal(&mut self, index: usize, err: EngineError) -> Result<StepResult, EngineError> {
        match self.game.config().illegal_action {
            IllegalActionPolicy::Reject => Err(err),
            IllegalActionPolicy::Terminate => {
                warn!("illegal action {}: {}; ending episode", index, err);
                self.end = Some(EpisodeEnd::IllegalAction { index });
                Ok(self.terminal_result())
            }
        }
    }

    fn terminal_result(&self) -> StepResult {
        StepResult {
            state: self.observe(),
            reward: 0.0,
            done: true,
        }
    }

    /// Encode the current state.
    #[must_use]
    pub fn observe(&self) -> EncodedState {
        self.encoder.encode(&self.state)
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.state.hand
    }

    #[must_use]
    pub fn discard(&self) -> &DiscardPile {
        &self.state.discard
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.state.deck.len()
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.end.is_some()
    }

    /// Why the episode ended, if it has.
    #[must_use]
    pub fn end_reason(&self) -> Option<EpisodeEnd> {
        self.end
    }

    /// Actions applied this episode.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Sum of rewards this episode.
    #[must_use]
    pub fn episode_return(&self) -> f32 {
        self.episode_return
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.game.config()
    }

    #[must_use]
    pub fn encoder(&self) -> &OkeyEncoder {
        &self.encoder
    }

    // === Snapshots ===

    /// Serialize the full environment, including the RNG position, so that
    /// a restored copy continues identically.
    pub fn snapshot(&self) -> Result<Vec<u8>, EngineError> {
        let snapshot = EnvSnapshot {
            config: self.game.config().clone(),
            state: self.state.clone(),
            rng: self.rng.state(),
            end: self.end,
            steps: self.steps,
            episode_return: self.episode_return,
        };
        Ok(bincode::serialize(&snapshot)?)
    }

    /// Rebuild an environment from `snapshot` bytes.
    pub fn restore(bytes: &[u8]) -> Result<Self, EngineError> {
        let snapshot: EnvSnapshot = bincode::deserialize(bytes)?;
        snapshot.state.check_conservation()?;

        Ok(Self {
            game: OkeyGame::new(snapshot.config),
            encoder: OkeyEncoder::new(),
            rng: GameRng::from_state(&snapshot.rng),
            state: snapshot.state,
            legal: None,
            end: snapshot.end,
            steps: snapshot.steps,
            episode_return: snapshot.episode_return,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_envs_agree() {
        let mut a = OkeyEnv::new(EngineConfig::default().with_seed(11));
        let mut b = OkeyEnv::new(EngineConfig::default().with_seed(11));
        assert_eq!(a.observe(), b.observe());
        assert_eq!(a.reset(), b.reset());
    }

    #[test]
    fn test_reset_clears_bookkeeping() {
        let mut env = OkeyEnv::new(EngineConfig::default().with_seed(1));
        let index = env.get_valid_actions()[0];
        env.step(index).unwrap();
        assert_eq!(env.steps(), 1);

        let obs = env.reset();
        assert_eq!(obs.len(), 72);
        assert_eq!(env.steps(), 0);
        assert_eq!(env.episode_return(), 0.0);
        assert!(!env.is_done());
        assert_eq!(env.deck_len(), 19);
    }

    #[test]
    fn test_step_without_get_valid_actions() {
        let mut env = OkeyEnv::new(EngineConfig::default().with_seed(5));
        let tile = env.hand().tile_at(4).unwrap();
        let result = env.step(Action::Discard(tile).to_index()).unwrap();

        assert_eq!(result.reward, 0.0);
        assert_eq!(env.discard().last(), Some(tile));
    }

    #[test]
    fn test_cache_refreshes_after_step() {
        let mut env = OkeyEnv::new(EngineConfig::default().with_seed(9));
        let first = env.get_valid_actions();
        env.step(*first.last().unwrap()).unwrap();

        let second = env.get_valid_actions();
        let direct = LegalActions::enumerate(env.state());
        assert_eq!(second, direct.indices());
    }

    #[test]
    fn test_valid_actions_empty_when_done() {
        let mut env = OkeyEnv::new(EngineConfig::default().with_seed(2));
        env.step(44).unwrap();
        assert!(env.is_done());
        assert!(env.get_valid_actions().is_empty());
    }

    #[test]
    fn test_snapshot_restore_continues_identically() {
        let mut env = OkeyEnv::new(EngineConfig::default().with_seed(21));
        let index = env.get_valid_actions()[0];
        env.step(index).unwrap();

        let bytes = env.snapshot().unwrap();
        let mut copy = OkeyEnv::restore(&bytes).unwrap();
        assert_eq!(copy.state(), env.state());
        assert_eq!(copy.steps(), env.steps());

        assert_eq!(copy.reset(), env.reset());
    }

    #[test]
    fn test_restore_rejects_garbage() {
        let err = OkeyEnv::restore(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, EngineError::Snapshot(_)));
    }
}
