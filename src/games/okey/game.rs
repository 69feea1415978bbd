//! Okey rules: step execution, refill and termination.

use log::trace;
use smallvec::SmallVec;

use crate::core::{Action, EngineConfig, GameRng, GameState, IllegalActionPolicy};
use crate::error::EngineError;
use crate::melds::{apply_removal, has_meld};
use crate::rules::{action_reward, ActionOutcome, EpisodeEnd, LegalActions, RulesEngine};
use crate::tiles::Tile;
use crate::zones::{Deck, HAND_SIZE};

/// Most tiles drawn after a meld.
pub const MELD_REFILL: usize = 3;

/// The single-player Okey rule set.
#[derive(Clone, Debug, Default)]
pub struct OkeyGame {
    config: EngineConfig,
}

/// Builder for creating an `OkeyGame` and its first state.
#[derive(Clone, Debug, Default)]
pub struct OkeyGameBuilder {
    config: EngineConfig,
    stacked: Option<Vec<Tile>>,
}

impl OkeyGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn illegal_action(mut self, policy: IllegalActionPolicy) -> Self {
        self.config.illegal_action = policy;
        self
    }

    /// Deal from a fixed draw order instead of shuffling.
    pub fn stacked_deck(mut self, order: Vec<Tile>) -> Self {
        self.stacked = Some(order);
        self
    }

    /// Build the game and initial state.
    ///
    /// Fails only if a stacked deck is not a permutation of the universe.
    pub fn build(self) -> Result<(OkeyGame, GameState), EngineError> {
        let game = OkeyGame::new(self.config);
        let state = match self.stacked {
            Some(order) => game.deal_stacked(order)?,
            None => {
                let mut rng = GameRng::new(game.config.resolve_seed());
                game.deal(&mut rng)
            }
        };
        Ok((game, state))
    }
}

impl OkeyGame {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Shuffle a fresh deck with `rng` and deal the opening hand.
    pub fn deal(&self, rng: &mut GameRng) -> GameState {
        GameState::deal(Deck::shuffled(rng))
    }

    /// Deal from a caller-supplied draw order.
    pub fn deal_stacked(&self, order: Vec<Tile>) -> Result<GameState, EngineError> {
        Deck::stacked(order).map(GameState::deal)
    }

    /// Remove the discarded tile and refill its slot if the deck allows.
    fn execute_discard(
        state: &mut GameState,
        tile: Tile,
        outcome: &mut ActionOutcome,
    ) -> Result<(), EngineError> {
        let slot = state
            .hand
            .position(tile)
            .ok_or(EngineError::StaleLegalActions)?;
        let removed = state.hand.take(slot)?;
        state.discard.push(removed);
        outcome.removed.push(removed);

        if let Some(drawn) = state.deck.draw() {
            state.hand.place(slot, drawn)?;
            outcome.refilled.push((slot, drawn));
        }
        Ok(())
    }

    /// Remove the cached meld selection and refill up to three empty slots,
    /// lowest slot first.
    fn execute_meld(
        state: &mut GameState,
        index: usize,
        legal: &LegalActions,
        outcome: &mut ActionOutcome,
    ) -> Result<(), EngineError> {
        let selected = legal
            .meld(index)
            .ok_or(EngineError::IllegalAction { index })?;
        let removed = apply_removal(&mut state.hand, selected)?;
        for &tile in &removed {
            state.discard.push(tile);
        }
        outcome.removed = removed;

        let draws = MELD_REFILL.min(state.deck.len());
        let targets: SmallVec<[usize; HAND_SIZE]> =
            state.hand.empty_slots().take(draws).collect();
        for slot in targets {
            if let Some(drawn) = state.deck.draw() {
                state.hand.place(slot, drawn)?;
                outcome.refilled.push((slot, drawn));
            }
        }
        Ok(())
    }
}

impl RulesEngine for OkeyGame {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState) -> LegalActions {
        LegalActions::enumerate(state)
    }

    fn apply_action(
        &self,
        state: &mut GameState,
        action: Action,
        legal: &LegalActions,
    ) -> Result<ActionOutcome, EngineError> {
        if !legal.is_current_for(state) {
            return Err(EngineError::StaleLegalActions);
        }
        let index = action.to_index();
        if !legal.contains(index) {
            return Err(EngineError::IllegalAction { index });
        }

        let mut outcome = ActionOutcome {
            action,
            reward: action_reward(action),
            removed: SmallVec::new(),
            refilled: SmallVec::new(),
        };
        match action {
            Action::Discard(tile) => Self::execute_discard(state, tile, &mut outcome)?,
            Action::Triplet(_) | Action::Run { .. } => {
                Self::execute_meld(state, index, legal, &mut outcome)?
            }
        }

        trace!(
            "applied {} (index {}): removed {:?}, refilled {:?}",
            action,
            index,
            outcome.removed,
            outcome.refilled
        );
        Ok(outcome)
    }

    fn is_terminal(&self, state: &GameState) -> Option<EpisodeEnd> {
        if state.hand.is_cleared() {
            Some(EpisodeEnd::HandCleared)
        } else if state.deck.is_empty() && !has_meld(&state.hand) {
            Some(EpisodeEnd::DeckExhausted)
        } else {
            None
        }
    }
}
