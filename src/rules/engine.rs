//! Rules engine trait.
//!
//! Games implement `RulesEngine` to define:
//! - What actions are legal
//! - How actions modify state
//! - When an episode is over

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::legal::LegalActions;
use crate::core::action::Action;
use crate::core::config::EngineConfig;
use crate::core::state::GameState;
use crate::error::EngineError;
use crate::tiles::Tile;

/// Why an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeEnd {
    /// Every hand slot is empty.
    HandCleared,
    /// The deck is empty and no meld is feasible.
    DeckExhausted,
    /// An illegal index was supplied under `IllegalActionPolicy::Terminate`.
    IllegalAction { index: usize },
}

/// What one executed action did.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionOutcome {
    pub action: Action,
    pub reward: f32,
    /// Tiles moved from the hand to the discard pile.
    pub removed: SmallVec<[Tile; 3]>,
    /// `(slot, tile)` pairs drawn from the deck into the hand.
    pub refilled: SmallVec<[(usize, Tile); 3]>,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: the only place legality is decided
/// - `apply_action`: must reject actions missing from `legal` and must be
///   deterministic
/// - `is_terminal`: return `None` if the episode continues
pub trait RulesEngine {
    /// Get the engine configuration.
    fn config(&self) -> &EngineConfig;

    /// Enumerate legal actions (and cache meld selections) for `state`.
    fn legal_actions(&self, state: &GameState) -> LegalActions;

    /// Apply `action` to `state`.
    ///
    /// `legal` must have been enumerated for the current hand.
    fn apply_action(
        &self,
        state: &mut GameState,
        action: Action,
        legal: &LegalActions,
    ) -> Result<ActionOutcome, EngineError>;

    /// Check if the episode is over.
    fn is_terminal(&self, state: &GameState) -> Option<EpisodeEnd>;

    // === Convenience Methods ===

    /// Legal action indices for `state`, ascending.
    fn legal_indices(&self, state: &GameState) -> Vec<usize> {
        self.legal_actions(state).indices().to_vec()
    }

    /// Decode, validate and apply an action index in one call.
    fn apply_index(&self, state: &mut GameState, index: usize) -> Result<ActionOutcome, EngineError> {
        let action = Action::from_index(index)?;
        let legal = self.legal_actions(state);
        self.apply_action(state, action, &legal)
    }
}
