//! Game state: deck, hand and discard pile for one episode.
//!
//! A `GameState` is created fresh by every reset and mutated only by the
//! step executor. Deck and discard use `im` vectors so cloning a state for
//! lookahead is O(1).

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::tiles::Tile;
use crate::zones::{Deck, DiscardPile, Hand, Slot, HAND_SIZE};

/// Where a tile currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileLocation {
    Deck,
    Hand(usize),
    Discard,
}

/// Complete single-player game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub deck: Deck,
    pub hand: Hand,
    pub discard: DiscardPile,
}

impl GameState {
    /// Deal the first [`HAND_SIZE`] tiles of `deck` into slots 0..5 in draw
    /// order. The rest stay in the deck and the discard starts empty.
    #[must_use]
    pub fn deal(mut deck: Deck) -> Self {
        let slots: [Slot; HAND_SIZE] =
            std::array::from_fn(|_| deck.draw().map_or(Slot::Empty, Slot::Occupied));
        Self {
            deck,
            hand: Hand::from_slots(slots),
            discard: DiscardPile::new(),
        }
    }

    /// Locate a tile. `None` only if conservation has been broken.
    #[must_use]
    pub fn location(&self, tile: Tile) -> Option<TileLocation> {
        if let Some(slot) = self.hand.position(tile) {
            Some(TileLocation::Hand(slot))
        } else if self.deck.contains(tile) {
            Some(TileLocation::Deck)
        } else if self.discard.contains(tile) {
            Some(TileLocation::Discard)
        } else {
            None
        }
    }

    /// Number of tiles across all three zones.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.deck.len() + self.hand.occupied_count() + self.discard.len()
    }

    /// Verify that deck, hand and discard partition the 24-tile universe.
    pub fn check_conservation(&self) -> Result<(), EngineError> {
        let mut seen = [false; Tile::COUNT];
        let zones = self
            .deck
            .iter()
            .chain(self.hand.occupied().map(|(_, t)| t))
            .chain(self.discard.iter());

        for tile in zones {
            if std::mem::replace(&mut seen[tile.index()], true) {
                return Err(EngineError::Conservation(format!("{tile} appears twice")));
            }
        }
        if let Some(missing) = seen.iter().position(|&s| !s) {
            let tile = Tile::from_index(missing)
                .map(|t| t.to_string())
                .unwrap_or_default();
            return Err(EngineError::Conservation(format!("{tile} is missing")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::GameRng;

    fn stacked() -> GameState {
        GameState::deal(Deck::stacked(Tile::universe().collect()).unwrap())
    }

    #[test]
    fn test_deal_fills_slots_in_draw_order() {
        let state = stacked();

        for slot in 0..HAND_SIZE {
            assert_eq!(state.hand.tile_at(slot), Tile::from_index(slot));
        }
        assert_eq!(state.deck.len(), 19);
        assert_eq!(state.deck.peek(), Tile::from_index(5));
        assert!(state.discard.is_empty());
        assert!(state.check_conservation().is_ok());
    }

    #[test]
    fn test_shuffled_deal_conserves() {
        for seed in 0..20 {
            let state = GameState::deal(Deck::shuffled(&mut GameRng::new(seed)));
            assert_eq!(state.tile_count(), 24);
            assert!(state.check_conservation().is_ok());
        }
    }

    #[test]
    fn test_location() {
        let mut state = stacked();
        let first = Tile::from_index(0).unwrap();
        let last = Tile::from_index(23).unwrap();

        assert_eq!(state.location(first), Some(TileLocation::Hand(0)));
        assert_eq!(state.location(last), Some(TileLocation::Deck));

        let tile = state.hand.take(0).unwrap();
        state.discard.push(tile);
        assert_eq!(state.location(first), Some(TileLocation::Discard));
    }

    #[test]
    fn test_conservation_detects_loss() {
        let mut state = stacked();
        state.hand.take(3).unwrap();

        let err = state.check_conservation().unwrap_err();
        assert!(matches!(err, EngineError::Conservation(msg) if msg.contains("missing")));
    }

    #[test]
    fn test_conservation_detects_duplicate() {
        let mut state = stacked();
        let dup = state.hand.tile_at(0).unwrap();
        state.discard.push(dup);

        let err = state.check_conservation().unwrap_err();
        assert!(matches!(err, EngineError::Conservation(msg) if msg.contains("twice")));
    }

    #[test]
    fn test_state_serde() {
        let state = stacked();
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
