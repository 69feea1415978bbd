//! Draw pile.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::rng::GameRng;
use crate::error::EngineError;
use crate::tiles::Tile;

/// Tiles not yet dealt, in draw order.
///
/// The deck only shrinks. The top of the deck is the back of the vector so
/// a draw is an O(1) pop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    tiles: Vector<Tile>,
}

impl Deck {
    /// A uniformly shuffled copy of the full universe.
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut tiles: Vec<Tile> = Tile::universe().collect();
        rng.shuffle(&mut tiles);
        Self::from_draw_order(tiles)
    }

    /// Build a deck that will yield `order[0]` first, then `order[1]`, ...
    ///
    /// Fails unless `order` is a permutation of the 24-tile universe.
    pub fn stacked(order: Vec<Tile>) -> Result<Self, EngineError> {
        if order.len() != Tile::COUNT {
            return Err(EngineError::InvalidDeck);
        }
        let mut seen = [false; Tile::COUNT];
        for tile in &order {
            if std::mem::replace(&mut seen[tile.index()], true) {
                return Err(EngineError::InvalidDeck);
            }
        }
        Ok(Self::from_draw_order(order))
    }

    fn from_draw_order(order: Vec<Tile>) -> Self {
        Self {
            tiles: order.into_iter().rev().collect(),
        }
    }

    /// Pop the next tile.
    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop_back()
    }

    /// The tile the next `draw` will return.
    #[must_use]
    pub fn peek(&self) -> Option<Tile> {
        self.tiles.back().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles.iter().any(|&t| t == tile)
    }

    /// Remaining tiles in draw order (next draw first).
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().rev().copied()
    }
}
