//! Append-only discard pile.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::tiles::Tile;

/// Tiles removed from the hand, by discard or by meld. Never re-enters play.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardPile {
    tiles: Vector<Tile>,
}

impl DiscardPile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tile: Tile) {
        self.tiles.push_back(tile);
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

    /// Most recently discarded tile.
    #[must_use]
    pub fn last(&self) -> Option<Tile> {
        self.tiles.back().copied()
    }

    /// Tiles in discard order.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let a = Tile::from_parts(0, 1).unwrap();
        let b = Tile::from_parts(2, 8).unwrap();

        let mut pile = DiscardPile::new();
        assert!(pile.is_empty());

        pile.push(a);
        pile.push(b);

        assert_eq!(pile.len(), 2);
        assert_eq!(pile.last(), Some(b));
        assert!(pile.contains(a));
        assert_eq!(pile.iter().collect::<Vec<_>>(), vec![a, b]);
    }
}
