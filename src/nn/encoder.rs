//! State encoding for neural network input.
//!
//! Transforms game state into tensor representations suitable for neural networks.

use crate::core::action::ACTION_SPACE_SIZE;
use crate::core::GameState;
use crate::nn::traits::EncodedState;
use crate::tiles::{Color, Rank, Tile};

/// Plane set for tiles still in the deck.
pub const PLANE_DECK: usize = 0;
/// Plane set for tiles in the hand.
pub const PLANE_HAND: usize = 1;
/// Plane set for discarded tiles.
pub const PLANE_DISCARD: usize = 2;
pub const PLANE_COUNT: usize = 3;

/// Length of an Okey observation.
pub const ENCODED_LEN: usize = Tile::COUNT * PLANE_COUNT;

/// Encodes game state into tensors for neural network input.
pub trait StateEncoder: Send + Sync {
    /// Encode the game state.
    fn encode(&self, state: &GameState) -> EncodedState;

    /// Get the shape of encoded states.
    fn output_shape(&self) -> Vec<usize>;

    /// Get the total number of possible actions.
    ///
    /// This defines the size of the policy output vector.
    fn action_space_size(&self) -> usize;
}

/// One-hot zone encoder.
///
/// Every tile owns three consecutive entries, one per zone, at
/// `color * 24 + (rank - 1) * 3 + plane`. Exactly one of the three is 1.0.
/// Hand slot positions are not encoded.
#[derive(Clone, Copy, Debug, Default)]
pub struct OkeyEncoder;

impl OkeyEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Flat index of `tile` in plane `plane`.
    #[must_use]
    pub fn flat_index(tile: Tile, plane: usize) -> usize {
        tile.color.index() * Rank::COUNT * PLANE_COUNT + tile.rank.index() * PLANE_COUNT + plane
    }

    /// The plane set for `tile` in an encoded observation.
    #[must_use]
    pub fn plane_of(encoded: &EncodedState, tile: Tile) -> Option<usize> {
        (0..PLANE_COUNT).find(|&plane| encoded.get(Self::flat_index(tile, plane)) == Some(1.0))
    }
}

impl StateEncoder for OkeyEncoder {
    fn encode(&self, state: &GameState) -> EncodedState {
        let mut encoded = EncodedState::zeros(self.output_shape());

        for tile in state.deck.iter() {
            encoded.set(Self::flat_index(tile, PLANE_DECK), 1.0);
        }
        for (_, tile) in state.hand.occupied() {
            encoded.set(Self::flat_index(tile, PLANE_HAND), 1.0);
        }
        for tile in state.discard.iter() {
            encoded.set(Self::flat_index(tile, PLANE_DISCARD), 1.0);
        }

        encoded
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![Color::COUNT, Rank::COUNT, PLANE_COUNT]
    }

    fn action_space_size(&self) -> usize {
        ACTION_SPACE_SIZE
    }
}
