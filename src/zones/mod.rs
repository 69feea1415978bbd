//! Tile zones: deck, hand and discard pile.
//!
//! Every tile is in exactly one zone once dealt. The zones themselves do not
//! enforce that; `GameState::check_conservation` does.

pub mod deck;
pub mod discard;
pub mod hand;

pub use deck::Deck;
pub use discard::DiscardPile;
pub use hand::{Hand, Slot, HAND_SIZE};
