//! Single-player Okey.
//!
//! A 24-tile game (three colors, ranks 1 to 8) played from a five-slot hand:
//! - Each step either melds three tiles (a triplet or a run) or discards one
//! - Melds score by kind and rank; discards score nothing
//! - Emptied slots are refilled from the deck
//! - The episode ends when the hand is empty, or the deck is empty and no
//!   meld remains

mod env;
mod game;

pub use env::{OkeyEnv, StepResult};
pub use game::{OkeyGame, OkeyGameBuilder, MELD_REFILL};
