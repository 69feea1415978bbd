//! Tile model: three colors, ranks 1-8, one tile per (color, rank).
//!
//! The universe is exactly 24 distinct tiles. There are no duplicates and no
//! jokers, so a tile identifies its own location in the game.

mod tile;

pub use tile::{Color, Rank, Tile};
