//! Core engine types: state, actions and the action codec, RNG, configuration.

pub mod action;
pub mod config;
pub mod rng;
pub mod state;

pub use action::{
    Action, ACTION_SPACE_SIZE, DISCARD_OFFSET, MIXED_RUN_OFFSET, TRIPLET_OFFSET,
    UNIFORM_RUN_OFFSET,
};
pub use config::{EngineConfig, IllegalActionPolicy};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, TileLocation};
