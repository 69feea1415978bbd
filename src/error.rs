//! Engine error type.
//!
//! The engine has exactly one policy-level failure (an illegal action) and a
//! handful of contract violations that can only be reached by driving the
//! lower layers directly. `OkeyEnv` decides per `IllegalActionPolicy` whether
//! an illegal action surfaces as an error or ends the episode.

use thiserror::Error;

use crate::core::action::ACTION_SPACE_SIZE;

/// Errors produced by the rule engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("action index {index} is outside the action space 0..{}", ACTION_SPACE_SIZE)]
    IndexOutOfRange { index: usize },

    #[error("action index {index} is not legal in the current state")]
    IllegalAction { index: usize },

    #[error("legal actions were enumerated for a different hand")]
    StaleLegalActions,

    #[error("episode has already finished; call reset()")]
    EpisodeFinished,

    #[error("hand slot {slot} does not exist")]
    SlotOutOfRange { slot: usize },

    #[error("hand slot {slot} is already occupied")]
    SlotOccupied { slot: usize },

    #[error("hand slot {slot} is empty")]
    SlotEmpty { slot: usize },

    #[error("cannot parse tile from {0:?}; expected e.g. \"r,1\"")]
    ParseTile(String),

    #[error("deck order must hold each of the 24 tiles exactly once")]
    InvalidDeck,

    #[error("tile conservation violated: {0}")]
    Conservation(String),

    #[error("snapshot (de)serialization failed: {0}")]
    Snapshot(String),
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Snapshot(err.to_string())
    }
}
