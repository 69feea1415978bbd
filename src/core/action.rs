//! Action representation and the integer action-index codec.
//!
//! Internally an action is a tagged variant. The dense integer index exists
//! only at the boundary with the external agent and is a published contract:
//!
//! | Index  | Action                                   |
//! |--------|------------------------------------------|
//! | 0..8   | `Triplet(rank)`, rank 1..=8              |
//! | 8..14  | `Run { base, color_uniform: true }`, base 1..=6  |
//! | 14..20 | `Run { base, color_uniform: false }`, base 1..=6 |
//! | 20..44 | `Discard(tile)`, `20 + color * 8 + rank - 1`     |
//!
//! Never renumber these ranges: an agent trained on one layout is invalid
//! against any other.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::melds::{MeldKind, MeldPattern, MAX_RUN_BASE};
use crate::tiles::{Rank, Tile};

/// First triplet index.
pub const TRIPLET_OFFSET: usize = 0;
/// First same-color run index.
pub const UNIFORM_RUN_OFFSET: usize = TRIPLET_OFFSET + Rank::COUNT;
/// First mixed-color run index.
pub const MIXED_RUN_OFFSET: usize = UNIFORM_RUN_OFFSET + MAX_RUN_BASE as usize;
/// First discard index.
pub const DISCARD_OFFSET: usize = MIXED_RUN_OFFSET + MAX_RUN_BASE as usize;
/// Total number of action indices (44).
pub const ACTION_SPACE_SIZE: usize = DISCARD_OFFSET + Tile::COUNT;

/// A semantic move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play three tiles of `rank`.
    Triplet(Rank),
    /// Play `base, base+1, base+2`. `base` must be at most 6.
    Run { base: Rank, color_uniform: bool },
    /// Discard this specific tile from the hand.
    Discard(Tile),
}

impl Action {
    /// Encode as an action index in `0..44`.
    ///
    /// # Panics
    /// Panics if this is a `Run` with `base > 6`. Every action produced by
    /// the engine or by [`Action::from_index`] is in range.
    #[must_use]
    pub fn to_index(self) -> usize {
        match self {
            Action::Triplet(rank) => TRIPLET_OFFSET + rank.index(),
            Action::Run { base, color_uniform } => {
                assert!(base.get() <= MAX_RUN_BASE, "run base out of range: {}", base);
                let offset = if color_uniform {
                    UNIFORM_RUN_OFFSET
                } else {
                    MIXED_RUN_OFFSET
                };
                offset + base.index()
            }
            Action::Discard(tile) => DISCARD_OFFSET + tile.index(),
        }
    }

    /// Decode an action index. Only range-checks: legality depends on state.
    pub fn from_index(index: usize) -> Result<Self, EngineError> {
        let out_of_range = || EngineError::IndexOutOfRange { index };
        let rank = |i: usize| Rank::new(i as u8 + Rank::MIN).ok_or_else(out_of_range);

        match index {
            i if i < UNIFORM_RUN_OFFSET => Ok(Action::Triplet(rank(i - TRIPLET_OFFSET)?)),
            i if i < MIXED_RUN_OFFSET => Ok(Action::Run {
                base: rank(i - UNIFORM_RUN_OFFSET)?,
                color_uniform: true,
            }),
            i if i < DISCARD_OFFSET => Ok(Action::Run {
                base: rank(i - MIXED_RUN_OFFSET)?,
                color_uniform: false,
            }),
            i if i < ACTION_SPACE_SIZE => {
                Tile::from_index(i - DISCARD_OFFSET)
                    .map(Action::Discard)
                    .ok_or_else(out_of_range)
            }
            _ => Err(out_of_range()),
        }
    }

    /// Action index for a matched meld: triplets by rank, runs split by the
    /// color-uniform flag.
    #[must_use]
    pub fn for_meld(pattern: MeldPattern, color_uniform: bool) -> Self {
        match pattern.kind() {
            MeldKind::Triplet => Action::Triplet(pattern.base()),
            MeldKind::Run => Action::Run {
                base: pattern.base(),
                color_uniform,
            },
        }
    }

    /// The meld pattern this action plays, if any.
    #[must_use]
    pub fn pattern(self) -> Option<MeldPattern> {
        match self {
            Action::Triplet(rank) => Some(MeldPattern::triplet(rank)),
            Action::Run { base, .. } => MeldPattern::run(base),
            Action::Discard(_) => None,
        }
    }

    #[must_use]
    pub fn is_meld(self) -> bool {
        !matches!(self, Action::Discard(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Triplet(rank) => write!(f, "triplet {rank}-{rank}-{rank}"),
            Action::Run { base, color_uniform } => {
                let tier = if *color_uniform { "same-color" } else { "mixed" };
                write!(f, "{tier} run from {base}")
            }
            Action::Discard(tile) => write!(f, "discard {tile}"),
        }
    }
}
