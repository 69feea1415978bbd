//! The 14 fixed meld patterns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tiles::Rank;

/// Highest base rank a run can start from (6-7-8).
pub const MAX_RUN_BASE: u8 = Rank::MAX - 2;

/// 8 triplets + 6 runs.
pub const PATTERN_COUNT: usize = Rank::COUNT + MAX_RUN_BASE as usize;

/// Triplet or run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeldKind {
    /// Three tiles of one rank, any colors.
    Triplet,
    /// Three consecutive ranks.
    Run,
}

/// A required rank-triple. Constructed only through [`MeldPattern::triplet`]
/// and [`MeldPattern::run`], so the ranks are always in range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeldPattern {
    kind: MeldKind,
    ranks: [Rank; 3],
}

impl MeldPattern {
    /// `(r, r, r)`.
    #[must_use]
    pub const fn triplet(rank: Rank) -> Self {
        Self {
            kind: MeldKind::Triplet,
            ranks: [rank; 3],
        }
    }

    /// `(b, b+1, b+2)`, or `None` when `base > 6`.
    #[must_use]
    pub fn run(base: Rank) -> Option<Self> {
        Some(Self {
            kind: MeldKind::Run,
            ranks: [base, base.offset(1)?, base.offset(2)?],
        })
    }

    /// All patterns: triplets 1..=8, then runs with base 1..=6.
    pub fn all() -> impl Iterator<Item = MeldPattern> {
        Rank::all()
            .map(Self::triplet)
            .chain(Rank::all().filter_map(Self::run))
    }

    #[must_use]
    pub const fn kind(self) -> MeldKind {
        self.kind
    }

    /// Required ranks in pattern order.
    #[must_use]
    pub const fn ranks(self) -> [Rank; 3] {
        self.ranks
    }

    /// Lowest rank: the triplet rank or the run base.
    #[must_use]
    pub const fn base(self) -> Rank {
        self.ranks[0]
    }
}

impl fmt::Display for MeldPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.ranks;
        write!(f, "{a}-{b}-{c}")
    }
}
