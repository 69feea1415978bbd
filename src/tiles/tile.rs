//! Tile, color and rank types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Tile color. Discriminants are the wire values used by the action codec
/// and the state encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red = 0,
    Yellow = 1,
    Blue = 2,
}

impl Color {
    /// Number of colors.
    pub const COUNT: usize = 3;

    /// All colors in wire order.
    pub const ALL: [Color; Color::COUNT] = [Color::Red, Color::Yellow, Color::Blue];

    /// Wire index (0..3).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a color by wire index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Inverse of [`Color::symbol`].
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.symbol() == symbol)
    }

    /// Single-letter notation: `r`, `y`, `b`.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Yellow => 'y',
            Color::Blue => 'b',
        }
    }
}

/// Tile rank, always in `1..=8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    /// Number of ranks.
    pub const COUNT: usize = 8;

    /// Create a rank, or `None` if `value` is outside `1..=8`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Raw rank value (1..=8).
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index (rank - 1).
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - Self::MIN) as usize
    }

    /// Rank `delta` steps above this one, if it exists.
    #[must_use]
    pub const fn offset(self, delta: u8) -> Option<Self> {
        Self::new(self.0.saturating_add(delta))
    }

    /// All ranks in ascending order.
    pub fn all() -> impl Iterator<Item = Rank> {
        (Self::MIN..=Self::MAX).map(Rank)
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::new(value).ok_or_else(|| format!("rank {value} outside 1..=8"))
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> u8 {
        rank.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single tile. Ordering is color-major, then rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    pub color: Color,
    pub rank: Rank,
}

impl Tile {
    /// Size of the tile universe.
    pub const COUNT: usize = Color::COUNT * Rank::COUNT;

    #[must_use]
    pub const fn new(color: Color, rank: Rank) -> Self {
        Self { color, rank }
    }

    /// Build a tile from raw wire values (`color` in 0..3, `rank` in 1..=8).
    #[must_use]
    pub fn from_parts(color: u8, rank: u8) -> Option<Self> {
        Some(Self::new(Color::from_index(color as usize)?, Rank::new(rank)?))
    }

    /// Dense index `color * 8 + (rank - 1)`, in `0..24`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.color.index() * Rank::COUNT + self.rank.index()
    }

    /// Inverse of [`Tile::index`].
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        let color = Color::from_index(index / Rank::COUNT)?;
        let rank = Rank::new((index % Rank::COUNT) as u8 + Rank::MIN)?;
        Some(Self::new(color, rank))
    }

    /// The full 24-tile universe in index order.
    pub fn universe() -> impl Iterator<Item = Tile> {
        Color::ALL
            .into_iter()
            .flat_map(|color| Rank::all().map(move |rank| Tile::new(color, rank)))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.color.symbol(), self.rank)
    }
}

/// Parses the `r,1` notation produced by `Display`.
impl FromStr for Tile {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::ParseTile(s.to_string());
        let (color, rank) = s.trim().split_once(',').ok_or_else(invalid)?;

        let mut symbol = color.trim().chars();
        let color = match (symbol.next(), symbol.next()) {
            (Some(c), None) => Color::from_symbol(c.to_ascii_lowercase()),
            _ => None,
        }
        .ok_or_else(invalid)?;
        let rank = rank
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(Rank::new)
            .ok_or_else(invalid)?;

        Ok(Tile::new(color, rank))
    }
}
