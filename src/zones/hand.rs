//! Fixed-width hand.
//!
//! A hand has exactly [`HAND_SIZE`] slots. Slot identity is stable: a tile
//! taken from slot `i` is later refilled into slot `i`, never appended.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::tiles::{Rank, Tile};

/// Number of hand slots.
pub const HAND_SIZE: usize = 5;

/// One hand position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Occupied(Tile),
    #[default]
    Empty,
}

impl Slot {
    #[must_use]
    pub fn tile(self) -> Option<Tile> {
        match self {
            Slot::Occupied(tile) => Some(tile),
            Slot::Empty => None,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, Slot::Empty)
    }
}

/// The player's hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    slots: [Slot; HAND_SIZE],
}

impl Hand {
    /// A hand with every slot empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hand from explicit slots.
    #[must_use]
    pub fn from_slots(slots: [Slot; HAND_SIZE]) -> Self {
        Self { slots }
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot; HAND_SIZE] {
        &self.slots
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<Slot> {
        self.slots.get(slot).copied()
    }

    /// Tile in `slot`, if the slot exists and is occupied.
    #[must_use]
    pub fn tile_at(&self, slot: usize) -> Option<Tile> {
        self.get(slot).and_then(Slot::tile)
    }

    /// Occupied slots in ascending slot order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, Tile)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.tile().map(|t| (i, t)))
    }

    /// Indices of empty slots, ascending.
    pub fn empty_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_empty())
            .map(|(i, _)| i)
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// True when every slot is empty.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.slots.iter().all(|s| s.is_empty())
    }

    /// Slot holding `tile`.
    #[must_use]
    pub fn position(&self, tile: Tile) -> Option<usize> {
        self.slots.iter().position(|&s| s == Slot::Occupied(tile))
    }

    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        self.position(tile).is_some()
    }

    /// Per-rank tile counts over occupied slots, indexed by `Rank::index`.
    #[must_use]
    pub fn rank_counts(&self) -> [u8; Rank::COUNT] {
        let mut counts = [0u8; Rank::COUNT];
        for (_, tile) in self.occupied() {
            counts[tile.rank.index()] += 1;
        }
        counts
    }

    /// Remove and return the tile in `slot`, leaving it empty.
    pub fn take(&mut self, slot: usize) -> Result<Tile, EngineError> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(EngineError::SlotOutOfRange { slot })?;
        match std::mem::take(entry) {
            Slot::Occupied(tile) => Ok(tile),
            Slot::Empty => Err(EngineError::SlotEmpty { slot }),
        }
    }

    /// Put `tile` into an empty `slot`.
    pub fn place(&mut self, slot: usize, tile: Tile) -> Result<(), EngineError> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(EngineError::SlotOutOfRange { slot })?;
        if !entry.is_empty() {
            return Err(EngineError::SlotOccupied { slot });
        }
        *entry = Slot::Occupied(tile);
        Ok(())
    }
}
