//! Meld feasibility and removal.
//!
//! Matching is a pure query over the hand. Removal is a separate mutator that
//! consumes a previous match, so enumeration can never change the hand.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::pattern::{MeldKind, MeldPattern};
use crate::error::EngineError;
use crate::zones::Hand;
use crate::tiles::Tile;

/// A feasible pattern and the hand tiles selected for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeldMatch {
    pub pattern: MeldPattern,
    /// Selected slot per pattern rank, in pattern order.
    pub slots: SmallVec<[usize; 3]>,
    /// The tiles in those slots at match time.
    pub tiles: SmallVec<[Tile; 3]>,
    /// All selected tiles share a color. Always true for triplets.
    pub color_uniform: bool,
}

/// Check whether `hand` can form `pattern`.
///
/// Rank counts are taken over occupied slots only. For each required rank
/// the first matching slot in slot order is selected, never reusing a slot.
#[must_use]
pub fn try_match(pattern: MeldPattern, hand: &Hand) -> Option<MeldMatch> {
    let counts = hand.rank_counts();
    let mut required = [0u8; crate::tiles::Rank::COUNT];
    for rank in pattern.ranks() {
        required[rank.index()] += 1;
    }
    if required.iter().zip(counts.iter()).any(|(need, have)| have < need) {
        return None;
    }

    let mut slots: SmallVec<[usize; 3]> = SmallVec::new();
    let mut tiles: SmallVec<[Tile; 3]> = SmallVec::new();
    for rank in pattern.ranks() {
        let (slot, tile) = hand
            .occupied()
            .find(|(slot, tile)| tile.rank == rank && !slots.contains(slot))?;
        slots.push(slot);
        tiles.push(tile);
    }

    let color_uniform = match pattern.kind() {
        MeldKind::Triplet => true,
        MeldKind::Run => tiles.iter().all(|t| t.color == tiles[0].color),
    };

    Some(MeldMatch {
        pattern,
        slots,
        tiles,
        color_uniform,
    })
}

/// True if any of the 14 patterns is feasible.
#[must_use]
pub fn has_meld(hand: &Hand) -> bool {
    MeldPattern::all().any(|p| try_match(p, hand).is_some())
}

/// Remove the tiles selected by `selected` from `hand`, leaving their slots
/// empty. Returns the removed tiles in pattern order.
///
/// Fails without touching the hand if any selected slot no longer holds the
/// tile it held at match time.
pub fn apply_removal(
    hand: &mut Hand,
    selected: &MeldMatch,
) -> Result<SmallVec<[Tile; 3]>, EngineError> {
    let current = selected
        .slots
        .iter()
        .zip(selected.tiles.iter())
        .all(|(&slot, &tile)| hand.tile_at(slot) == Some(tile));
    if !current {
        return Err(EngineError::StaleLegalActions);
    }

    selected.slots.iter().map(|&slot| hand.take(slot)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::Rank;
    use crate::zones::Slot;

    fn t(color: u8, rank: u8) -> Tile {
        Tile::from_parts(color, rank).unwrap()
    }

    fn hand(tiles: [Option<(u8, u8)>; 5]) -> Hand {
        Hand::from_slots(tiles.map(|s| match s {
            Some((c, r)) => Slot::Occupied(t(c, r)),
            None => Slot::Empty,
        }))
    }

    fn run(base: u8) -> MeldPattern {
        MeldPattern::run(Rank::new(base).unwrap()).unwrap()
    }

    fn triplet(rank: u8) -> MeldPattern {
        MeldPattern::triplet(Rank::new(rank).unwrap())
    }

    #[test]
    fn test_same_color_run() {
        let h = hand([Some((0, 1)), Some((0, 2)), Some((0, 3)), Some((1, 5)), Some((2, 7))]);
        let m = try_match(run(1), &h).unwrap();

        assert!(m.color_uniform);
        assert_eq!(m.slots.as_slice(), &[0, 1, 2]);
        assert_eq!(m.tiles.as_slice(), &[t(0, 1), t(0, 2), t(0, 3)]);
    }

    #[test]
    fn test_mixed_color_run() {
        let h = hand([Some((2, 5)), Some((0, 4)), Some((1, 6)), None, Some((0, 1))]);
        let m = try_match(run(4), &h).unwrap();

        assert!(!m.color_uniform);
        assert_eq!(m.slots.as_slice(), &[1, 0, 2]);
    }

    #[test]
    fn test_first_match_in_slot_order() {
        // Two 2s: slot 1 is yellow, slot 3 is red. Slot order picks yellow.
        let h = hand([Some((0, 1)), Some((1, 2)), Some((0, 3)), Some((0, 2)), None]);
        let m = try_match(run(1), &h).unwrap();

        assert_eq!(m.slots.as_slice(), &[0, 1, 2]);
        assert!(!m.color_uniform);
    }

    #[test]
    fn test_triplet_always_uniform() {
        let h = hand([Some((0, 4)), Some((1, 4)), Some((2, 4)), Some((0, 8)), None]);
        let m = try_match(triplet(4), &h).unwrap();

        assert!(m.color_uniform);
        assert_eq!(m.slots.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_infeasible_patterns() {
        let h = hand([Some((0, 4)), Some((1, 4)), Some((0, 5)), None, None]);

        assert!(try_match(triplet(4), &h).is_none());
        assert!(try_match(run(3), &h).is_none());
        assert!(try_match(run(4), &h).is_none());
        assert!(!has_meld(&h));
    }

    #[test]
    fn test_empty_slots_are_ignored() {
        let h = hand([None, None, None, None, None]);
        assert!(MeldPattern::all().all(|p| try_match(p, &h).is_none()));
        assert!(!has_meld(&h));
    }

    #[test]
    fn test_match_does_not_mutate() {
        let h = hand([Some((0, 1)), Some((0, 2)), Some((0, 3)), Some((1, 5)), Some((2, 7))]);
        let before = h;
        let _ = try_match(run(1), &h);
        assert_eq!(h, before);
    }

    #[test]
    fn test_apply_removal() {
        let mut h = hand([Some((1, 6)), Some((0, 7)), Some((2, 8)), Some((1, 1)), None]);
        let m = try_match(run(6), &h).unwrap();

        let removed = apply_removal(&mut h, &m).unwrap();
        assert_eq!(removed.as_slice(), &[t(1, 6), t(0, 7), t(2, 8)]);
        assert_eq!(h.empty_slots().collect::<Vec<_>>(), vec![0, 1, 2, 4]);
        assert_eq!(h.tile_at(3), Some(t(1, 1)));
    }

    #[test]
    fn test_apply_removal_rejects_stale_match() {
        let mut h = hand([Some((0, 2)), Some((1, 2)), Some((2, 2)), None, None]);
        let m = try_match(triplet(2), &h).unwrap();

        h.take(1).unwrap();
        h.place(1, t(0, 8)).unwrap();
        let before = h;

        assert_eq!(apply_removal(&mut h, &m), Err(EngineError::StaleLegalActions));
        assert_eq!(h, before);
    }
}
