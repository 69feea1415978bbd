//! Legal-action enumeration.
//!
//! `LegalActions::enumerate` is the single source of truth for legality: the
//! step executor only ever checks membership in a set produced here. The set
//! also carries the meld selections found while enumerating, keyed by action
//! index, so executing a meld does not re-run the matcher.

use rustc_hash::FxHashMap;

use crate::core::action::Action;
use crate::core::state::GameState;
use crate::melds::{try_match, MeldMatch, MeldPattern};
use crate::zones::Hand;

/// The legal index set for one hand, plus its meld cache.
#[derive(Clone, Debug)]
pub struct LegalActions {
    hand: Hand,
    indices: Vec<usize>,
    melds: FxHashMap<usize, MeldMatch>,
}

impl LegalActions {
    /// Enumerate every legal action index for `state`.
    ///
    /// Each feasible pattern contributes one meld index (triplet by rank, run
    /// by base rank and color-uniform flag). Each occupied slot contributes
    /// the discard index of its tile.
    #[must_use]
    pub fn enumerate(state: &GameState) -> Self {
        let hand = state.hand;
        let mut melds = FxHashMap::default();
        let mut indices = Vec::new();

        for pattern in MeldPattern::all() {
            if let Some(found) = try_match(pattern, &hand) {
                let index = Action::for_meld(pattern, found.color_uniform).to_index();
                indices.push(index);
                melds.insert(index, found);
            }
        }
        for (_, tile) in hand.occupied() {
            indices.push(Action::Discard(tile).to_index());
        }
        indices.sort_unstable();

        Self {
            hand,
            indices,
            melds,
        }
    }

    /// Legal indices, ascending.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Legal actions, in index order.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.indices
            .iter()
            .filter_map(|&index| Action::from_index(index).ok())
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// The cached meld selection for a legal meld index.
    #[must_use]
    pub fn meld(&self, index: usize) -> Option<&MeldMatch> {
        self.melds.get(&index)
    }

    /// True if at least one meld index is legal.
    #[must_use]
    pub fn has_meld(&self) -> bool {
        !self.melds.is_empty()
    }

    /// Indices of legal melds only, ascending.
    pub fn meld_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices
            .iter()
            .copied()
            .filter(|index| self.melds.contains_key(index))
    }

    /// Whether this set was enumerated for exactly this hand.
    #[must_use]
    pub fn is_current_for(&self, state: &GameState) -> bool {
        self.hand == state.hand
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{ACTION_SPACE_SIZE, DISCARD_OFFSET};
    use crate::tiles::Tile;
    use crate::zones::{Deck, Slot};

    fn t(color: u8, rank: u8) -> Tile {
        Tile::from_parts(color, rank).unwrap()
    }

    fn state_with_hand(slots: [Slot; 5]) -> GameState {
        let mut state = GameState::deal(Deck::stacked(Tile::universe().collect()).unwrap());
        state.hand = Hand::from_slots(slots);
        state
    }

    #[test]
    fn test_same_color_run_and_discards() {
        let state = state_with_hand([
            Slot::Occupied(t(0, 1)),
            Slot::Occupied(t(0, 2)),
            Slot::Occupied(t(0, 3)),
            Slot::Occupied(t(1, 5)),
            Slot::Occupied(t(2, 7)),
        ]);
        let legal = LegalActions::enumerate(&state);

        assert_eq!(legal.indices(), &[8, 20, 21, 22, 20 + 8 + 4, 20 + 16 + 6]);
        assert!(legal.has_meld());
        assert_eq!(legal.meld_indices().collect::<Vec<_>>(), vec![8]);
        assert_eq!(legal.meld(8).map(|m| m.slots.to_vec()), Some(vec![0, 1, 2]));
        assert!(legal.meld(20).is_none());
    }

    #[test]
    fn test_mixed_run_goes_to_mixed_range() {
        let state = state_with_hand([
            Slot::Occupied(t(0, 6)),
            Slot::Occupied(t(1, 7)),
            Slot::Occupied(t(0, 8)),
            Slot::Empty,
            Slot::Empty,
        ]);
        let legal = LegalActions::enumerate(&state);

        assert!(legal.contains(19));
        assert!(!legal.contains(13));
        assert_eq!(legal.len(), 4);
    }

    #[test]
    fn test_triplet_and_overlapping_runs() {
        let state = state_with_hand([
            Slot::Occupied(t(0, 3)),
            Slot::Occupied(t(1, 3)),
            Slot::Occupied(t(2, 3)),
            Slot::Occupied(t(1, 4)),
            Slot::Occupied(t(1, 5)),
        ]);
        let legal = LegalActions::enumerate(&state);

        // Triplet of 3s, and 3-4-5 selecting the red 3 in slot 0 (mixed).
        assert_eq!(legal.meld_indices().collect::<Vec<_>>(), vec![2, 16]);
        assert!(!legal.contains(10));
    }

    #[test]
    fn test_empty_slots_contribute_nothing() {
        let state = state_with_hand([Slot::Empty; 5]);
        let legal = LegalActions::enumerate(&state);
        assert!(legal.is_empty());
        assert!(!legal.has_meld());
    }

    #[test]
    fn test_indices_in_range_and_sorted() {
        let state = GameState::deal(Deck::stacked(Tile::universe().collect()).unwrap());
        let legal = LegalActions::enumerate(&state);

        assert!(legal.indices().windows(2).all(|w| w[0] < w[1]));
        assert!(legal.indices().iter().all(|&i| i < ACTION_SPACE_SIZE));
        let discards = legal.indices().iter().filter(|&&i| i >= DISCARD_OFFSET).count();
        assert_eq!(discards, 5);
    }

    #[test]
    fn test_actions_decode() {
        let state = state_with_hand([
            Slot::Occupied(t(2, 1)),
            Slot::Empty,
            Slot::Empty,
            Slot::Empty,
            Slot::Empty,
        ]);
        let legal = LegalActions::enumerate(&state);
        assert_eq!(legal.actions().collect::<Vec<_>>(), vec![Action::Discard(t(2, 1))]);
    }

    #[test]
    fn test_is_current_for() {
        let mut state = GameState::deal(Deck::stacked(Tile::universe().collect()).unwrap());
        let legal = LegalActions::enumerate(&state);
        assert!(legal.is_current_for(&state));

        state.hand.take(0).unwrap();
        assert!(!legal.is_current_for(&state));
    }
}
