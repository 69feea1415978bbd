//! Property-based invariant tests for the Okey environment.
//!
//! Uses proptest to generate seeds and action choices, plays episodes with
//! random legal actions, and checks the engine invariants after every step.

use proptest::prelude::*;
use proptest::sample::Index;

use okey_rl::core::action::{ACTION_SPACE_SIZE, DISCARD_OFFSET};
use okey_rl::melds::{has_meld, try_match, MeldPattern};
use okey_rl::nn::{OkeyEncoder, PLANE_DECK, PLANE_DISCARD, PLANE_HAND};
use okey_rl::rules::index_reward;
use okey_rl::{Action, EngineConfig, EngineError, LegalActions, OkeyEnv, Tile, TileLocation};

/// An episode never outlasts the tile count: every step discards a tile.
const MAX_STEPS: usize = 24;

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn codec_is_bijective(index in 0usize..ACTION_SPACE_SIZE) {
        let action = Action::from_index(index).unwrap();
        prop_assert_eq!(action.to_index(), index);
    }

    #[test]
    fn codec_rejects_out_of_range(index in ACTION_SPACE_SIZE..usize::MAX) {
        prop_assert_eq!(
            Action::from_index(index),
            Err(EngineError::IndexOutOfRange { index })
        );
    }

    #[test]
    fn discard_index_recovers_tile(index in DISCARD_OFFSET..ACTION_SPACE_SIZE) {
        let tile = Tile::from_index(index - DISCARD_OFFSET).unwrap();
        prop_assert_eq!(Action::from_index(index), Ok(Action::Discard(tile)));
    }
}

// ---------------------------------------------------------------------------
// Episodes
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Conservation, reward table, encoder agreement and termination,
    /// checked after every step of random legal play.
    #[test]
    fn episode_invariants_hold(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<Index>(), MAX_STEPS),
    ) {
        let mut env = OkeyEnv::new(EngineConfig::default().with_seed(seed).strict());
        let mut steps = 0;

        for pick in &picks {
            if env.is_done() {
                break;
            }
            let legal = env.get_valid_actions();
            prop_assert!(!legal.is_empty(), "seed {seed}: no legal actions at step {steps}");
            let action = *pick.get(&legal);

            let deck_before = env.deck_len();
            let result = env.step(action).unwrap();
            steps += 1;

            // Reward depends on the action alone
            prop_assert_eq!(result.reward, index_reward(action).unwrap());

            // Deck only shrinks, by at most three
            prop_assert!(env.deck_len() <= deck_before);
            prop_assert!(deck_before - env.deck_len() <= 3);

            // Every tile is in exactly one zone
            let state = env.state();
            prop_assert!(state.check_conservation().is_ok());
            prop_assert_eq!(state.tile_count(), Tile::COUNT);

            // The observation mirrors the zones
            for tile in Tile::universe() {
                let plane = OkeyEncoder::plane_of(&result.state, tile);
                let expected = match state.location(tile) {
                    Some(TileLocation::Deck) => PLANE_DECK,
                    Some(TileLocation::Hand(_)) => PLANE_HAND,
                    Some(TileLocation::Discard) => PLANE_DISCARD,
                    None => unreachable!(),
                };
                prop_assert_eq!(plane, Some(expected));
            }

            // done is exactly the terminal condition
            let terminal = state.hand.is_cleared()
                || (state.deck.is_empty() && !has_meld(&state.hand));
            prop_assert_eq!(result.done, terminal);
        }

        prop_assert!(env.is_done(), "seed {seed}: still running after {steps} steps");
    }

    /// Legal indices are in range, sorted, contain one discard per occupied
    /// slot, and contain exactly the feasible meld patterns.
    #[test]
    fn legal_set_matches_hand(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<Index>(), 0..MAX_STEPS),
    ) {
        let mut env = OkeyEnv::new(EngineConfig::default().with_seed(seed));
        for pick in &picks {
            if env.is_done() {
                break;
            }
            let legal = env.get_valid_actions();
            env.step(*pick.get(&legal)).unwrap();
        }
        if env.is_done() {
            return Ok(());
        }

        let legal = LegalActions::enumerate(env.state());
        let hand = env.hand();
        prop_assert!(legal.indices().windows(2).all(|w| w[0] < w[1]));
        prop_assert!(legal.indices().iter().all(|&i| i < ACTION_SPACE_SIZE));

        let discards = legal.indices().iter().filter(|&&i| i >= DISCARD_OFFSET).count();
        prop_assert_eq!(discards, hand.occupied_count());

        let feasible = MeldPattern::all()
            .filter(|&p| try_match(p, hand).is_some())
            .count();
        prop_assert_eq!(legal.meld_indices().count(), feasible);
    }
}
