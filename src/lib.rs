//! # okey-rl
//!
//! A single-player Okey tile game, packaged as a reinforcement-learning
//! environment.
//!
//! ## Design Principles
//!
//! 1. **One Source of Legality**: `LegalActions::enumerate` decides what is
//!    legal. The step executor only checks membership.
//!
//! 2. **Stable Slots**: The hand is five fixed slots. Removing a tile leaves
//!    its slot empty until a refill, so slot positions never shift.
//!
//! 3. **Explicit Determinism**: Every environment owns its seeded RNG. No
//!    global random state is touched.
//!
//! ## Architecture
//!
//! - **Integer Action Space**: 44 indices: 8 triplets, 6 same-color runs,
//!   6 mixed-color runs, 24 tile discards.
//!
//! - **Persistent Data Structures**: Deck and discard use `im` vectors, so
//!   cloning a state for lookahead is O(1).
//!
//! - **Fixed Observation**: 72 floats, a one-hot zone (deck, hand, discard)
//!   per tile.
//!
//! ## Modules
//!
//! - `tiles`: Colors, ranks and the 24-tile universe
//! - `zones`: Deck, five-slot hand and discard pile
//! - `core`: Game state, action codec, RNG, configuration
//! - `melds`: Meld patterns and the slot matcher
//! - `rules`: RulesEngine trait, legal actions, rewards
//! - `games`: The Okey rules and the `OkeyEnv` facade
//! - `nn`: Observation encoder and network traits
//! - `training`: Agents, rollouts and replay buffer
//!
//! ## Example
//!
//! ```
//! use okey_rl::{EngineConfig, OkeyEnv};
//!
//! let mut env = OkeyEnv::new(EngineConfig::default().with_seed(7));
//! let mut state = env.reset();
//! assert_eq!(state.len(), 72);
//!
//! loop {
//!     let action = env.get_valid_actions()[0];
//!     let result = env.step(action).unwrap();
//!     state = result.state;
//!     if result.done {
//!         break;
//!     }
//! }
//! assert!(env.is_done());
//! # let _ = state;
//! ```

pub mod core;
pub mod error;
pub mod games;
pub mod melds;
pub mod nn;
pub mod rules;
pub mod tiles;
pub mod training;
pub mod zones;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Action, EngineConfig, GameRng, GameRngState, GameState, IllegalActionPolicy, TileLocation,
    ACTION_SPACE_SIZE,
};

pub use crate::error::EngineError;

pub use crate::tiles::{Color, Rank, Tile};

pub use crate::zones::{Deck, DiscardPile, Hand, Slot, HAND_SIZE};

pub use crate::melds::{MeldKind, MeldMatch, MeldPattern};

pub use crate::rules::{action_reward, ActionOutcome, EpisodeEnd, LegalActions, RulesEngine};

pub use crate::games::okey::{OkeyEnv, OkeyGame, OkeyGameBuilder, StepResult};

pub use crate::nn::{EncodedState, OkeyEncoder, PolicyNetwork, StateEncoder, ENCODED_LEN};

pub use crate::training::{
    Agent, EpisodeRunner, ExperienceBuffer, RandomAgent, RunnerConfig, Trajectory, Transition,
};
