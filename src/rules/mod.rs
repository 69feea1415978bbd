//! Game rules: legality, execution, reward and termination.
//!
//! Games implement `RulesEngine`. Legality lives in `LegalActions`; the
//! reward table lives in `reward` and depends on the action alone.

pub mod engine;
pub mod legal;
pub mod reward;

pub use engine::{ActionOutcome, EpisodeEnd, RulesEngine};
pub use legal::LegalActions;
pub use reward::{action_reward, index_reward};
