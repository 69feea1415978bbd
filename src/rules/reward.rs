//! Reward policy.
//!
//! Reward is a pure function of the action, independent of deck size or
//! episode progress. Tiers, lowest rank first:
//!
//! - triplet `r`: 20, 30, ..., 90
//! - same-color run from `b`: 50, 60, ..., 100
//! - mixed-color run from `b`: 10, 20, ..., 60
//! - discard: 0

use crate::core::action::Action;
use crate::error::EngineError;

pub const TRIPLET_BASE_REWARD: f32 = 20.0;
pub const UNIFORM_RUN_BASE_REWARD: f32 = 50.0;
pub const MIXED_RUN_BASE_REWARD: f32 = 10.0;
/// Increment per rank step within a tier.
pub const RANK_STEP_REWARD: f32 = 10.0;

/// Reward for executing `action`.
#[must_use]
pub fn action_reward(action: Action) -> f32 {
    let (base, steps) = match action {
        Action::Triplet(rank) => (TRIPLET_BASE_REWARD, rank.index()),
        Action::Run {
            base,
            color_uniform: true,
        } => (UNIFORM_RUN_BASE_REWARD, base.index()),
        Action::Run {
            base,
            color_uniform: false,
        } => (MIXED_RUN_BASE_REWARD, base.index()),
        Action::Discard(_) => return 0.0,
    };
    base + RANK_STEP_REWARD * steps as f32
}

/// Reward for an action index.
pub fn index_reward(index: usize) -> Result<f32, EngineError> {
    Action::from_index(index).map(action_reward)
}
