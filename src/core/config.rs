//! Engine configuration.

use serde::{Deserialize, Serialize};

/// What `OkeyEnv::step` does with an index outside the legal set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IllegalActionPolicy {
    /// End the episode: `done = true`, reward 0, state untouched.
    #[default]
    Terminate,
    /// Return `EngineError::IllegalAction` and leave the episode running.
    Reject,
}

/// Per-instance engine configuration.
///
/// Seed control is explicit: with `seed: None` the engine draws one seed from
/// OS entropy at construction and uses it for every later reset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Shuffle seed. `None` = random.
    pub seed: Option<u64>,

    /// Handling of illegal action indices.
    pub illegal_action: IllegalActionPolicy,
}

impl EngineConfig {
    /// Create a new config with a fixed shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with the given illegal-action policy.
    #[must_use]
    pub fn with_illegal_action(mut self, policy: IllegalActionPolicy) -> Self {
        self.illegal_action = policy;
        self
    }

    /// Shorthand for `with_illegal_action(IllegalActionPolicy::Reject)`.
    #[must_use]
    pub fn strict(self) -> Self {
        self.with_illegal_action(IllegalActionPolicy::Reject)
    }

    /// The configured seed, or a fresh one from OS entropy.
    #[must_use]
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
