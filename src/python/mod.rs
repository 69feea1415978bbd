//! Python bindings for the okey-rl environment.
//!
//! This module provides PyO3 bindings for training agents from Python.
//!
//! # Quick Start
//!
//! ```python
//! import okey_rl
//!
//! env = okey_rl.OkeyEnv(seed=42)
//! state = env.reset()                 # numpy float32, shape (72,)
//!
//! done = False
//! while not done:
//!     action = env.get_valid_actions()[0]
//!     state, reward, done = env.step(action)
//!
//! # Collect replay data with a random agent
//! buffer = okey_rl.ExperienceBuffer(10000)
//! buffer.collect(env, episodes=100)
//! states, actions, rewards, next_states, dones = buffer.sample_batch(32, seed=0)
//! ```

use pyo3::prelude::*;

mod py_env;
mod py_nn;
mod py_training;

pub use py_env::*;
pub use py_nn::*;
pub use py_training::*;

/// okey-rl: a single-player Okey environment for reinforcement learning.
///
/// This module provides:
/// - The `OkeyEnv` environment (reset / get_valid_actions / step)
/// - Policy callbacks for driving rollouts from Rust
/// - Replay buffer collection and numpy batching
#[pymodule]
fn okey_rl(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyOkeyEnv>()?;
    m.add_class::<PyPolicyNetwork>()?;
    m.add_class::<PyExperienceBuffer>()?;

    m.add("STATE_SIZE", crate::nn::ENCODED_LEN)?;
    m.add("ACTION_SIZE", crate::core::action::ACTION_SPACE_SIZE)?;

    Ok(())
}
