//! Training infrastructure.
//!
//! This module provides the data structures and rollout loop an external
//! learner needs. Learning itself happens elsewhere (typically Python).
//!
//! ## Overview
//!
//! - **Trajectory**: Records one episode as transitions
//! - **ExperienceBuffer**: Bounded replay memory with seeded sampling
//! - **EpisodeRunner**: Plays episodes with an `Agent`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use okey_rl::training::{EpisodeRunner, ExperienceBuffer, RunnerConfig};
//!
//! let mut env = OkeyEnv::new(EngineConfig::default().with_seed(7));
//! let mut runner = EpisodeRunner::random(RunnerConfig::default());
//!
//! let mut buffer = ExperienceBuffer::new(10000);
//! runner.fill_buffer(&mut env, &mut buffer, 100)?;
//!
//! let batch = buffer.sample_batch(32, rng_seed);
//! ```

pub mod runner;
pub mod trajectory;

// Re-export main types
pub use runner::{Agent, EpisodeRunner, GreedyAgent, PolicyAgent, RandomAgent, RunnerConfig};
pub use trajectory::{ExperienceBuffer, Trajectory, Transition};
