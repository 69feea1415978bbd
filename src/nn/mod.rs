//! Neural network integration.
//!
//! This module provides the observation encoder and the scoring interface
//! agents use to pick actions.
//!
//! ## Overview
//!
//! - **Scoring**: `PolicyNetwork` and `masked_argmax`
//! - **Encoding**: `StateEncoder` trait and `OkeyEncoder` implementation
//! - **Baseline**: `UniformPolicy` for testing
//!
//! ## Usage
//!
//! ```rust,ignore
//! use okey_rl::nn::{masked_argmax, OkeyEncoder, StateEncoder};
//!
//! let encoded = OkeyEncoder::new().encode(&state);
//! let scores = network.predict(&encoded);
//! let choice = masked_argmax(&scores, &legal_indices);
//! ```

pub mod encoder;
pub mod traits;

// Re-export main types
pub use encoder::{
    OkeyEncoder, StateEncoder, ENCODED_LEN, PLANE_COUNT, PLANE_DECK, PLANE_DISCARD, PLANE_HAND,
};
pub use traits::{masked_argmax, EncodedState, PolicyNetwork, UniformPolicy};
