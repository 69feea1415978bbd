//! Meld patterns and the meld matcher.
//!
//! A meld is three hand tiles matching one of 14 fixed rank patterns:
//! eight triplets `(r, r, r)` and six runs `(b, b+1, b+2)`. A matched run is
//! classified as color-uniform or mixed; the action codec and the reward
//! policy both key on that flag.

pub mod matcher;
pub mod pattern;

pub use matcher::{apply_removal, has_meld, try_match, MeldMatch};
pub use pattern::{MeldKind, MeldPattern, MAX_RUN_BASE, PATTERN_COUNT};
