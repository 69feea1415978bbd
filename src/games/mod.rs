//! Game implementations.

pub mod okey;
