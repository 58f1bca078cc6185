//! Synthetic vote data.
//!
//! Used by `degen simulate` to produce demo inputs, and by tests that need
//! realistic samples from a known model.

pub mod sample;

pub use sample::*;
