//! Numeric helpers shared by the estimators.

pub mod zscore;

pub use zscore::*;
