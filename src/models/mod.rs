//! Reference distributions that observed groups are compared against.

pub mod binomial;

pub use binomial::*;
