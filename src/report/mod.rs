//! Reporting utilities: formatted terminal output.

pub mod format;

pub use format::*;
