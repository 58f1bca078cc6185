//! Vote tallying.
//!
//! Responsibilities:
//!
//! - aggregate raw vote records into per-group tallies (`aggregate`)
//! - bin groups into the empirical `(yes, size)` frequency table (`table`)

pub mod aggregate;
pub mod table;

pub use aggregate::*;
pub use table::*;
