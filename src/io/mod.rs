//! Input/output helpers.
//!
//! - vote CSV ingest + validation (`ingest`)
//! - per-cell CSV export (`export`)
//! - run summary JSON read/write (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
