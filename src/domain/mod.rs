//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw input records (`VoteRecord`) and aggregated groups (`Group`)
//! - the typed table key (`CellKey`)
//! - analysis configuration (`AnalysisConfig`)
//! - estimator outputs (`DegeneracyResult`, `FitResult`, etc.)

pub mod types;

pub use types::*;
