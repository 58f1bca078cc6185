//! `degenerate-binomial` library crate.
//!
//! Quantifies polarization in grouped yes/no vote data by comparing the
//! empirical distribution of group outcomes with a binomial null model.
//!
//! The binary (`degen`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the estimators are reusable from other front-ends

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
pub mod tally;
