//! Command-line parsing for the degenerate binomial analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the statistics code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_AFFIRMATIVE, DEFAULT_CHI_MIN_COUNT};
use crate::io::ingest::{DEFAULT_GROUP_COLUMN, DEFAULT_VOTE_COLUMN};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "degen", version, about = "Degenerate Binomial polarization analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a vote CSV: empirical table, supremum, degeneracy, chi-squared.
    Analyze(AnalyzeArgs),
    /// Generate a synthetic vote CSV from a (possibly polarized) binomial model.
    Simulate(SimulateArgs),
    /// Print a previously exported run summary JSON.
    Show(ShowArgs),
}

/// Options for analyzing a vote file.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Vote CSV with one row per vote.
    #[arg(short = 'i', long, value_name = "CSV")]
    pub input: PathBuf,

    /// Column holding the group identifier.
    #[arg(long, default_value = DEFAULT_GROUP_COLUMN)]
    pub group_column: String,

    /// Column holding the vote value.
    #[arg(long, default_value = DEFAULT_VOTE_COLUMN)]
    pub vote_column: String,

    /// Vote value counted as affirmative.
    #[arg(long, default_value = DEFAULT_AFFIRMATIVE)]
    pub affirmative: String,

    /// Known yes-probability (e.g. an election result). Estimated from the sample when omitted.
    #[arg(short = 'p', long)]
    pub true_probability: Option<f64>,

    /// Cells need observed and expected counts above this to enter the chi-squared test.
    #[arg(long, default_value_t = DEFAULT_CHI_MIN_COUNT)]
    pub chi_min_count: f64,

    /// Export per-cell results to CSV.
    #[arg(long = "export-cells")]
    pub export_cells: Option<PathBuf>,

    /// Export the run summary to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Options for generating synthetic votes.
#[derive(Debug, Parser, Clone)]
pub struct SimulateArgs {
    /// Output CSV path.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub output: PathBuf,

    /// Number of groups.
    #[arg(short = 'n', long, default_value_t = 200)]
    pub groups: usize,

    /// Smallest group size.
    #[arg(long, default_value_t = 10)]
    pub min_size: u64,

    /// Largest group size.
    #[arg(long, default_value_t = 10)]
    pub max_size: u64,

    /// Yes-probability of unpolarized groups.
    #[arg(short = 'p', long, default_value_t = 0.5)]
    pub probability: f64,

    /// Share of groups drawn from a near-unanimous distribution.
    #[arg(long, default_value_t = 0.0)]
    pub polarized_share: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Vote value written for affirmative votes.
    #[arg(long, default_value = DEFAULT_AFFIRMATIVE)]
    pub affirmative: String,
}

/// Options for printing a saved summary.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Summary JSON produced by `degen analyze --export-json`.
    #[arg(long, value_name = "JSON")]
    pub summary: PathBuf,
}
