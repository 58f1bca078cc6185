//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - passed between pipeline stages as immutable snapshots
//! - exported to JSON/CSV
//! - rendered by the terminal report

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default token that marks an affirmative vote.
pub const DEFAULT_AFFIRMATIVE: &str = "Yes";

/// Default inclusion threshold for the chi-squared test.
pub const DEFAULT_CHI_MIN_COUNT: f64 = 5.0;

/// One raw vote, as supplied by the ingest layer.
///
/// An empty `group` or `vote` means the field was missing on that row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRecord {
    /// 1-based source line (for error reporting).
    pub line: usize,
    pub group: String,
    pub vote: String,
}

impl VoteRecord {
    pub fn new(line: usize, group: impl Into<String>, vote: impl Into<String>) -> Self {
        Self {
            line,
            group: group.into(),
            vote: vote.into(),
        }
    }
}

/// One polling group: its affirmative votes out of all votes recorded.
///
/// Invariant: `0 <= yes <= size` and `size > 0` (`Tally` rejects anything else).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub yes: u64,
    pub size: u64,
}

impl Group {
    /// Share of the group's votes that were affirmative.
    pub fn yes_share(&self) -> f64 {
        self.yes as f64 / self.size as f64
    }

    /// Share of the group's votes that were not affirmative.
    pub fn no_share(&self) -> f64 {
        (self.size - self.yes) as f64 / self.size as f64
    }

    /// Empirical table cell this group lands in.
    pub fn cell(&self) -> CellKey {
        CellKey::new(self.yes, self.size)
    }
}

/// Empirical table cell: `yes` affirmative votes out of `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellKey {
    pub yes: u64,
    pub size: u64,
}

impl CellKey {
    pub fn new(yes: u64, size: u64) -> Self {
        Self { yes, size }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.yes, self.size)
    }
}

/// Where the reference probability came from.
///
/// This does not change any computation, only how results should be read: a
/// population estimate describes polarization of the whole sample, a supplied
/// probability (e.g. an election result) describes bias relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbabilitySource {
    Population,
    Supplied,
}

impl ProbabilitySource {
    pub fn display_name(self) -> &'static str {
        match self {
            ProbabilitySource::Population => "population estimate",
            ProbabilitySource::Supplied => "supplied",
        }
    }
}

/// Analysis options recognised by the core.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Vote value counted as "yes" (exact, case-sensitive match).
    pub affirmative_token: String,
    /// Externally supplied success probability; `None` means estimate it.
    pub true_probability: Option<f64>,
    /// Cells must exceed this on both observed and expected side to enter the
    /// chi-squared test.
    pub chi_squared_min_count: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            affirmative_token: DEFAULT_AFFIRMATIVE.to_string(),
            true_probability: None,
            chi_squared_min_count: DEFAULT_CHI_MIN_COUNT,
        }
    }
}

/// Classification of a cell against its binomial prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellClass {
    /// Observed count meets or exceeds the expected count.
    Mode,
    /// Observed count falls short of the expected count.
    Vacated,
}

impl CellClass {
    pub fn as_str(self) -> &'static str {
        match self {
            CellClass::Mode => "mode",
            CellClass::Vacated => "vacated",
        }
    }
}

/// Observed vs. expected for one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellEvaluation {
    pub key: CellKey,
    /// Number of groups in the cell.
    pub observed: u64,
    /// Binomial probability mass at the cell.
    pub pmf: f64,
    /// `pmf * total_groups`.
    pub expected: f64,
    pub class: CellClass,
}

impl CellEvaluation {
    /// Over-representation ratio `observed / expected`.
    pub fn ratio(&self) -> f64 {
        self.observed as f64 / self.expected
    }
}

/// Output of the degeneracy estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct DegeneracyResult {
    pub modes: BTreeSet<CellKey>,
    pub vacated: BTreeSet<CellKey>,
    /// Robust scale factor `M`.
    pub supremum: f64,
    /// Signed estimate per vacated cell: `pmf * M - observed`.
    pub per_cell: BTreeMap<CellKey, f64>,
    /// `sum(|per_cell|) / M`.
    pub normalized: f64,
}

/// Chi-squared goodness-of-fit outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub statistic: f64,
    /// `None` when the test had no degrees of freedom.
    pub p_value: Option<f64>,
    pub degrees_of_freedom: usize,
    pub cells_tested: usize,
    /// Cells dropped by the minimum-count rule (one per cell).
    pub excluded_cells: usize,
    /// Groups living in the dropped cells.
    pub excluded_groups: u64,
    /// `total_groups - excluded_groups`.
    pub groups_tested: u64,
    /// False when too few cells survived for the test to say anything.
    pub informative: bool,
}

/// One cell as written to the run summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub yes: u64,
    pub size: u64,
    pub observed: u64,
    pub pmf: f64,
    pub expected: f64,
    pub class: CellClass,
    /// Present for vacated cells only.
    pub degeneracy: Option<f64>,
}

/// Portable JSON representation of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub tool: String,
    pub generated: DateTime<Utc>,
    pub affirmative_token: String,
    pub probability: f64,
    pub probability_source: ProbabilitySource,
    pub total_votes: u64,
    pub total_yes: u64,
    pub total_groups: u64,
    pub supremum: f64,
    pub normalized_degeneracy: f64,
    pub chi_squared_min_count: f64,
    pub cells: Vec<CellRecord>,
    pub goodness_of_fit: FitResult,
}
