//! Read/write run summary JSON files.
//!
//! The summary is the portable output of `degen analyze`:
//! - the reference probability and where it came from
//! - population totals
//! - every cell with its classification and degeneracy
//! - supremum, normalized degeneracy and the chi-squared result
//!
//! The schema is defined by `domain::RunSummary`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::app::pipeline::AnalysisRun;
use crate::domain::{AnalysisConfig, CellRecord, RunSummary};
use crate::error::AppError;

/// Build the summary for a finished run.
pub fn build_summary(run: &AnalysisRun, config: &AnalysisConfig) -> RunSummary {
    let cells = run
        .cells
        .iter()
        .map(|c| CellRecord {
            yes: c.key.yes,
            size: c.key.size,
            observed: c.observed,
            pmf: c.pmf,
            expected: c.expected,
            class: c.class,
            degeneracy: run.degeneracy.per_cell.get(&c.key).copied(),
        })
        .collect();

    RunSummary {
        tool: "degen".to_string(),
        generated: Utc::now(),
        affirmative_token: config.affirmative_token.clone(),
        probability: run.model.p(),
        probability_source: run.model.source(),
        total_votes: run.tally.total_votes,
        total_yes: run.tally.total_yes,
        total_groups: run.table.total_groups(),
        supremum: run.degeneracy.supremum,
        normalized_degeneracy: run.degeneracy.normalized,
        chi_squared_min_count: config.chi_squared_min_count,
        cells,
        goodness_of_fit: run.fit.clone(),
    }
}

/// Write a run summary JSON file.
pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;
    Ok(())
}

/// Read a run summary JSON file.
pub fn read_summary_json(path: &Path) -> Result<RunSummary, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open summary JSON '{}': {e}", path.display())))?;
    let summary: RunSummary =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid summary JSON: {e}")))?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::analyze_records;
    use crate::domain::{CellClass, ProbabilitySource, VoteRecord};

    fn polarized_records() -> Vec<VoteRecord> {
        // Mostly unanimous groups of 4 with a few mixed ones.
        let mut records = Vec::new();
        let layout: [(u64, usize); 5] = [(0, 12), (1, 2), (2, 3), (3, 2), (4, 11)];
        let mut g = 0;
        for (yes, copies) in layout {
            for _ in 0..copies {
                for v in 0..4 {
                    let vote = if v < yes { "Yes" } else { "No" };
                    records.push(VoteRecord::new(records.len() + 2, format!("G{g}"), vote));
                }
                g += 1;
            }
        }
        records
    }

    #[test]
    fn summary_round_trips_through_json() {
        let config = AnalysisConfig::default();
        let run = analyze_records(&polarized_records(), &config).unwrap();
        let summary = build_summary(&run, &config);

        assert_eq!(summary.total_groups, 30);
        assert_eq!(summary.probability_source, ProbabilitySource::Population);
        assert_eq!(summary.cells.len(), 5);
        for cell in &summary.cells {
            assert_eq!(cell.degeneracy.is_some(), cell.class == CellClass::Vacated);
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_summary_json(&path, &summary).unwrap();
        let back = read_summary_json(&path).unwrap();
        assert_eq!(back.cells.len(), summary.cells.len());
        for (a, b) in back.cells.iter().zip(&summary.cells) {
            assert_eq!((a.yes, a.size, a.observed, a.class), (b.yes, b.size, b.observed, b.class));
            assert!((a.expected - b.expected).abs() < 1e-9);
        }
        assert!((back.supremum - summary.supremum).abs() < 1e-9);
        assert_eq!(back.goodness_of_fit.cells_tested, summary.goodness_of_fit.cells_tested);
    }
}
