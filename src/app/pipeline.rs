//! Shared analysis pipeline.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! records -> groups -> empirical table -> cell evaluation -> fit test + degeneracy
//!
//! Each stage consumes the previous stage's output by reference and produces a
//! new value; nothing is mutated after it is built.

use log::info;

use crate::domain::{AnalysisConfig, CellEvaluation, DegeneracyResult, FitResult, VoteRecord};
use crate::error::{AnalysisError, AppError};
use crate::fit::{chi_squared_test, estimate_degeneracy, evaluate_cells};
use crate::io::ingest::{IngestOptions, load_vote_records};
use crate::models::ReferenceModel;
use crate::tally::{EmpiricalTable, Tally, aggregate};

/// All computed outputs of a single `degen analyze` run.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub tally: Tally,
    pub table: EmpiricalTable,
    pub model: ReferenceModel,
    pub cells: Vec<CellEvaluation>,
    pub degeneracy: DegeneracyResult,
    pub fit: FitResult,
}

/// Reject configuration that no analysis could use.
pub fn validate_config(config: &AnalysisConfig) -> Result<(), AnalysisError> {
    if let Some(p) = config.true_probability {
        if !(0.0..=1.0).contains(&p) {
            return Err(AnalysisError::InvalidProbability(p));
        }
    }
    Ok(())
}

/// Read the vote CSV and run the full analysis.
pub fn run_analysis(options: &IngestOptions, config: &AnalysisConfig) -> Result<AnalysisRun, AppError> {
    validate_config(config)?;
    let votes = load_vote_records(options)?;
    Ok(analyze_records(&votes.records, config)?)
}

/// Run the full analysis over already-parsed records.
pub fn analyze_records(records: &[VoteRecord], config: &AnalysisConfig) -> Result<AnalysisRun, AnalysisError> {
    validate_config(config)?;
    let tally = aggregate(records, &config.affirmative_token)?;
    analyze_tally(tally, config)
}

/// Run the analysis from aggregated groups onward.
pub fn analyze_tally(tally: Tally, config: &AnalysisConfig) -> Result<AnalysisRun, AnalysisError> {
    validate_config(config)?;

    let table = EmpiricalTable::from_tally(&tally)?;
    let model = ReferenceModel::from_config(&tally, config)?;
    info!(
        "Reference probability p={:.6} ({})",
        model.p(),
        model.source().display_name()
    );

    let cells = evaluate_cells(&table, &model)?;

    let fit = chi_squared_test(&cells, config.chi_squared_min_count, table.total_groups());
    info!(
        "Chi-squared: statistic={:.4} cells_tested={} groups_tested={}",
        fit.statistic, fit.cells_tested, fit.groups_tested
    );

    let degeneracy = estimate_degeneracy(&cells)?;
    info!(
        "Degeneracy: {} modes, {} vacated, supremum={:.6}, normalized={:.6}",
        degeneracy.modes.len(),
        degeneracy.vacated.len(),
        degeneracy.supremum,
        degeneracy.normalized
    );

    Ok(AnalysisRun {
        tally,
        table,
        model,
        cells,
        degeneracy,
        fit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CellKey, ProbabilitySource};

    fn group_records(layout: &[(u64, u64, usize)]) -> Vec<VoteRecord> {
        let mut records = Vec::new();
        let mut g = 0;
        for &(yes, size, copies) in layout {
            for _ in 0..copies {
                for v in 0..size {
                    let vote = if v < yes { "Yes" } else { "No" };
                    records.push(VoteRecord::new(records.len() + 2, format!("G{g}"), vote));
                }
                g += 1;
            }
        }
        records
    }

    #[test]
    fn two_group_scenario_runs_end_to_end() {
        let records = group_records(&[(5, 10, 1), (9, 10, 1)]);
        let run = analyze_records(&records, &AnalysisConfig::default()).unwrap();

        assert!((run.model.p() - 0.7).abs() < 1e-12);
        assert_eq!(run.model.source(), ProbabilitySource::Population);
        assert_eq!(run.table.get(&CellKey::new(5, 10)), Some(1));
        assert_eq!(run.table.get(&CellKey::new(9, 10)), Some(1));
        assert_eq!(run.degeneracy.modes.len(), 2);
        assert!(run.degeneracy.vacated.is_empty());
        assert!(!run.fit.informative);
        assert_eq!(run.fit.groups_tested, 0);
    }

    #[test]
    fn identical_groups_fail_with_insufficient_modes() {
        let records = group_records(&[(5, 10, 100)]);
        let err = analyze_records(&records, &AnalysisConfig::default()).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientModes { ratios: 1 });
    }

    #[test]
    fn out_of_range_probability_fails_before_analysis() {
        let config = AnalysisConfig {
            true_probability: Some(1.2),
            ..AnalysisConfig::default()
        };
        let err = analyze_records(&group_records(&[(1, 2, 3)]), &config).unwrap_err();
        assert_eq!(err, AnalysisError::InvalidProbability(1.2));
    }

    #[test]
    fn supplied_probability_is_used() {
        let records = group_records(&[(0, 4, 10), (4, 4, 10), (2, 4, 5)]);
        let config = AnalysisConfig {
            true_probability: Some(0.5),
            ..AnalysisConfig::default()
        };
        let run = analyze_records(&records, &config).unwrap();
        assert_eq!(run.model.source(), ProbabilitySource::Supplied);
        assert!((run.model.p() - 0.5).abs() < 1e-12);
        assert!(run.degeneracy.vacated.contains(&CellKey::new(2, 4)));
        assert!(run.degeneracy.normalized >= 0.0);
    }
}
