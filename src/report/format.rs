//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the estimators stay clean and testable
//! - output changes are localized

use crate::app::pipeline::AnalysisRun;
use crate::domain::{AnalysisConfig, FitResult, RunSummary};

/// Format the full run summary (population + reference model + estimators).
pub fn format_run_summary(run: &AnalysisRun, config: &AnalysisConfig) -> String {
    let mut out = String::new();

    out.push_str("=== degen - Degenerate Binomial Polarization ===\n");
    out.push_str(&format!("Affirmative token: {}\n", config.affirmative_token));
    out.push_str(&format!(
        "Votes: n={} | yes={} | groups={}\n",
        run.tally.total_votes,
        run.tally.total_yes,
        run.table.total_groups()
    ));
    out.push_str(&format!(
        "Reference: p={:.6} ({})\n",
        run.model.p(),
        run.model.source().display_name()
    ));

    out.push_str("\nCells:\n");
    out.push_str(&format_cells(run));

    out.push_str("\nDegeneracy:\n");
    out.push_str(&format!(
        "- modes: {} | vacated: {}\n",
        run.degeneracy.modes.len(),
        run.degeneracy.vacated.len()
    ));
    out.push_str(&format!("- supremum: {:.6}\n", run.degeneracy.supremum));
    out.push_str(&format!("- normalized degeneracy: {:.6}\n", run.degeneracy.normalized));

    out.push_str("\nGoodness of fit (chi-squared):\n");
    out.push_str(&format_fit(&run.fit, config.chi_squared_min_count));

    out
}

fn format_cells(run: &AnalysisRun) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>6} {:>6} {:>9} {:>10} {:>11} {:<8} {:>12}\n",
            "yes", "size", "observed", "pmf", "expected", "class", "degeneracy"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<6} {:-<6} {:-<9} {:-<10} {:-<11} {:-<8} {:-<12}\n",
            "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for c in &run.cells {
        let degeneracy = run
            .degeneracy
            .per_cell
            .get(&c.key)
            .map(|d| format!("{d:.4}"))
            .unwrap_or_default();
        out.push_str(
            format!(
                "{:>6} {:>6} {:>9} {:>10.6} {:>11.4} {:<8} {:>12}\n",
                c.key.yes,
                c.key.size,
                c.observed,
                c.pmf,
                c.expected,
                c.class.as_str(),
                degeneracy,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format a summary loaded back from JSON.
pub fn format_saved_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} run summary ({}) ===\n", summary.tool, summary.generated.to_rfc3339()));
    out.push_str(&format!("Affirmative token: {}\n", summary.affirmative_token));
    out.push_str(&format!(
        "Votes: n={} | yes={} | groups={}\n",
        summary.total_votes, summary.total_yes, summary.total_groups
    ));
    out.push_str(&format!(
        "Reference: p={:.6} ({})\n",
        summary.probability,
        summary.probability_source.display_name()
    ));
    let vacated = summary.cells.iter().filter(|c| c.degeneracy.is_some()).count();
    out.push_str(&format!(
        "Cells: {} | vacated: {}\n",
        summary.cells.len(),
        vacated
    ));
    out.push_str(&format!("Supremum: {:.6}\n", summary.supremum));
    out.push_str(&format!("Normalized degeneracy: {:.6}\n", summary.normalized_degeneracy));
    out.push_str("\nGoodness of fit (chi-squared):\n");
    out.push_str(&format_fit(&summary.goodness_of_fit, summary.chi_squared_min_count));
    out
}

fn format_fit(fit: &FitResult, min_count: f64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "- cells tested: {} (excluded {} with count <= {min_count})\n",
        fit.cells_tested, fit.excluded_cells
    ));
    out.push_str(&format!(
        "- groups tested: {} (excluded {})\n",
        fit.groups_tested, fit.excluded_groups
    ));
    match fit.p_value {
        Some(p) => out.push_str(&format!(
            "- statistic: {:.4} | dof: {} | p-value: {:.6}\n",
            fit.statistic, fit.degrees_of_freedom, p
        )),
        None => out.push_str("- uninformative: too few cells pass the minimum count\n"),
    }
    out
}
