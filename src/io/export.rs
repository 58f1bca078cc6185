//! Export per-cell results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or plotting scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{CellEvaluation, DegeneracyResult};
use crate::error::AppError;

/// Write per-cell results to a CSV file.
///
/// The `degeneracy` column is empty for mode cells.
pub fn write_cells_csv(path: &Path, cells: &[CellEvaluation], degeneracy: &DegeneracyResult) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_cells(&mut file, cells, degeneracy)
}

fn write_cells<W: Write>(out: &mut W, cells: &[CellEvaluation], degeneracy: &DegeneracyResult) -> Result<(), AppError> {
    writeln!(out, "yes,size,observed,pmf,expected,class,degeneracy")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for c in cells {
        writeln!(
            out,
            "{},{},{},{:.10},{:.6},{},{}",
            c.key.yes,
            c.key.size,
            c.observed,
            c.pmf,
            c.expected,
            c.class.as_str(),
            degeneracy
                .per_cell
                .get(&c.key)
                .map(|d| format!("{d:.6}"))
                .unwrap_or_default(),
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
