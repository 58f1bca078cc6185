//! Degeneracy estimation.
//!
//! Given:
//! - the empirical table (groups per `(yes, size)` cell)
//! - the binomial reference model
//!
//! we:
//! - compute each cell's expected count `pmf * total_groups` (parallel)
//! - classify cells as modes (observed >= expected) or vacated (observed < expected)
//! - estimate the supremum `M` from the modes' `observed / expected` ratios
//! - estimate the signed shortfall `pmf * M - observed` of each vacated cell
//!
//! The binomial shape is taken as right; only its total mass is rescaled by `M`
//! before measuring how far each vacated cell falls short.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};
use rayon::prelude::*;

use crate::domain::{CellClass, CellEvaluation, CellKey, DegeneracyResult};
use crate::error::AnalysisError;
use crate::fit::supremum::supremum;
use crate::models::ReferenceModel;
use crate::tally::EmpiricalTable;

/// Evaluate every cell of the table against the reference model.
///
/// Output is ordered by cell key regardless of how the evaluation was scheduled.
pub fn evaluate_cells(table: &EmpiricalTable, model: &ReferenceModel) -> Result<Vec<CellEvaluation>, AnalysisError> {
    if table.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    let total_groups = table.total_groups() as f64;
    let cells: Vec<(CellKey, u64)> = table.iter().map(|(k, c)| (*k, *c)).collect();

    let evaluated: Vec<CellEvaluation> = cells
        .par_iter()
        .map(|&(key, observed)| -> Result<CellEvaluation, AnalysisError> {
            let pmf = model.pmf(key)?;
            let expected = pmf * total_groups;
            let class = if observed as f64 >= expected {
                CellClass::Mode
            } else {
                CellClass::Vacated
            };
            Ok(CellEvaluation {
                key,
                observed,
                pmf,
                expected,
                class,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for cell in &evaluated {
        debug!(
            "Cell {}: observed={} pmf={:.6} expected={:.4} -> {}",
            cell.key,
            cell.observed,
            cell.pmf,
            cell.expected,
            cell.class.as_str()
        );
    }

    Ok(evaluated)
}

/// Classify cells, estimate the supremum, and measure vacated-cell shortfalls.
pub fn estimate_degeneracy(cells: &[CellEvaluation]) -> Result<DegeneracyResult, AnalysisError> {
    if cells.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let mut modes = BTreeSet::new();
    let mut vacated = BTreeSet::new();
    let mut ratios = Vec::new();

    for cell in cells {
        match cell.class {
            CellClass::Mode => {
                modes.insert(cell.key);
                if cell.expected > 0.0 {
                    ratios.push(cell.ratio());
                } else {
                    // The model puts no mass here, so no finite scale can explain it.
                    warn!("Cell {} is observed but has zero expected mass; skipping its ratio", cell.key);
                }
            }
            CellClass::Vacated => {
                vacated.insert(cell.key);
            }
        }
    }

    let m = supremum(&ratios)?;

    let mut per_cell = BTreeMap::new();
    let mut total = 0.0;
    for cell in cells.iter().filter(|c| c.class == CellClass::Vacated) {
        let d = cell.pmf * m - cell.observed as f64;
        per_cell.insert(cell.key, d);
        total += d.abs();
    }

    Ok(DegeneracyResult {
        modes,
        vacated,
        supremum: m,
        per_cell,
        normalized: total / m,
    })
}
