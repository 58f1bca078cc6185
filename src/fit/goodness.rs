//! Chi-squared goodness of fit on well-populated cells.
//!
//! Sparse cells make the chi-squared approximation unreliable, so a cell only
//! enters the test when both its observed and expected counts exceed the
//! minimum count. A dropped cell is tallied once whichever side failed, and all
//! of its groups count as excluded.

use log::{debug, warn};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::domain::{CellEvaluation, FitResult};

/// Run the chi-squared test over all cells (modes and vacated alike).
pub fn chi_squared_test(cells: &[CellEvaluation], min_count: f64, total_groups: u64) -> FitResult {
    let mut statistic = 0.0;
    let mut cells_tested = 0usize;
    let mut excluded_cells = 0usize;
    let mut excluded_groups = 0u64;

    for cell in cells {
        let observed = cell.observed as f64;
        if observed > min_count && cell.expected > min_count {
            let diff = observed - cell.expected;
            statistic += diff * diff / cell.expected;
            cells_tested += 1;
        } else {
            debug!(
                "Chi-squared: excluding cell {} (observed={}, expected={:.4}, min={min_count})",
                cell.key, cell.observed, cell.expected
            );
            excluded_cells += 1;
            excluded_groups += cell.observed;
        }
    }

    let groups_tested = total_groups.saturating_sub(excluded_groups);
    let degrees_of_freedom = cells_tested.saturating_sub(1);

    let p_value = if degrees_of_freedom == 0 {
        None
    } else {
        ChiSquared::new(degrees_of_freedom as f64)
            .ok()
            .map(|dist| dist.sf(statistic))
    };

    let informative = p_value.is_some();
    if !informative {
        warn!(
            "Chi-squared test is uninformative: {cells_tested} of {} cells passed the minimum count {min_count}",
            cells.len()
        );
    }

    FitResult {
        statistic,
        p_value,
        degrees_of_freedom,
        cells_tested,
        excluded_cells,
        excluded_groups,
        groups_tested,
        informative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CellClass, CellKey};

    fn cell(yes: u64, observed: u64, expected: f64) -> CellEvaluation {
        CellEvaluation {
            key: CellKey::new(yes, 4),
            observed,
            pmf: 0.0,
            expected,
            class: if observed as f64 >= expected {
                CellClass::Mode
            } else {
                CellClass::Vacated
            },
        }
    }

    #[test]
    fn sparse_observed_cell_is_excluded() {
        let cells = vec![cell(0, 3, 10.0), cell(1, 12, 10.0), cell(2, 8, 10.0)];
        let fit = chi_squared_test(&cells, 5.0, 23);

        assert_eq!(fit.excluded_cells, 1);
        assert_eq!(fit.excluded_groups, 3);
        assert_eq!(fit.cells_tested, 2);
        assert_eq!(fit.groups_tested, 20);
        assert!((fit.statistic - (4.0 / 10.0 + 4.0 / 10.0)).abs() < 1e-12);
        assert_eq!(fit.degrees_of_freedom, 1);
        assert!(fit.informative);
    }

    #[test]
    fn sparse_expected_cell_counts_once() {
        let cells = vec![cell(0, 20, 2.0), cell(1, 3, 1.0), cell(2, 9, 9.0), cell(3, 11, 11.0)];
        let fit = chi_squared_test(&cells, 5.0, 43);
        assert_eq!(fit.excluded_cells, 2);
        assert_eq!(fit.excluded_groups, 23);
        assert_eq!(fit.groups_tested, 20);
        assert_eq!(fit.statistic, 0.0);
    }

    #[test]
    fn p_value_matches_chi_squared_survival() {
        let cells = vec![cell(0, 30, 20.0), cell(1, 10, 20.0)];
        let fit = chi_squared_test(&cells, 5.0, 40);
        // (10^2 / 20) * 2 = 10 with 1 dof -> p ~= 0.001565
        assert!((fit.statistic - 10.0).abs() < 1e-12);
        assert!((fit.p_value.unwrap() - 0.001565).abs() < 1e-5);
    }

    #[test]
    fn all_cells_excluded_is_uninformative() {
        let cells = vec![cell(0, 1, 0.5), cell(1, 2, 3.0)];
        let fit = chi_squared_test(&cells, 5.0, 3);
        assert_eq!(fit.cells_tested, 0);
        assert_eq!(fit.groups_tested, 0);
        assert!(fit.p_value.is_none());
        assert!(!fit.informative);
        assert_eq!(fit.statistic, 0.0);
    }
}
