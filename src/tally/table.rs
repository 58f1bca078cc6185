//! Empirical frequency table.
//!
//! Counts how many groups land in each `(yes, size)` cell. Two groups with the
//! same composition share a cell; that shared count is the empirical frequency.

use std::collections::BTreeMap;

use log::debug;

use crate::domain::{CellKey, Group};
use crate::error::AnalysisError;
use crate::tally::Tally;

/// Group counts keyed by cell, ordered by `(yes, size)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmpiricalTable {
    cells: BTreeMap<CellKey, u64>,
}

impl EmpiricalTable {
    /// Bin groups by cell.
    pub fn from_groups<'a>(groups: impl IntoIterator<Item = &'a Group>) -> Result<Self, AnalysisError> {
        let mut cells = BTreeMap::new();
        for group in groups {
            if group.size == 0 {
                return Err(AnalysisError::EmptyGroup {
                    name: group.name.clone(),
                });
            }
            *cells.entry(group.cell()).or_insert(0) += 1;
        }
        Ok(Self { cells })
    }

    pub fn from_tally(tally: &Tally) -> Result<Self, AnalysisError> {
        let table = Self::from_groups(tally.groups.values())?;
        debug!(
            "Built empirical table: {} cells over {} groups",
            table.len(),
            table.total_groups()
        );
        Ok(table)
    }

    pub fn get(&self, key: &CellKey) -> Option<u64> {
        self.cells.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellKey, &u64)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Sum of all cell counts (equals the number of groups tabulated).
    pub fn total_groups(&self) -> u64 {
        self.cells.values().sum()
    }
}
