//! Group aggregation.
//!
//! Folds a sequence of `VoteRecord`s into one `Group` per identifier, along with
//! population-wide totals used to estimate the reference probability. The fold
//! only ever adds one, so the result does not depend on record order.

use std::collections::HashMap;

use log::info;

use crate::domain::{Group, VoteRecord};
use crate::error::AnalysisError;

/// Aggregated groups plus population totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Tally {
    pub groups: HashMap<String, Group>,
    /// Affirmative votes across all groups.
    pub total_yes: u64,
    /// All votes across all groups.
    pub total_votes: u64,
}

impl Tally {
    /// Build a tally from already-aggregated groups.
    ///
    /// Groups with duplicate names are merged. Rejects groups with no votes or
    /// with more affirmative votes than votes.
    pub fn from_groups(groups: impl IntoIterator<Item = Group>) -> Result<Self, AnalysisError> {
        let mut map: HashMap<String, Group> = HashMap::new();
        let mut total_yes = 0u64;
        let mut total_votes = 0u64;

        for group in groups {
            if group.size == 0 || group.yes > group.size {
                return Err(AnalysisError::EmptyGroup { name: group.name });
            }
            total_yes += group.yes;
            total_votes += group.size;
            map.entry(group.name.clone())
                .and_modify(|g| {
                    g.yes += group.yes;
                    g.size += group.size;
                })
                .or_insert(group);
        }

        if map.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        Ok(Self {
            groups: map,
            total_yes,
            total_votes,
        })
    }

    /// Number of distinct groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Population yes-fraction `total_yes / total_votes`.
    pub fn population_probability(&self) -> f64 {
        if self.total_votes == 0 {
            return 0.0;
        }
        self.total_yes as f64 / self.total_votes as f64
    }
}

/// Aggregate vote records into groups.
///
/// A record whose group or vote is empty is a fatal input error; nothing is
/// silently skipped.
pub fn aggregate(records: &[VoteRecord], affirmative: &str) -> Result<Tally, AnalysisError> {
    if records.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let mut groups: HashMap<String, Group> = HashMap::new();
    let mut total_yes = 0u64;
    let mut total_votes = 0u64;

    for record in records {
        if record.group.is_empty() {
            return Err(AnalysisError::MissingField {
                line: record.line,
                field: "group".to_string(),
            });
        }
        if record.vote.is_empty() {
            return Err(AnalysisError::MissingField {
                line: record.line,
                field: "vote".to_string(),
            });
        }

        let yes = u64::from(record.vote == affirmative);
        let group = groups.entry(record.group.clone()).or_insert_with(|| Group {
            name: record.group.clone(),
            yes: 0,
            size: 0,
        });
        group.yes += yes;
        group.size += 1;

        total_yes += yes;
        total_votes += 1;
    }

    info!(
        "Aggregated {total_votes} votes ({total_yes} affirmative) into {} groups",
        groups.len()
    );

    Ok(Tally {
        groups,
        total_yes,
        total_votes,
    })
}
