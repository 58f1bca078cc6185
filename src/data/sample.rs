//! Synthetic vote generation.
//!
//! Each group draws a size uniformly from `[min_size, max_size]` and a yes-count
//! from `Binomial(size, p)`. With probability `polarized_share` a group instead
//! draws from a near-unanimous binomial (`POLARIZED_P` or `1 - POLARIZED_P`),
//! which is what a polarized population looks like under this methodology.

use log::info;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Binomial;

use crate::domain::{DEFAULT_AFFIRMATIVE, VoteRecord};
use crate::error::AppError;

/// Yes-probability of a polarized group leaning "yes".
const POLARIZED_P: f64 = 0.95;

/// Token written for non-affirmative votes.
pub const NEGATIVE_TOKEN: &str = "No";

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub groups: usize,
    pub min_size: u64,
    pub max_size: u64,
    /// Yes-probability of unpolarized groups.
    pub probability: f64,
    /// Share of groups drawn from a near-unanimous distribution.
    pub polarized_share: f64,
    pub seed: u64,
    pub affirmative_token: String,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            groups: 200,
            min_size: 10,
            max_size: 10,
            probability: 0.5,
            polarized_share: 0.0,
            seed: 42,
            affirmative_token: DEFAULT_AFFIRMATIVE.to_string(),
        }
    }
}

/// Generate shuffled vote records for `config.groups` groups.
pub fn generate_votes(config: &SampleConfig) -> Result<Vec<VoteRecord>, AppError> {
    if config.groups == 0 {
        return Err(AppError::new(2, "Group count must be > 0."));
    }
    if config.min_size == 0 || config.max_size < config.min_size {
        return Err(AppError::new(2, "Invalid group size range (need 1 <= min <= max)."));
    }
    if !(0.0..=1.0).contains(&config.probability) {
        return Err(AppError::new(2, "Probability must lie in [0, 1]."));
    }
    if !(0.0..=1.0).contains(&config.polarized_share) {
        return Err(AppError::new(2, "Polarized share must lie in [0, 1]."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut records = Vec::new();

    for g in 0..config.groups {
        let size = rng.gen_range(config.min_size..=config.max_size);
        let p = if rng.gen_bool(config.polarized_share) {
            if rng.gen_bool(0.5) { POLARIZED_P } else { 1.0 - POLARIZED_P }
        } else {
            config.probability
        };
        let dist = Binomial::new(size, p)
            .map_err(|e| AppError::new(4, format!("Binomial distribution error: {e}")))?;
        let yes = dist.sample(&mut rng);

        let name = format!("G{:04}", g + 1);
        for v in 0..size {
            let vote = if v < yes {
                config.affirmative_token.as_str()
            } else {
                NEGATIVE_TOKEN
            };
            records.push(VoteRecord::new(0, name.clone(), vote));
        }
    }

    // Interleave groups the way a real poll export would.
    records.shuffle(&mut rng);
    for (idx, r) in records.iter_mut().enumerate() {
        r.line = idx + 2;
    }

    info!(
        "Generated {} votes across {} groups (p={}, polarized_share={})",
        records.len(),
        config.groups,
        config.probability,
        config.polarized_share
    );
    Ok(records)
}
