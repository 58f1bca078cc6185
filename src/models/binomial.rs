//! Binomial reference model (the "non-polarized ideal").
//!
//! A group of `n` voters drawn from a population with yes-probability `p` has
//! `k` yes votes with probability `C(n, k) p^k (1-p)^(n-k)`. `p` is fixed once
//! per run; `n` and `k` vary per cell.

use statrs::distribution::{Binomial, Discrete};

use crate::domain::{AnalysisConfig, CellKey, ProbabilitySource};
use crate::error::AnalysisError;
use crate::tally::Tally;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceModel {
    p: f64,
    source: ProbabilitySource,
}

impl ReferenceModel {
    /// Create a model, rejecting `p` outside `[0, 1]` (including NaN).
    pub fn new(p: f64, source: ProbabilitySource) -> Result<Self, AnalysisError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(AnalysisError::InvalidProbability(p));
        }
        Ok(Self { p, source })
    }

    /// Use the supplied probability if any, else the population yes-fraction.
    pub fn from_config(tally: &Tally, config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        match config.true_probability {
            Some(p) => Self::new(p, ProbabilitySource::Supplied),
            None => {
                if tally.total_votes == 0 {
                    return Err(AnalysisError::EmptyInput);
                }
                Self::new(tally.population_probability(), ProbabilitySource::Population)
            }
        }
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn source(&self) -> ProbabilitySource {
        self.source
    }

    /// `P(X = key.yes)` for `X ~ Binomial(key.size, p)`.
    ///
    /// `p = 0` and `p = 1` put all mass on `k = 0` and `k = n` respectively.
    pub fn pmf(&self, key: CellKey) -> Result<f64, AnalysisError> {
        if key.size == 0 {
            return Err(AnalysisError::EmptyCell { key });
        }
        let dist = Binomial::new(self.p, key.size).map_err(|_| AnalysisError::InvalidProbability(self.p))?;
        Ok(dist.pmf(key.yes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(p: f64) -> ReferenceModel {
        ReferenceModel::new(p, ProbabilitySource::Supplied).unwrap()
    }

    #[test]
    fn pmf_matches_known_values() {
        let m = model(0.7);
        let a = m.pmf(CellKey::new(5, 10)).unwrap();
        let b = m.pmf(CellKey::new(9, 10)).unwrap();
        assert!((a - 0.102919).abs() < 1e-5);
        assert!((b - 0.121061).abs() < 1e-5);
    }

    #[test]
    fn pmf_sums_to_one_and_stays_in_bounds() {
        for &p in &[0.0, 0.13, 0.5, 0.82, 1.0] {
            let m = model(p);
            for n in 1..=25u64 {
                let mut total = 0.0;
                for k in 0..=n {
                    let v = m.pmf(CellKey::new(k, n)).unwrap();
                    assert!((0.0..=1.0).contains(&v));
                    total += v;
                }
                assert!((total - 1.0).abs() < 1e-9, "p={p} n={n} total={total}");
            }
        }
    }

    #[test]
    fn degenerate_probabilities_concentrate_mass() {
        assert_eq!(model(0.0).pmf(CellKey::new(0, 8)).unwrap(), 1.0);
        assert_eq!(model(0.0).pmf(CellKey::new(3, 8)).unwrap(), 0.0);
        assert_eq!(model(1.0).pmf(CellKey::new(8, 8)).unwrap(), 1.0);
        assert_eq!(model(1.0).pmf(CellKey::new(7, 8)).unwrap(), 0.0);
    }

    #[test]
    fn invalid_probability_is_rejected() {
        for p in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                ReferenceModel::new(p, ProbabilitySource::Supplied),
                Err(AnalysisError::InvalidProbability(_))
            ));
        }
    }

    #[test]
    fn zero_size_cell_is_rejected() {
        let err = model(0.5).pmf(CellKey::new(0, 0)).unwrap_err();
        assert_eq!(err, AnalysisError::EmptyCell { key: CellKey::new(0, 0) });
    }

    #[test]
    fn from_config_prefers_supplied_probability() {
        let tally = Tally::from_groups(vec![crate::domain::Group {
            name: "A".to_string(),
            yes: 1,
            size: 4,
        }])
        .unwrap();

        let estimated = ReferenceModel::from_config(&tally, &AnalysisConfig::default()).unwrap();
        assert!((estimated.p() - 0.25).abs() < 1e-12);
        assert_eq!(estimated.source(), ProbabilitySource::Population);

        let config = AnalysisConfig {
            true_probability: Some(0.6),
            ..AnalysisConfig::default()
        };
        let supplied = ReferenceModel::from_config(&tally, &config).unwrap();
        assert!((supplied.p() - 0.6).abs() < 1e-12);
        assert_eq!(supplied.source(), ProbabilitySource::Supplied);
    }
}
