//! Standard scores.
//!
//! Uses the population standard deviation (divide by `n`), so a sequence of
//! length one always has zero spread.

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation, or `None` for an empty slice.
pub fn population_std(values: &[f64]) -> Option<f64> {
    let mu = mean(values)?;
    let var = values.iter().map(|v| (v - mu) * (v - mu)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// `(x - mean) / std` for each value.
///
/// When the values have no spread the score is undefined and every entry is
/// `NaN`, so any `|z| <= cutoff` test on it fails.
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    let (Some(mu), Some(sigma)) = (mean(values), population_std(values)) else {
        return Vec::new();
    };
    if !(sigma.is_finite() && sigma > f64::EPSILON * mu.abs().max(1.0)) {
        return vec![f64::NAN; values.len()];
    }
    values.iter().map(|v| (v - mu) / sigma).collect()
}
