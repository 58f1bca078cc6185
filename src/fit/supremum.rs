//! Robust supremum of the over-representation ratios.
//!
//! Taking the plain maximum lets a single sparse cell with a huge ratio set the
//! scale. Instead we:
//!
//! 1. sort the ratios in descending order
//! 2. take the gaps between neighbours (`sorted[i+1] - sorted[i]`)
//! 3. z-score the gaps
//! 4. keep `sorted[i]` when its gap has `|z| <= 2`, and always keep the smallest ratio
//! 5. return the largest kept ratio
//!
//! A ratio is dropped when the jump down to its neighbour is abnormally large
//! compared with the other jumps, which is not the same as trimming on the
//! ratio values themselves.
//!
//! When the gaps have no spread (exactly two ratios, or evenly spaced ratios)
//! the z-scores are undefined, nothing passes the cutoff, and `M` falls back to
//! the smallest ratio.

use log::debug;

use crate::error::AnalysisError;
use crate::math::z_scores;

/// Gaps with `|z|` above this are treated as outlier jumps.
pub const GAP_Z_CUTOFF: f64 = 2.0;

/// Ratios surviving the gap trim, in descending order.
///
/// The smallest ratio is always last. Undefined (`NaN`) gap scores never pass
/// the cutoff.
pub fn retained_ratios(ratios: &[f64]) -> Vec<f64> {
    let mut sorted = ratios.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let gaps: Vec<f64> = sorted.windows(2).map(|w| w[1] - w[0]).collect();
    let z = z_scores(&gaps);

    let mut kept: Vec<f64> = sorted
        .iter()
        .zip(&z)
        .filter(|(_, z)| z.abs() <= GAP_Z_CUTOFF)
        .map(|(r, _)| *r)
        .collect();
    if let Some(&last) = sorted.last() {
        kept.push(last);
    }
    kept
}

/// Robust scale factor `M` from the over-representation ratios.
///
/// Needs at least two ratios; with fewer there are no gaps to judge.
pub fn supremum(ratios: &[f64]) -> Result<f64, AnalysisError> {
    if ratios.len() < 2 {
        return Err(AnalysisError::InsufficientModes { ratios: ratios.len() });
    }

    let kept = retained_ratios(ratios);
    debug!("Supremum: kept {} of {} ratios: {:?}", kept.len(), ratios.len(), kept);

    let m = kept.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isolated_top_ratio_is_trimmed() {
        let ratios = [4.0, 4.8, 100.0, 4.2, 5.0, 4.4, 4.6];
        let m = supremum(&ratios).unwrap();
        assert!((m - 5.0).abs() < 1e-12);

        let naive = ratios.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(m < naive);
    }

    #[test]
    fn removing_an_isolated_outlier_changes_the_supremum() {
        let with_outlier = [1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 40.0];
        let without_outlier = [1.0, 1.5, 2.0, 2.5, 3.0, 3.5];

        // Gap 36.5 against five gaps of 0.5: z ~= -2.24, so 40.0 is trimmed.
        let with = supremum(&with_outlier).unwrap();
        assert!((with - 3.5).abs() < 1e-12);

        // Equal gaps have no spread, so only the smallest ratio survives.
        let without = supremum(&without_outlier).unwrap();
        assert!((without - 1.0).abs() < 1e-12);

        assert!((with - without).abs() > 1e-9);
    }

    #[test]
    fn evenly_spaced_ratios_fall_back_to_the_smallest() {
        let ratios = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((supremum(&ratios).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(retained_ratios(&ratios), vec![1.0]);
    }

    #[test]
    fn two_ratios_keep_only_the_smaller() {
        let m = supremum(&[1.5, 3.0]).unwrap();
        assert!((m - 1.5).abs() < 1e-12);

        // Two-group scenario: 1 / 0.205839 and 1 / 0.242122.
        let m = supremum(&[1.0 / 0.205839, 1.0 / 0.242122]).unwrap();
        assert!((m - 4.1302).abs() < 1e-4);
    }

    #[test]
    fn smallest_ratio_is_always_kept() {
        let kept = retained_ratios(&[9.0, 8.9, 8.8, 8.7, 8.6, 1.0]);
        assert_eq!(kept.last().copied(), Some(1.0));
    }

    #[test]
    fn supremum_is_bounded_by_inputs() {
        let lists: [&[f64]; 4] = [
            &[1.2, 1.1, 7.0, 1.3, 1.25, 1.15, 1.05],
            &[2.0, 2.0, 2.0],
            &[10.0, 1.0],
            &[3.3, 1.7, 2.9, 2.2, 1.1, 40.0, 2.5, 2.0, 1.9],
        ];
        for ratios in lists {
            let kept = retained_ratios(ratios);
            let m = supremum(ratios).unwrap();
            let min_kept = kept.iter().copied().fold(f64::INFINITY, f64::min);
            let max_in = ratios.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            assert!(m >= min_kept && m <= max_in, "ratios={ratios:?} m={m}");
        }
    }

    #[test]
    fn fewer_than_two_ratios_is_an_error() {
        assert_eq!(
            supremum(&[]).unwrap_err(),
            AnalysisError::InsufficientModes { ratios: 0 }
        );
        assert_eq!(
            supremum(&[3.0]).unwrap_err(),
            AnalysisError::InsufficientModes { ratios: 1 }
        );
    }
}
