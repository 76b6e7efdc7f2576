//! Empirical percentiles with linear interpolation.

/// Empirical percentile of `samples` at `q` in [0, 100].
///
/// Uses linear interpolation between closest ranks, the same scheme as
/// numpy's default `percentile` method, so credible bounds match the
/// reference implementation. Returns NaN for an empty slice.
pub fn percentile(samples: &[f64], q: f64) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q = q.clamp(0.0, 100.0);
    let pos = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn endpoints_are_min_and_max() {
        let s = [3.0, 1.0, 2.0];
        assert_eq!(percentile(&s, 0.0), 1.0);
        assert_eq!(percentile(&s, 100.0), 3.0);
    }

    #[test]
    fn median_of_even_count_interpolates() {
        let s = [1.0, 2.0, 3.0, 4.0];
        assert!(approx_eq(percentile(&s, 50.0), 2.5, 1e-12));
    }

    #[test]
    fn p10_p90_match_numpy() {
        // np.percentile([0..=10], 10) == 1.0; == 9.0 at 90.
        let s: Vec<f64> = (0..=10).map(f64::from).collect();
        assert!(approx_eq(percentile(&s, 10.0), 1.0, 1e-12));
        assert!(approx_eq(percentile(&s, 90.0), 9.0, 1e-12));
    }

    #[test]
    fn single_sample_is_its_own_percentile() {
        assert_eq!(percentile(&[7.0], 10.0), 7.0);
        assert_eq!(percentile(&[7.0], 90.0), 7.0);
    }

    #[test]
    fn empty_is_nan() {
        assert!(percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn unsorted_input_is_handled() {
        let s = [9.0, 0.0, 5.0, 2.0, 7.0];
        assert!(approx_eq(percentile(&s, 50.0), 5.0, 1e-12));
    }
}
