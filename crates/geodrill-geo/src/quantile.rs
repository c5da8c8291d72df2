//! Quantile colour scale
//!
//! Mirrors d3's `scaleQuantile`: the sorted sample is cut into `n` groups of
//! roughly equal population, and a value maps to the group it falls in.

/// Sample used when there is nothing positive to bucket
const FALLBACK_DOMAIN: [f64; 2] = [0.0, 1.0];

#[derive(Debug, Clone, PartialEq)]
pub struct QuantileScale {
    domain: Vec<f64>,
    thresholds: Vec<f64>,
}

impl QuantileScale {
    /// Build a scale with `buckets` output classes.
    ///
    /// Only finite, strictly positive values join the sample, so regions with
    /// no data never pull the boundaries down.
    pub fn new<I>(values: I, buckets: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut domain: Vec<f64> =
            values.into_iter().filter(|v| v.is_finite() && *v > 0.0).collect();
        if domain.is_empty() {
            domain = FALLBACK_DOMAIN.to_vec();
        }
        domain.sort_by(f64::total_cmp);

        let buckets = buckets.max(1);
        let thresholds = (1..buckets)
            .map(|i| quantile_sorted(&domain, i as f64 / buckets as f64))
            .collect();

        Self { domain, thresholds }
    }

    /// Output class for a value, in `0..buckets`
    pub fn bucket(&self, value: f64) -> usize {
        self.thresholds.partition_point(|t| *t <= value)
    }

    /// Interior class boundaries, ascending
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Number of output classes
    pub fn buckets(&self) -> usize {
        self.thresholds.len() + 1
    }

    /// Sorted sample the boundaries were computed from
    pub fn domain(&self) -> &[f64] {
        &self.domain
    }
}

/// R-7 quantile (linear interpolation between closest ranks) of a sorted, non-empty slice
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n < 2 || p <= 0.0 {
        return sorted[0];
    }
    if p >= 1.0 {
        return sorted[n - 1];
    }
    let i = (n - 1) as f64 * p;
    let i0 = i.floor() as usize;
    let lower = sorted[i0];
    let upper = sorted[i0 + 1];
    lower + (upper - lower) * (i - i0 as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_thresholds_match_linear_quantiles() {
        // Four buckets over 1..=5: quartiles at 2, 3, 4
        let scale = QuantileScale::new([5.0, 1.0, 3.0, 2.0, 4.0], 4);
        assert_eq!(scale.thresholds(), &[2.0, 3.0, 4.0]);
        assert_eq!(scale.bucket(1.0), 0);
        assert_eq!(scale.bucket(1.99), 0);
        assert_eq!(scale.bucket(2.0), 1);
        assert_eq!(scale.bucket(3.5), 2);
        assert_eq!(scale.bucket(5.0), 3);
        assert_eq!(scale.bucket(1_000.0), 3);
    }

    #[test]
    fn test_interpolates_between_ranks() {
        let scale = QuantileScale::new([10.0, 20.0], 2);
        assert_eq!(scale.thresholds(), &[15.0]);
    }

    #[test]
    fn test_zeros_excluded_from_domain() {
        let scale = QuantileScale::new([0.0, 0.0, 0.0, 8.0, 2.0], 3);
        assert_eq!(scale.domain(), &[2.0, 8.0]);
    }

    #[test]
    fn test_empty_positive_sample_falls_back() {
        let scale = QuantileScale::new([0.0, 0.0], 9);
        assert_eq!(scale.domain(), &FALLBACK_DOMAIN);
        assert_eq!(scale.buckets(), 9);
        assert!(scale.bucket(0.5) < 9);

        let empty = QuantileScale::new(std::iter::empty(), 9);
        assert_eq!(empty.domain(), &FALLBACK_DOMAIN);
    }

    #[test]
    fn test_single_bucket() {
        let scale = QuantileScale::new([3.0, 7.0], 1);
        assert!(scale.thresholds().is_empty());
        assert_eq!(scale.bucket(100.0), 0);

        let zero = QuantileScale::new([3.0], 0);
        assert_eq!(zero.buckets(), 1);
    }

    proptest! {
        #[test]
        fn prop_zero_entries_do_not_move_boundaries(
            positives in prop::collection::vec(1u64..1_000_000, 1..40),
            zeros in 0usize..40,
        ) {
            let plain = QuantileScale::new(positives.iter().map(|v| *v as f64), 9);
            let padded = QuantileScale::new(
                positives.iter().map(|v| *v as f64).chain(std::iter::repeat(0.0).take(zeros)),
                9,
            );
            prop_assert_eq!(plain.thresholds(), padded.thresholds());
            for v in &positives {
                prop_assert_eq!(plain.bucket(*v as f64), padded.bucket(*v as f64));
            }
        }

        #[test]
        fn prop_bucket_is_monotonic(
            sample in prop::collection::vec(1u64..10_000, 1..30),
            a in 0u64..20_000,
            b in 0u64..20_000,
        ) {
            let scale = QuantileScale::new(sample.iter().map(|v| *v as f64), 9);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(scale.bucket(lo as f64) <= scale.bucket(hi as f64));
            prop_assert!(scale.bucket(hi as f64) < 9);
        }
    }
}
