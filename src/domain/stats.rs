//! Streaming per-feature statistics.
//!
//! Statistics are folded in one vector at a time using Welford's online
//! algorithm and are never recomputed from history. Each dimension keeps its
//! own observation count so that a non-finite value in one dimension skips
//! only that dimension.

use super::feature::{FeatureVector, NUM_FEATURES};

/// Running mean, standard deviation, and range for every feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureStats {
    /// Number of vectors folded in.
    pub count: u64,
    /// Finite observations per dimension.
    pub dim_counts: [u64; NUM_FEATURES],
    pub means: [f64; NUM_FEATURES],
    pub stds: [f64; NUM_FEATURES],
    pub mins: [f64; NUM_FEATURES],
    pub maxs: [f64; NUM_FEATURES],
    /// Sum of squared deviations from the running mean.
    pub m2s: [f64; NUM_FEATURES],
}

impl FeatureStats {
    /// Statistics with no observations.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            count: 0,
            dim_counts: [0; NUM_FEATURES],
            means: [0.0; NUM_FEATURES],
            stds: [0.0; NUM_FEATURES],
            mins: [0.0; NUM_FEATURES],
            maxs: [0.0; NUM_FEATURES],
            m2s: [0.0; NUM_FEATURES],
        }
    }

    /// Fold one vector into the running statistics.
    pub fn update(&mut self, vector: &FeatureVector) {
        self.count += 1;

        for (i, &x) in vector.iter().enumerate() {
            if !x.is_finite() {
                continue;
            }

            let n = self.dim_counts[i] + 1;
            self.dim_counts[i] = n;

            if n == 1 {
                self.mins[i] = x;
                self.maxs[i] = x;
            } else {
                self.mins[i] = self.mins[i].min(x);
                self.maxs[i] = self.maxs[i].max(x);
            }

            let delta = x - self.means[i];
            self.means[i] += delta / n as f64;
            let delta2 = x - self.means[i];
            self.m2s[i] += delta * delta2;

            self.stds[i] = if n < 2 {
                0.0
            } else {
                (self.m2s[i] / (n - 1) as f64).sqrt()
            };
        }
    }

    /// Fold a batch of vectors in order.
    pub fn update_all<'a>(&mut self, vectors: impl IntoIterator<Item = &'a FeatureVector>) {
        for vector in vectors {
            self.update(vector);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for FeatureStats {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector_with(first: f64, second: f64) -> FeatureVector {
        let mut values = [0.0; NUM_FEATURES];
        values[0] = first;
        values[1] = second;
        FeatureVector::new(values)
    }

    #[test]
    fn empty_stats_have_zero_count() {
        let stats = FeatureStats::empty();
        assert!(stats.is_empty());
        assert_eq!(stats.means, [0.0; NUM_FEATURES]);
    }

    #[test]
    fn tracks_mean_std_and_range() {
        let mut stats = FeatureStats::empty();
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.update(&vector_with(x, 1.0));
        }

        assert_eq!(stats.count, 8);
        assert!((stats.means[0] - 5.0).abs() < 1e-12);
        // Sample variance of the series is 32 / 7.
        assert!((stats.stds[0] - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(stats.mins[0], 2.0);
        assert_eq!(stats.maxs[0], 9.0);
        assert_eq!(stats.stds[1], 0.0);
    }

    #[test]
    fn negative_values_set_range_from_first_observation() {
        let mut stats = FeatureStats::empty();
        stats.update(&vector_with(-3.0, 0.0));
        stats.update(&vector_with(-1.0, 0.0));

        assert_eq!(stats.mins[0], -3.0);
        assert_eq!(stats.maxs[0], -1.0);
    }

    #[test]
    fn non_finite_value_skips_only_its_dimension() {
        let mut stats = FeatureStats::empty();
        stats.update(&vector_with(1.0, 1.0));
        stats.update(&vector_with(f64::NAN, 3.0));
        stats.update(&vector_with(3.0, f64::INFINITY));

        assert_eq!(stats.count, 3);
        assert_eq!(stats.dim_counts[0], 2);
        assert_eq!(stats.dim_counts[1], 2);
        assert!((stats.means[0] - 2.0).abs() < 1e-12);
        assert!((stats.means[1] - 2.0).abs() < 1e-12);
        assert!(stats.means.iter().all(|m| m.is_finite()));
        assert!(stats.stds.iter().all(|s| s.is_finite()));
    }
}
