//! Z-score normalization against running feature statistics.

use super::feature::{FeatureVector, NUM_FEATURES};
use super::stats::FeatureStats;

/// Lower bound on the standard deviation used as a divisor.
pub const STD_EPSILON: f64 = 1e-6;

/// Normalized values are clipped to `[-NORMALIZED_CLIP, NORMALIZED_CLIP]`.
pub const NORMALIZED_CLIP: f64 = 10.0;

/// Z-score `vector` against `stats`, clipping every dimension.
///
/// Non-finite inputs (and non-finite statistics) normalize to 0.
#[must_use]
pub fn normalize(vector: &FeatureVector, stats: &FeatureStats) -> FeatureVector {
    let mut out = [0.0; NUM_FEATURES];

    for (i, slot) in out.iter_mut().enumerate() {
        let x = vector[i];
        let mean = stats.means[i];
        let std = stats.stds[i];
        if !x.is_finite() || !mean.is_finite() || std.is_nan() {
            continue;
        }

        let z = (x - mean) / std.max(STD_EPSILON);
        *slot = if z.is_finite() {
            z.clamp(-NORMALIZED_CLIP, NORMALIZED_CLIP)
        } else {
            0.0
        };
    }

    FeatureVector::new(out)
}
