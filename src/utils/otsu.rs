//! Otsu's global threshold selection
//!
//! Scans candidate thresholds in increasing order and keeps the level that
//! maximizes the between-class variance `wB * wF * (mB - mF)^2`, where the
//! background class holds every sample `<= t`.

use crate::models::{Histogram, LumaGrid};
use tracing::trace;

/// Outcome of a threshold search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OtsuResult {
    /// Selected threshold; samples above it are foreground
    pub threshold: u8,
    /// Between-class variance at `threshold` (0.0 when nothing was scored)
    pub between_class_variance: f64,
}

/// Compute the Otsu threshold of a luminance grid
pub fn compute_threshold(grid: &LumaGrid) -> u8 {
    otsu(&Histogram::from_grid(grid)).threshold
}

/// Same as [`compute_threshold`] with a row-parallel histogram
pub fn compute_threshold_parallel(grid: &LumaGrid) -> u8 {
    otsu(&Histogram::from_grid_parallel(grid)).threshold
}

/// Compute the Otsu threshold of a histogram
pub fn threshold_from_histogram(histogram: &Histogram) -> u8 {
    otsu(histogram).threshold
}

/// Run the variance search over a histogram
///
/// The first level reaching the maximum wins ties. A constant or empty
/// histogram yields threshold 0 with variance 0.
pub fn otsu(histogram: &Histogram) -> OtsuResult {
    let counts = histogram.counts();
    let total = histogram.total();
    let sum = histogram.weighted_sum();

    let mut weight_bg = 0u128;
    let mut sum_bg = 0u128;
    let mut best = OtsuResult {
        threshold: 0,
        between_class_variance: 0.0,
    };

    for (level, &count) in counts.iter().enumerate() {
        weight_bg += count as u128;
        if weight_bg == 0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0 {
            break;
        }

        sum_bg += level as u128 * count as u128;

        let mean_bg = sum_bg as f64 / weight_bg as f64;
        let mean_fg = (sum - sum_bg) as f64 / weight_fg as f64;
        let diff = mean_bg - mean_fg;
        let between = weight_bg as f64 * weight_fg as f64 * diff * diff;

        if between > best.between_class_variance {
            best = OtsuResult {
                threshold: level as u8,
                between_class_variance: between,
            };
        }
    }

    trace!(
        total = %total,
        threshold = best.threshold,
        variance = best.between_class_variance,
        "otsu search complete"
    );
    best
}
