//! 256-bucket luminance histogram

use super::LumaGrid;
use rayon::prelude::*;

/// Number of luminance levels
pub const LEVELS: usize = 256;

/// 256-bucket luminance histogram
///
/// `count(i)` is the number of samples with luminance exactly `i`, so
/// `total()` equals the number of samples the histogram was built from.
/// Totals are returned as `u128` so any `[u64; 256]` of counts sums exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; LEVELS],
}

impl Histogram {
    /// Build from raw counts (for synthetic or rescaled distributions)
    pub fn from_counts(counts: [u64; LEVELS]) -> Self {
        Self { counts }
    }

    /// Count every sample in a slice
    pub fn from_samples(samples: &[u8]) -> Self {
        let mut counts = [0u64; LEVELS];
        for &s in samples {
            counts[s as usize] += 1;
        }
        Self { counts }
    }

    /// Count every cell of a grid
    pub fn from_grid(grid: &LumaGrid) -> Self {
        Self::from_samples(grid.as_slice())
    }

    /// Count a grid with one partial histogram per row, merged afterwards
    pub fn from_grid_parallel(grid: &LumaGrid) -> Self {
        if grid.is_empty() {
            return Self::from_counts([0; LEVELS]);
        }
        let counts = grid
            .as_slice()
            .par_chunks(grid.width())
            .fold(
                || [0u64; LEVELS],
                |mut acc, row| {
                    for &s in row {
                        acc[s as usize] += 1;
                    }
                    acc
                },
            )
            .reduce(
                || [0u64; LEVELS],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b.iter()) {
                        *x += y;
                    }
                    a
                },
            );
        Self { counts }
    }

    /// Count at one level
    pub fn count(&self, level: u8) -> u64 {
        self.counts[level as usize]
    }

    /// All bucket counts
    pub fn counts(&self) -> &[u64; LEVELS] {
        &self.counts
    }

    /// Total number of samples
    pub fn total(&self) -> u128 {
        self.counts.iter().map(|&c| c as u128).sum()
    }

    /// Sum of `level * count(level)` over all levels
    pub fn weighted_sum(&self) -> u128 {
        self.counts
            .iter()
            .enumerate()
            .map(|(level, &c)| level as u128 * c as u128)
            .sum()
    }
}
