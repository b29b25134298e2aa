use crate::models::matrix::set_row_bit;
use crate::models::{BitMatrix, LumaGrid};
use crate::utils::otsu::compute_threshold;
use rayon::prelude::*;

/// Binarize with Otsu's threshold
/// Returns the threshold and a BitMatrix where true = foreground (white)
pub fn otsu_binarize(gray: &LumaGrid) -> (u8, BitMatrix) {
    let threshold = compute_threshold(gray);
    (threshold, threshold_binarize(gray, threshold))
}

/// Simple global threshold binarization
///
/// A cell is foreground iff its luminance is strictly greater than `threshold`.
pub fn threshold_binarize(gray: &LumaGrid, threshold: u8) -> BitMatrix {
    let mut binary = BitMatrix::new(gray.width(), gray.height());

    for (y, row) in gray.rows().enumerate() {
        for (x, &lum) in row.iter().enumerate() {
            binary.set(x, y, lum > threshold);
        }
    }

    binary
}

/// Threshold binarization with rows filled in parallel
pub fn threshold_binarize_parallel(gray: &LumaGrid, threshold: u8) -> BitMatrix {
    let mut binary = BitMatrix::new(gray.width(), gray.height());
    let stride = binary.row_stride();
    if stride == 0 || gray.is_empty() {
        return binary;
    }

    binary
        .rows_mut()
        .par_chunks_mut(stride)
        .zip(gray.as_slice().par_chunks(gray.width()))
        .for_each(|(bits, row)| {
            for (x, &lum) in row.iter().enumerate() {
                if lum > threshold {
                    set_row_bit(bits, x, true);
                }
            }
        });

    binary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: usize, height: usize, data: &[u8]) -> LumaGrid {
        LumaGrid::from_raw(width, height, data.to_vec()).unwrap()
    }

    #[test]
    fn test_threshold_binarize() {
        let gray = grid(2, 2, &[100, 150, 200, 128]);
        let binary = threshold_binarize(&gray, 128);

        // Pixels > 128 are foreground
        assert!(!binary.get(0, 0)); // 100
        assert!(binary.get(1, 0)); // 150
        assert!(binary.get(0, 1)); // 200
        assert!(!binary.get(1, 1)); // 128 is not > 128
    }

    #[test]
    fn test_otsu_binarize() {
        // Create a simple two-class image
        let mut data = vec![50u8; 50]; // Dark class
        data.extend(vec![200u8; 50]); // Light class

        let (threshold, binary) = otsu_binarize(&grid(10, 10, &data));

        assert_eq!(threshold, 50);
        // Top half background, bottom half foreground
        assert!(!binary.get(0, 0));
        assert!(binary.get(0, 7));
        assert_eq!(binary.count_foreground(), 50);
    }

    #[test]
    fn test_all_white_is_foreground() {
        let (threshold, binary) = otsu_binarize(&LumaGrid::new(3, 3, 255));
        assert_eq!(threshold, 0);
        assert_eq!(binary.count_foreground(), 9);
    }

    #[test]
    fn test_all_black_is_background() {
        let (threshold, binary) = otsu_binarize(&LumaGrid::new(3, 3, 0));
        assert_eq!(threshold, 0);
        assert_eq!(binary.count_foreground(), 0);
    }

    #[test]
    fn test_rebinarize_is_idempotent() {
        let levels = [0u8, 255, 255, 0, 0, 0, 255, 0, 255, 255, 0, 0];
        let (first_t, first) = otsu_binarize(&grid(4, 3, &levels));
        assert_eq!(first_t, 0);
        for (i, &lum) in levels.iter().enumerate() {
            assert_eq!(first.get(i % 4, i / 4), lum == 255);
        }

        let again = LumaGrid::from_gray_image(first.to_gray_image());
        let (_, second) = otsu_binarize(&again);
        assert_eq!(second, first);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (w, h) = (29, 17);
        let data: Vec<u8> = (0..w * h).map(|i| (i * 37 % 256) as u8).collect();
        let gray = grid(w, h, &data);
        for t in [0u8, 77, 128, 254, 255] {
            assert_eq!(threshold_binarize_parallel(&gray, t), threshold_binarize(&gray, t));
        }
    }

    #[test]
    fn test_empty_grid() {
        let (threshold, binary) = otsu_binarize(&LumaGrid::new(0, 0, 0));
        assert_eq!(threshold, 0);
        assert_eq!(binary.width(), 0);
        assert_eq!(threshold_binarize_parallel(&LumaGrid::new(0, 3, 0), 0).height(), 3);
    }
}
