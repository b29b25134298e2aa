//! Immutable 8-bit luminance grid

use image::{GrayImage, Luma};

/// Row-major grid of 8-bit luminance samples
///
/// Immutable once built; the converter and thresholding passes only read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaGrid {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl LumaGrid {
    /// Create a grid with every cell set to `fill`
    pub fn new(width: usize, height: usize, fill: u8) -> Self {
        Self {
            width,
            height,
            data: vec![fill; width * height],
        }
    }

    /// Wrap existing samples; returns `None` unless `data.len() == width * height`
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap a buffer the caller allocated as `width * height` samples
    pub(crate) fn from_buffer(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Take ownership of an 8-bit grayscale image
    pub fn from_gray_image(img: GrayImage) -> Self {
        let (w, h) = img.dimensions();
        Self {
            width: w as usize,
            height: h as usize,
            data: img.into_raw(),
        }
    }

    /// Grid width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells (`width * height`)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a grid with no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample at (x, y)
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }

    /// All samples in row-major order
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks(0) panics, and a zero-width grid has no samples anyway
        self.data.chunks(self.width.max(1))
    }

    /// Copy into an 8-bit grayscale image
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            Luma([self.data[y as usize * self.width + x as usize]])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_checks_length() {
        assert!(LumaGrid::from_raw(2, 2, vec![0; 3]).is_none());
        let grid = LumaGrid::from_raw(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(grid.get(1, 1), Some(4));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_rows() {
        let grid = LumaGrid::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let rows: Vec<&[u8]> = grid.rows().collect();
        assert_eq!(rows, vec![&[1, 2, 3][..], &[4, 5, 6][..]]);
    }

    #[test]
    fn test_empty_grid() {
        let grid = LumaGrid::new(0, 0, 0);
        assert!(grid.is_empty());
        assert_eq!(grid.rows().count(), 0);
        assert_eq!(grid.to_gray_image().dimensions(), (0, 0));
    }

    #[test]
    fn test_gray_image_round_trip() {
        let grid = LumaGrid::from_raw(2, 1, vec![7, 9]).unwrap();
        let back = LumaGrid::from_gray_image(grid.to_gray_image());
        assert_eq!(back, grid);
    }
}
