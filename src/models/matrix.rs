//! Bit-packed binary matrix

use image::GrayImage;

/// Compact bit matrix holding a binarized image
///
/// `true` marks a foreground (white) cell, `false` a background (black) one.
/// Each row starts on a byte boundary so rows can be filled independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new all-background matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let stride = width.div_ceil(8);
        Self {
            width,
            height,
            stride,
            data: vec![0; stride * height],
        }
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per packed row
    pub fn row_stride(&self) -> usize {
        self.stride
    }

    /// Get bit at (x, y); out of bounds reads as background
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.data[y * self.stride + x / 8];
        (byte >> (x % 8)) & 1 == 1
    }

    /// Set bit at (x, y); out of bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        set_row_bit(&mut self.data[y * self.stride..(y + 1) * self.stride], x, value);
    }

    /// Number of foreground cells
    pub fn count_foreground(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Get raw packed rows as bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable packed rows, `row_stride()` bytes each
    pub(crate) fn rows_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Expand to an 8-bit image with foreground at 255 and background at 0
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let level = if self.get(x as usize, y as usize) { 255 } else { 0 };
            image::Luma([level])
        })
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[inline]
pub(crate) fn set_row_bit(row: &mut [u8], x: usize, value: bool) {
    let mask = 1u8 << (x % 8);
    if value {
        row[x / 8] |= mask;
    } else {
        row[x / 8] &= !mask;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut m = BitMatrix::new(10, 3);
        assert_eq!(m.row_stride(), 2);
        m.set(9, 2, true);
        m.set(0, 1, true);
        assert!(m.get(9, 2));
        assert!(m.get(0, 1));
        assert!(!m.get(8, 2));
        assert_eq!(m.count_foreground(), 2);

        m.set(9, 2, false);
        assert!(!m.get(9, 2));
        assert_eq!(m.count_foreground(), 1);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut m = BitMatrix::new(3, 3);
        m.set(3, 0, true);
        m.set(0, 3, true);
        assert_eq!(m.count_foreground(), 0);
        assert!(!m.get(100, 100));
    }

    #[test]
    fn test_empty_matrix() {
        let m = BitMatrix::default();
        assert_eq!(m.as_bytes().len(), 0);
        assert_eq!(m.to_gray_image().dimensions(), (0, 0));
    }

    #[test]
    fn test_to_gray_image() {
        let mut m = BitMatrix::new(2, 1);
        m.set(1, 0, true);
        let img = m.to_gray_image();
        assert_eq!(img.get_pixel(0, 0).0[0], 0);
        assert_eq!(img.get_pixel(1, 0).0[0], 255);
    }
}
