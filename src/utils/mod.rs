//! Image processing passes
//!
//! - Luminance conversion (RGB/RGBA to 8-bit luminance)
//! - Otsu threshold search over a 256-bucket histogram
//! - Threshold binarization into a BitMatrix

/// Threshold binarization
pub mod binarization;
/// RGB(A) to luminance conversion
pub mod luminance;
/// Otsu threshold search
pub mod otsu;
