//! Core data structures: luminance grid, histogram and binary matrix

/// Immutable luminance grid
pub mod grid;
/// 256-bucket luminance histogram
pub mod histogram;
/// Packed foreground/background bits
pub mod matrix;

pub use grid::LumaGrid;
pub use histogram::{Histogram, LEVELS};
pub use matrix::BitMatrix;
