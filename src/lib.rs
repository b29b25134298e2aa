//! rust_otsu - global Otsu binarization of raster images
//!
//! Converts an image to 8-bit luminance, picks the threshold that maximizes
//! the between-class variance of dark and light pixels, and re-encodes the
//! result as a black/white image.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Decode, binarize and encode through the `image` crate
pub mod codec;
/// Pipeline options and environment overrides
pub mod config;
/// Codec boundary errors
pub mod error;
/// Core data structures (LumaGrid, Histogram, BitMatrix)
pub mod models;
/// Luminance conversion, Otsu threshold search and binarization
pub mod utils;

pub use codec::{Binarization, binarize, binarize_image, binarize_with_options};
pub use config::{BinarizeOptions, OutputFormat};
pub use error::{BinarizeError, Result};
pub use models::{BitMatrix, Histogram, LumaGrid};
pub use utils::binarization::{otsu_binarize, threshold_binarize};
pub use utils::luminance::{rgb_to_luminance, rgba_to_luminance};
pub use utils::otsu::{compute_threshold, threshold_from_histogram};
