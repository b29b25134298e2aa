//! Decode, binarize and re-encode raster images
//!
//! The `image` crate does the decoding and encoding; everything in between
//! is the infallible luminance, Otsu and threshold passes.

use crate::config::{BinarizeOptions, OutputFormat};
use crate::error::{BinarizeError, Result};
use crate::models::{BitMatrix, LumaGrid};
use crate::utils::binarization::{threshold_binarize, threshold_binarize_parallel};
use crate::utils::luminance::{rgba_to_luminance, rgba_to_luminance_parallel};
use crate::utils::otsu::{compute_threshold, compute_threshold_parallel};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, DynamicImage, GenericImageView, ImageEncoder, ImageError};
use std::io::{Read, Write};
use tracing::debug;

/// Threshold and binary matrix for one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binarization {
    /// Otsu threshold; luminance above it is foreground
    pub threshold: u8,
    /// Foreground (white) / background (black) cells
    pub matrix: BitMatrix,
}

/// Decode an image, binarize it with Otsu's threshold and write it as JPEG
///
/// Options come from [`BinarizeOptions::default`], so environment overrides
/// apply. Returns the threshold that was used.
pub fn binarize<R: Read, W: Write>(reader: R, writer: W) -> Result<u8> {
    binarize_with_options(reader, writer, &BinarizeOptions::default())
}

/// Like [`binarize`] with explicit options
///
/// Nothing is written when decoding fails.
pub fn binarize_with_options<R: Read, W: Write>(
    reader: R,
    writer: W,
    options: &BinarizeOptions,
) -> Result<u8> {
    let img = decode(reader)?;
    let result = binarize_image(&img, options);
    encode_matrix(&result.matrix, writer, options.output)?;
    Ok(result.threshold)
}

/// Read every byte from `reader` and decode it, guessing the format
pub fn decode<R: Read>(mut reader: R) -> Result<DynamicImage> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| BinarizeError::Decode(ImageError::IoError(e)))?;
    let img = image::load_from_memory(&bytes).map_err(BinarizeError::Decode)?;
    let (width, height) = img.dimensions();
    debug!(bytes = bytes.len(), width, height, "decoded image");
    Ok(img)
}

/// Luminance grid of a decoded image
///
/// Every source is normalized to 8-bit RGBA first, so 16-bit and float
/// images land in the same 0..=255 buckets as 8-bit ones.
pub fn luminance_of(img: &DynamicImage, options: &BinarizeOptions) -> LumaGrid {
    let rgba = img.to_rgba8();
    let (width, height) = (rgba.width() as usize, rgba.height() as usize);
    if options.use_parallel(width * height) {
        rgba_to_luminance_parallel(rgba.as_raw(), width, height)
    } else {
        rgba_to_luminance(rgba.as_raw(), width, height)
    }
}

/// Binarize a decoded image without any I/O
pub fn binarize_image(img: &DynamicImage, options: &BinarizeOptions) -> Binarization {
    let gray = luminance_of(img, options);
    let parallel = options.use_parallel(gray.len());

    let (threshold, matrix) = if parallel {
        let threshold = compute_threshold_parallel(&gray);
        (threshold, threshold_binarize_parallel(&gray, threshold))
    } else {
        let threshold = compute_threshold(&gray);
        (threshold, threshold_binarize(&gray, threshold))
    };

    debug!(
        width = gray.width(),
        height = gray.height(),
        threshold,
        parallel,
        foreground = matrix.count_foreground(),
        "binarized image"
    );
    Binarization { threshold, matrix }
}

/// Encode a binary matrix as an 8-bit grayscale image (foreground 255, background 0)
pub fn encode_matrix<W: Write>(matrix: &BitMatrix, mut writer: W, format: OutputFormat) -> Result<()> {
    let gray = matrix.to_gray_image();
    let (width, height) = gray.dimensions();

    match format {
        OutputFormat::Jpeg { quality } => JpegEncoder::new_with_quality(&mut writer, quality)
            .write_image(gray.as_raw(), width, height, ColorType::L8),
        OutputFormat::Png => {
            PngEncoder::new(&mut writer).write_image(gray.as_raw(), width, height, ColorType::L8)
        }
    }
    .map_err(BinarizeError::Encode)?;

    debug!(width, height, ?format, "encoded binary image");
    Ok(())
}
