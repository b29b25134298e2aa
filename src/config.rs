//! Pipeline options with environment overrides
//!
//! Overrides are read once per process:
//! - `OTSU_OUTPUT_FORMAT`: `jpeg` (default) or `png`
//! - `OTSU_JPEG_QUALITY`: 1..=100, default 75
//! - `OTSU_PARALLEL_MIN_PIXELS`: pixel count at which rayon paths kick in

use std::sync::OnceLock;

/// JPEG quality used when nothing overrides it
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Images with at least this many pixels take the parallel passes
pub const DEFAULT_PARALLEL_MIN_PIXELS: usize = 1 << 20;

/// Encoding of the binarized output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Baseline JPEG at the given quality (1..=100)
    Jpeg {
        /// Encoder quality
        quality: u8,
    },
    /// Lossless PNG
    Png,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Options for the decode, binarize, encode pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinarizeOptions {
    /// Output encoding
    pub output: OutputFormat,
    /// Minimum pixel count for row-parallel processing
    pub parallel_min_pixels: usize,
}

impl BinarizeOptions {
    /// Options with no environment lookups
    pub const fn builtin() -> Self {
        Self {
            output: OutputFormat::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            },
            parallel_min_pixels: DEFAULT_PARALLEL_MIN_PIXELS,
        }
    }

    /// Set the output format
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Set the parallel cut-over; `usize::MAX` keeps everything sequential
    pub fn with_parallel_min_pixels(mut self, pixels: usize) -> Self {
        self.parallel_min_pixels = pixels;
        self
    }

    pub(crate) fn use_parallel(&self, pixel_count: usize) -> bool {
        pixel_count > 0 && pixel_count >= self.parallel_min_pixels
    }
}

impl Default for BinarizeOptions {
    fn default() -> Self {
        *ENV_OPTIONS.get_or_init(options_from_env)
    }
}

static ENV_OPTIONS: OnceLock<BinarizeOptions> = OnceLock::new();

fn options_from_env() -> BinarizeOptions {
    let quality = parse_quality(std::env::var("OTSU_JPEG_QUALITY").ok().as_deref());
    let output = parse_output_format(std::env::var("OTSU_OUTPUT_FORMAT").ok().as_deref(), quality);
    let parallel_min_pixels = std::env::var("OTSU_PARALLEL_MIN_PIXELS")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_PARALLEL_MIN_PIXELS);
    BinarizeOptions {
        output,
        parallel_min_pixels,
    }
}

fn parse_quality(value: Option<&str>) -> u8 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .map(|q| q.clamp(1, 100) as u8)
        .unwrap_or(DEFAULT_JPEG_QUALITY)
}

fn parse_output_format(value: Option<&str>, quality: u8) -> OutputFormat {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if v == "png" => OutputFormat::Png,
        _ => OutputFormat::Jpeg { quality },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quality() {
        assert_eq!(parse_quality(None), DEFAULT_JPEG_QUALITY);
        assert_eq!(parse_quality(Some(" 90 ")), 90);
        assert_eq!(parse_quality(Some("0")), 1);
        assert_eq!(parse_quality(Some("400")), 100);
        assert_eq!(parse_quality(Some("high")), DEFAULT_JPEG_QUALITY);
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format(Some("PNG"), 75), OutputFormat::Png);
        assert_eq!(
            parse_output_format(Some("jpeg"), 60),
            OutputFormat::Jpeg { quality: 60 }
        );
        assert_eq!(
            parse_output_format(Some("gif"), 75),
            OutputFormat::Jpeg { quality: 75 }
        );
        assert_eq!(parse_output_format(None, 75), OutputFormat::default());
    }

    #[test]
    fn test_use_parallel() {
        let opts = BinarizeOptions::builtin().with_parallel_min_pixels(100);
        assert!(!opts.use_parallel(0));
        assert!(!opts.use_parallel(99));
        assert!(opts.use_parallel(100));

        let sequential = opts.with_parallel_min_pixels(usize::MAX);
        assert!(!sequential.use_parallel(usize::MAX - 1));
    }
}
