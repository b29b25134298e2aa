//! RGB(A) to luminance conversion
//!
//! Y = round(0.299*R + 0.587*G + 0.114*B) on 8-bit channels, evaluated in
//! integer arithmetic as (299*R + 587*G + 114*B + 500) / 1000 so that
//! rounding is exact. Alpha is ignored.

use crate::models::LumaGrid;
use image::{GenericImageView, Pixel};
use rayon::prelude::*;

/// Coefficients for luminance conversion, scaled by `COEF_SCALE`
const COEF_R: u32 = 299;
const COEF_G: u32 = 587;
const COEF_B: u32 = 114;
const COEF_SCALE: u32 = 1000;

/// Luminance of a single 8-bit RGB pixel
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32;
    ((weighted + COEF_SCALE / 2) / COEF_SCALE).min(255) as u8
}

/// Convert packed RGB bytes to a luminance grid
pub fn rgb_to_luminance(rgb: &[u8], width: usize, height: usize) -> LumaGrid {
    let mut out = vec![0u8; width * height];
    rgb_to_luminance_into(rgb, width, height, &mut out);
    LumaGrid::from_buffer(width, height, out)
}

/// Convert packed RGBA bytes to a luminance grid (alpha ignored)
pub fn rgba_to_luminance(rgba: &[u8], width: usize, height: usize) -> LumaGrid {
    let mut out = vec![0u8; width * height];
    rgba_to_luminance_into(rgba, width, height, &mut out);
    LumaGrid::from_buffer(width, height, out)
}

/// Convert RGB into a pre-allocated buffer
///
/// # Returns
/// Number of samples written (width * height)
pub fn rgb_to_luminance_into(rgb: &[u8], width: usize, height: usize, output: &mut [u8]) -> usize {
    convert_packed::<3>(rgb, width * height, output)
}

/// Convert RGBA into a pre-allocated buffer (alpha ignored)
pub fn rgba_to_luminance_into(
    rgba: &[u8],
    width: usize,
    height: usize,
    output: &mut [u8],
) -> usize {
    convert_packed::<4>(rgba, width * height, output)
}

fn convert_packed<const CHANNELS: usize>(src: &[u8], pixel_count: usize, output: &mut [u8]) -> usize {
    assert!(output.len() >= pixel_count, "Output buffer too small");
    assert!(src.len() >= pixel_count * CHANNELS, "Input buffer too small");
    for (dst, px) in output[..pixel_count]
        .iter_mut()
        .zip(src.chunks_exact(CHANNELS))
    {
        *dst = luma(px[0], px[1], px[2]);
    }
    pixel_count
}

// ============== Parallel Processing with Rayon ==============

/// Convert RGB to luminance, one row per rayon task
pub fn rgb_to_luminance_parallel(rgb: &[u8], width: usize, height: usize) -> LumaGrid {
    convert_rows_parallel::<3>(rgb, width, height)
}

/// Convert RGBA to luminance, one row per rayon task
pub fn rgba_to_luminance_parallel(rgba: &[u8], width: usize, height: usize) -> LumaGrid {
    convert_rows_parallel::<4>(rgba, width, height)
}

fn convert_rows_parallel<const CHANNELS: usize>(src: &[u8], width: usize, height: usize) -> LumaGrid {
    assert!(src.len() >= width * height * CHANNELS, "Input buffer too small");
    let mut out = vec![0u8; width * height];
    if width > 0 {
        out.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
            let row_start = y * width * CHANNELS;
            let src_row = &src[row_start..row_start + width * CHANNELS];
            for (dst, px) in row.iter_mut().zip(src_row.chunks_exact(CHANNELS)) {
                *dst = luma(px[0], px[1], px[2]);
            }
        });
    }
    LumaGrid::from_buffer(width, height, out)
}

/// Convert any 8-bit pixel accessor
pub fn luminance_from_view<I>(view: &I) -> LumaGrid
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let (w, h) = view.dimensions();
    let (width, height) = (w as usize, h as usize);
    let mut out = vec![0u8; width * height];
    for y in 0..h {
        for x in 0..w {
            let [r, g, b] = view.get_pixel(x, y).to_rgb().0;
            out[y as usize * width + x as usize] = luma(r, g, b);
        }
    }
    LumaGrid::from_buffer(width, height, out)
}
