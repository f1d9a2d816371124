//! Convert RGB image to grayscale
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses 14-bit fixed point with rounding: Y = (4899*R + 9617*G + 1868*B + 8192) >> 14
//!
//! Rows are processed in parallel with rayon.

use crate::error::DetectError;
use rayon::prelude::*;

/// Coefficients for grayscale conversion, scaled by 2^14
const COEF_R: u32 = 4899;
const COEF_G: u32 = 9617;
const COEF_B: u32 = 1868;
const SHIFT: u32 = 14;
const ROUND: u32 = 1 << (SHIFT - 1);

#[inline]
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    // Weights sum to 2^14, so the result never exceeds 255
    ((COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32 + ROUND) >> SHIFT) as u8
}

/// Convert interleaved RGB bytes to one luminance byte per pixel
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Result<Vec<u8>, DetectError> {
    let pixel_count = width * height;
    if rgb.len() != pixel_count * 3 {
        return Err(DetectError::BufferSize {
            expected: pixel_count * 3,
            actual: rgb.len(),
        });
    }
    let mut gray = vec![0u8; pixel_count];
    if pixel_count == 0 {
        return Ok(gray);
    }

    // Process rows in parallel
    gray.par_chunks_mut(width)
        .zip(rgb.par_chunks(width * 3))
        .for_each(|(row, src)| {
            for (out, px) in row.iter_mut().zip(src.chunks_exact(3)) {
                *out = luminance(px[0], px[1], px[2]);
            }
        });

    Ok(gray)
}
