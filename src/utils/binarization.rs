use crate::config::Binarization;
use crate::error::DetectError;
use crate::models::BitMatrix;

fn check_len(gray: &[u8], width: usize, height: usize) -> Result<(), DetectError> {
    let expected = width * height;
    if gray.len() != expected {
        return Err(DetectError::BufferSize {
            expected,
            actual: gray.len(),
        });
    }
    Ok(())
}

fn binarize_by(
    gray: &[u8],
    width: usize,
    height: usize,
    is_black: impl Fn(u8) -> bool,
) -> BitMatrix {
    let mut binary = BitMatrix::new(width, height);
    for (y, row) in gray.chunks_exact(width.max(1)).take(height).enumerate() {
        for (x, &value) in row.iter().enumerate() {
            if is_black(value) {
                binary.set(x, y, true);
            }
        }
    }
    binary
}

/// Convert grayscale image to binary using Otsu's thresholding method
/// Returns a BitMatrix where true = black, false = white
pub fn otsu_binarize(gray: &[u8], width: usize, height: usize) -> Result<BitMatrix, DetectError> {
    check_len(gray, width, height)?;
    let threshold = calculate_otsu_threshold(gray);
    log::debug!("otsu threshold: {threshold}");
    Ok(binarize_by(gray, width, height, |v| v < threshold))
}

/// Calculate Otsu's optimal threshold
fn calculate_otsu_threshold(gray: &[u8]) -> u8 {
    // Build histogram
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total_pixels = gray.len() as f64;
    let total_sum: u64 = histogram.iter().enumerate().map(|(i, &c)| i as u64 * c).sum();
    let mut max_variance = 0.0;
    let mut optimal_threshold = 128u8;

    // Class 1 holds intensities below the threshold
    let mut class1_pixels = 0u64;
    let mut class1_sum = 0u64;
    for threshold in 1..=255usize {
        class1_pixels += histogram[threshold - 1];
        class1_sum += histogram[threshold - 1] * (threshold as u64 - 1);
        let class2_pixels = gray.len() as u64 - class1_pixels;

        if class1_pixels == 0 || class2_pixels == 0 {
            continue;
        }

        let class1_mean = class1_sum as f64 / class1_pixels as f64;
        let class2_mean = (total_sum - class1_sum) as f64 / class2_pixels as f64;

        let weight1 = class1_pixels as f64 / total_pixels;
        let weight2 = class2_pixels as f64 / total_pixels;

        let variance = weight1 * weight2 * (class1_mean - class2_mean).powi(2);

        if variance > max_variance {
            max_variance = variance;
            optimal_threshold = threshold as u8;
        }
    }

    optimal_threshold
}

/// Global threshold binarization: values above `threshold` are white
pub fn threshold_binarize(
    gray: &[u8],
    width: usize,
    height: usize,
    threshold: u8,
) -> Result<BitMatrix, DetectError> {
    check_len(gray, width, height)?;
    Ok(binarize_by(gray, width, height, |v| v <= threshold))
}

/// Binarize with the configured strategy
pub fn binarize(
    gray: &[u8],
    width: usize,
    height: usize,
    method: Binarization,
) -> Result<BitMatrix, DetectError> {
    match method {
        Binarization::Fixed(threshold) => threshold_binarize(gray, width, height, threshold),
        Binarization::Otsu => otsu_binarize(gray, width, height),
    }
}
