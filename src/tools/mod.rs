use crate::models::BitMatrix;
use image::{GenericImageView, GrayImage, RgbImage};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised by the command line helpers
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Image could not be decoded or encoded
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    /// Filesystem error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Detection precondition failed
    #[error(transparent)]
    Detect(#[from] crate::error::DetectError),
}

fn max_dim_from_env() -> Option<u32> {
    match env::var("QR_MAX_DIM") {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Load an image as RGB, downscaled so neither side exceeds `QR_MAX_DIM` when set.
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage, ToolError> {
    let img = image::open(path)?;
    let rgb = match max_dim_from_env() {
        Some(max_dim) if img.dimensions().0.max(img.dimensions().1) > max_dim => img
            .resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
            .to_rgb8(),
        _ => img.to_rgb8(),
    };
    Ok(rgb)
}

/// Render a module grid as a grayscale image, `scale` pixels per module
pub fn grid_image(grid: &BitMatrix, scale: u32) -> GrayImage {
    let scale = scale.max(1);
    let cells = grid.to_luma();
    GrayImage::from_fn(cells.width() * scale, cells.height() * scale, |x, y| {
        *cells.get_pixel(x / scale, y / scale)
    })
}

/// Write a module grid in the packed cell-bitmap layout (bit `y * width + x`, LSB first)
pub fn write_cell_bitmap<P: AsRef<Path>>(grid: &BitMatrix, path: P) -> Result<(), ToolError> {
    fs::write(path, grid.as_bytes())?;
    Ok(())
}

/// Summary statistics for a binary matrix.
#[derive(Debug, Clone, Copy)]
pub struct BinaryStats {
    /// Count of black pixels.
    pub black_pixels: usize,
    /// Total pixels in the matrix.
    pub total_pixels: usize,
    /// Ratio of black pixels to total pixels.
    pub black_ratio: f64,
}

/// Compute black pixel stats for a binary matrix.
pub fn binary_stats(binary: &BitMatrix) -> BinaryStats {
    let black = binary.count_black();
    let total = binary.width() * binary.height();
    let ratio = if total == 0 {
        0.0
    } else {
        black as f64 / total as f64
    };
    BinaryStats {
        black_pixels: black,
        total_pixels: total,
        black_ratio: ratio,
    }
}

/// Iterate image paths under `root` in sorted order, optionally truncated.
pub fn dataset_iter<P: AsRef<Path>>(
    root: P,
    limit: Option<usize>,
) -> impl Iterator<Item = PathBuf> {
    let mut images = collect_images(root.as_ref());
    images.sort();
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    images.into_iter()
}

fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if ext == "png" || ext == "jpg" || ext == "jpeg" || ext == "gif" || ext == "bmp" {
                    images.push(path);
                }
            }
        }
    }

    images
}
