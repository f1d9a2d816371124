use crate::error::DetectError;
use image::{GrayImage, Luma};

/// Compact bit matrix for binary images and module grids (true = black)
///
/// Bits are packed row-major, least significant bit first: cell `(x, y)`
/// lives in bit `p & 7` of byte `p >> 3` where `p = y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new all-white matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Build a matrix from a strictly binary grayscale image (0 = black, 255 = white).
    ///
    /// Any other pixel value is rejected, the scanner assumes exactly two levels.
    pub fn from_luma(image: &GrayImage) -> Result<Self, DetectError> {
        let (width, height) = image.dimensions();
        let mut matrix = Self::new(width as usize, height as usize);
        for (x, y, &Luma([value])) in image.enumerate_pixels() {
            match value {
                0 => matrix.set(x as usize, y as usize, true),
                255 => {}
                _ => return Err(DetectError::NonBinaryPixel { x, y, value }),
            }
        }
        Ok(matrix)
    }

    /// Render back to a grayscale image using the 0/255 convention
    pub fn to_luma(&self) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            if self.get(x as usize, y as usize) {
                Luma([0])
            } else {
                Luma([255])
            }
        })
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Check whether (x, y) lies inside the matrix
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Get bit at (x, y); out of range reads as white
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        if value {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    /// Iterate the bits of row `y` from left to right
    pub fn row(&self, y: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.width).map(move |x| self.get(x, y))
    }

    /// Number of black cells
    pub fn count_black(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Get raw packed data
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
