//! Error types for detection and symbol decoding.
//!
//! "No code in this frame" is not an error: scanning returns an outcome with
//! no located symbol. These variants cover broken preconditions only.

/// Errors raised by the detection pipeline
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    /// The input image is not strictly black (0) and white (255)
    #[error("pixel ({x}, {y}) has value {value}, expected 0 or 255")]
    NonBinaryPixel {
        /// Column of the offending pixel
        x: u32,
        /// Row of the offending pixel
        y: u32,
        /// The pixel value found
        value: u8,
    },
    /// A raw pixel buffer does not match the stated dimensions
    #[error("buffer holds {actual} bytes, expected {expected} for the given size")]
    BufferSize {
        /// Bytes required by width, height and channel count
        expected: usize,
        /// Bytes provided
        actual: usize,
    },
    /// Corner ordering needs exactly three finder centers
    #[error("expected 3 finder centers, got {0}")]
    CornerCount(usize),
    /// The three finder centers are collinear or coincide
    #[error("finder centers {0:?} do not form a triangle")]
    DegenerateCorners([crate::models::PointI; 3]),
    /// The corner correspondences do not determine a perspective transform
    #[error("perspective transform is singular")]
    SingularTransform,
}

/// Errors raised by a symbol decoder
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// The module grid has the wrong dimensions for the decoder
    #[error("module grid is {width}x{height}, expected a square grid")]
    GridShape {
        /// Grid width in modules
        width: usize,
        /// Grid height in modules
        height: usize,
    },
    /// The decoder rejected the bit pattern (format, version or ECC failure)
    #[error("symbol decoder rejected the grid: {0}")]
    Rejected(String),
}
