//! qr_rectify - QR finder pattern location and module grid rectification
//!
//! Scans a binary image for the three 1:1:3:1:1 finder patterns of a QR
//! symbol, orders them by role and resamples the symbol area into a 21x21
//! module grid. Payload decoding of the grid is delegated to a
//! [`SymbolDecoder`](decoder::SymbolDecoder).
//!
//! ```no_run
//! let frame = image::open("code.png").unwrap().to_rgb8();
//! let message = qr_rectify::decode_frame(&frame).unwrap();
//! println!("{message}");
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Scan configuration and environment overrides
pub mod config;
/// Symbol decoding of rectified grids
pub mod decoder;
/// Finder pattern detection stages
pub mod detector;
/// Error types
pub mod error;
/// Core data structures (BitMatrix, Point, Rect)
pub mod models;
/// Diagnostics drawing
pub mod overlay;
/// Frame-level pipeline tying the stages together
pub mod pipeline;
/// Command line helpers (image loading, dataset iteration)
pub mod tools;
/// Utility functions (grayscale, binarization, geometry)
pub mod utils;

pub use config::{Binarization, ScanConfig};
pub use decoder::{RqrrDecoder, SymbolDecoder};
pub use detector::corners::OrderedCorners;
pub use detector::rectify::MODULE_GRID_SIZE;
pub use error::{DecodeError, DetectError};
pub use models::{BitMatrix, Point, PointI, Rect};
pub use overlay::{CornerRole, NoOverlay, Overlay, RgbOverlay};
pub use pipeline::{Frame, LocatedSymbol, ScanOutcome};

use image::{GrayImage, RgbImage};

/// Locate and rectify a symbol in a binary image with default settings
pub fn scan(binary: &BitMatrix) -> Result<ScanOutcome, DetectError> {
    pipeline::scan(binary, &ScanConfig::default())
}

/// Same as [`scan`] for a grayscale image holding only 0 and 255
pub fn scan_luma(image: &GrayImage) -> Result<ScanOutcome, DetectError> {
    scan(&BitMatrix::from_luma(image)?)
}

/// Decode the symbol in an RGB frame; empty string when none is readable
pub fn decode_frame(image: &RgbImage) -> Result<String, DetectError> {
    Detector::new().decode_frame(image)
}

/// Detector with a scan configuration and a symbol decoder
#[derive(Debug, Clone)]
pub struct Detector<D = RqrrDecoder> {
    config: ScanConfig,
    decoder: D,
}

impl Detector {
    /// Create a new detector with default settings
    pub fn new() -> Self {
        Self {
            config: ScanConfig::default(),
            decoder: RqrrDecoder,
        }
    }

    /// Create a detector configured from `QR_*` environment variables
    pub fn from_env() -> Self {
        Self::new().with_config(ScanConfig::from_env())
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: SymbolDecoder> Detector<D> {
    /// Replace the scan configuration
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the symbol decoder
    pub fn with_decoder<E: SymbolDecoder>(self, decoder: E) -> Detector<E> {
        Detector {
            config: self.config,
            decoder,
        }
    }

    /// Active scan configuration
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Locate and rectify a symbol in a binary image
    pub fn scan(&self, binary: &BitMatrix) -> Result<ScanOutcome, DetectError> {
        pipeline::scan(binary, &self.config)
    }

    /// Binarize an RGB frame with the configured strategy
    pub fn binarize(&self, image: &RgbImage) -> Result<BitMatrix, DetectError> {
        pipeline::binarize_rgb(image, &self.config)
    }

    /// Process an RGB frame, drawing diagnostics on `overlay`
    pub fn process_frame<O: Overlay + ?Sized>(
        &self,
        image: &RgbImage,
        overlay: &mut O,
    ) -> Result<Frame, DetectError> {
        pipeline::process_frame(image, &self.config, &self.decoder, overlay)
    }

    /// Decoded payload of an RGB frame; empty when no symbol was read
    pub fn decode_frame(&self, image: &RgbImage) -> Result<String, DetectError> {
        pipeline::decode_frame(image, &self.config, &self.decoder)
    }

    /// Decode an already located symbol
    pub fn decode_symbol(&self, symbol: &LocatedSymbol) -> String {
        pipeline::decode_symbol(symbol, &self.decoder)
    }
}
