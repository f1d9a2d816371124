//! Utility functions for image processing
//!
//! This module provides helper functions for finder pattern detection:
//! - Grayscale conversion (RGB to luminance)
//! - Binarization (fixed threshold and Otsu's method)
//! - Geometry (perspective transforms, grid resampling)

/// Fixed threshold and Otsu binarization
pub mod binarization;
pub mod geometry;
pub mod grayscale;
