//! Finder pattern detection and symbol rectification
//!
//! This module contains the detection stages in pipeline order:
//! - Run-length extraction of binary rows
//! - The 1:1:3:1:1 ratio test
//! - Row scanning with vertical and diagonal cross-checks
//! - Clustering of candidate boxes into finder centers
//! - Corner role assignment and perspective rectification

/// Overlap clustering of candidate rectangles
pub mod cluster;
/// Top-left / top-right / bottom-left assignment
pub mod corners;
/// Finder pattern ratio classifier
pub mod ratio;
/// Resampling of the symbol into a 21x21 module grid
pub mod rectify;
/// Run-length encoding of binary rows
pub mod runs;
/// Row scanner producing candidate rectangles
pub mod scanner;
