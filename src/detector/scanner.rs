//! Row scanning for finder pattern candidates
//!
//! Every row is split into runs and each black-aligned window of five runs is
//! tested against the 1:1:3:1:1 ratio. Horizontal hits are only kept when the
//! same ratio also shows up vertically and diagonally through the window
//! center, which filters out text and ladder-like structures.

use super::ratio::is_finder_ratio;
use super::runs::{Run, extract_runs};
use crate::config::ScanConfig;
use crate::models::{BitMatrix, PointI, Rect};
use crate::overlay::Overlay;
use log::{debug, trace};

const VERTICAL: (isize, isize) = (0, 1);
const DIAGONAL: (isize, isize) = (1, 1);

/// Bar widths along one line through a candidate center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CrossSection {
    /// black, white, black (both halves), white, black
    counts: [usize; 5],
    /// Pixels walked backwards, the center pixel included
    before: usize,
    /// Pixels walked forwards from the pixel after the center
    after: usize,
}

/// Lengths of the black, white, black segments met walking from `start` by `step`
fn ray_segments(matrix: &BitMatrix, start: (isize, isize), step: (isize, isize)) -> [usize; 3] {
    let (mut x, mut y) = start;
    let mut lengths = [0usize; 3];
    for (len, black) in lengths.iter_mut().zip([true, false, true]) {
        while matrix.contains(x, y) && matrix.get(x as usize, y as usize) == black {
            *len += 1;
            x += step.0;
            y += step.1;
        }
    }
    lengths
}

fn cross_section(matrix: &BitMatrix, cx: usize, cy: usize, step: (isize, isize)) -> CrossSection {
    let (cx, cy) = (cx as isize, cy as isize);
    let back = ray_segments(matrix, (cx, cy), (-step.0, -step.1));
    let forward = ray_segments(matrix, (cx + step.0, cy + step.1), step);
    CrossSection {
        counts: [back[2], back[1], back[0] + forward[0], forward[1], forward[2]],
        before: back.iter().sum(),
        after: forward.iter().sum(),
    }
}

/// Scans binary images for finder pattern candidate rectangles
#[derive(Debug, Clone, Copy)]
pub struct FinderScanner {
    tolerance: f64,
}

impl FinderScanner {
    /// Create a scanner using the configured ratio tolerance
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            tolerance: config.ratio_tolerance,
        }
    }

    /// Confirm a vertical cross-section through (cx, cy); returns the top and
    /// bottom rows of its black extent
    pub fn verify_vertical(
        &self,
        matrix: &BitMatrix,
        cx: usize,
        cy: usize,
    ) -> Option<(usize, usize)> {
        let section = cross_section(matrix, cx, cy, VERTICAL);
        if !is_finder_ratio(&section.counts, self.tolerance) {
            return None;
        }
        Some((cy + 1 - section.before, cy + section.after))
    }

    /// Confirm a cross-section along the top-left to bottom-right diagonal through (cx, cy)
    pub fn verify_diagonal(&self, matrix: &BitMatrix, cx: usize, cy: usize) -> bool {
        let section = cross_section(matrix, cx, cy, DIAGONAL);
        is_finder_ratio(&section.counts, self.tolerance)
    }

    /// Collect candidate rectangles over every row, in discovery order
    pub fn scan<O>(&self, matrix: &BitMatrix, overlay: &mut O) -> Vec<Rect>
    where
        O: Overlay + ?Sized,
    {
        let mut candidates = Vec::new();
        for y in 0..matrix.height() {
            let runs = extract_runs(matrix.row(y));
            if runs.len() < 5 {
                continue;
            }
            for i in (0..=runs.len() - 5).step_by(2) {
                if let Some(rect) = self.check_window(matrix, y, &runs[i..i + 5], overlay) {
                    candidates.push(rect);
                }
            }
        }
        debug!(
            "scanned {}x{} image: {} candidate rectangles",
            matrix.width(),
            matrix.height(),
            candidates.len()
        );
        candidates
    }

    fn check_window<O>(
        &self,
        matrix: &BitMatrix,
        y: usize,
        window: &[Run],
        overlay: &mut O,
    ) -> Option<Rect>
    where
        O: Overlay + ?Sized,
    {
        let counts = [window[0].len, window[1].len, window[2].len, window[3].len, window[4].len];
        if !is_finder_ratio(&counts, self.tolerance) {
            return None;
        }

        let start = window[0].start;
        let end = window[4].end();
        let center_x = (start + end) / 2;
        let Some((top, bottom)) = self.verify_vertical(matrix, center_x, y) else {
            trace!("row {y}: window at x={start} failed vertical check");
            return None;
        };
        if !self.verify_diagonal(matrix, center_x, y) {
            trace!("row {y}: window at x={start} failed diagonal check");
            return None;
        }

        debug_assert!(matrix.get(start, y) && matrix.get(end - 1, y));
        debug_assert!(matrix.get(center_x, top) && matrix.get(center_x, bottom));

        overlay.line(PointI::new(start as i32, y as i32), PointI::new(end as i32 - 1, y as i32));
        overlay.line(
            PointI::new(center_x as i32, top as i32),
            PointI::new(center_x as i32, bottom as i32),
        );

        Some(Rect::new(
            start as i32,
            top as i32,
            (end - start) as i32,
            (bottom - top + 1) as i32,
        ))
    }
}
