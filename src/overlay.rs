//! Diagnostics overlay
//!
//! The scanner reports each accepted candidate as two lines (the horizontal
//! window and its vertical extent) and the pipeline marks the three ordered
//! corners. Nothing in detection reads back from an overlay.

use crate::models::PointI;
use image::{Rgb, RgbImage};

/// Role of a finder pattern within the symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerRole {
    /// Right-angle corner
    TopLeft,
    /// End of the first row
    TopRight,
    /// End of the first column
    BottomLeft,
}

/// Receiver of diagnostic draw commands
pub trait Overlay {
    /// Line between two pixels, both ends included
    fn line(&mut self, from: PointI, to: PointI);

    /// Marker at an ordered corner
    fn marker(&mut self, at: PointI, role: CornerRole);
}

/// Overlay that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverlay;

impl Overlay for NoOverlay {
    fn line(&mut self, _from: PointI, _to: PointI) {}

    fn marker(&mut self, _at: PointI, _role: CornerRole) {}
}

const LINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const MARKER_RADIUS: i32 = 5;

fn marker_color(role: CornerRole) -> Rgb<u8> {
    match role {
        CornerRole::TopRight => Rgb([0, 0, 255]),
        CornerRole::TopLeft => Rgb([255, 0, 255]),
        CornerRole::BottomLeft => Rgb([255, 0, 0]),
    }
}

/// Draws on a copy of the input frame
#[derive(Debug, Clone)]
pub struct RgbOverlay {
    image: RgbImage,
}

impl RgbOverlay {
    /// Start drawing on `image`
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Finish and return the annotated image
    pub fn into_inner(self) -> RgbImage {
        self.image
    }

    fn plot(&mut self, x: i32, y: i32, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }
}

impl Overlay for RgbOverlay {
    fn line(&mut self, from: PointI, to: PointI) {
        // Bresenham
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let (mut x, mut y) = (from.x, from.y);
        let mut err = dx + dy;
        loop {
            self.plot(x, y, LINE_COLOR);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn marker(&mut self, at: PointI, role: CornerRole) {
        let color = marker_color(role);
        for dy in -MARKER_RADIUS..=MARKER_RADIUS {
            for dx in -MARKER_RADIUS..=MARKER_RADIUS {
                if dx * dx + dy * dy <= MARKER_RADIUS * MARKER_RADIUS {
                    self.plot(at.x + dx, at.y + dy, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_endpoints_inclusive() {
        let mut overlay = RgbOverlay::new(RgbImage::new(10, 10));
        overlay.line(PointI::new(2, 3), PointI::new(7, 3));
        overlay.line(PointI::new(5, 9), PointI::new(5, 6));
        let image = overlay.into_inner();
        for x in 2..=7 {
            assert_eq!(*image.get_pixel(x, 3), LINE_COLOR);
        }
        assert_eq!(*image.get_pixel(1, 3), Rgb([0, 0, 0]));
        for y in 6..=9 {
            assert_eq!(*image.get_pixel(5, y), LINE_COLOR);
        }
    }

    #[test]
    fn test_marker_is_clipped_at_border() {
        let mut overlay = RgbOverlay::new(RgbImage::new(8, 8));
        overlay.marker(PointI::new(0, 0), CornerRole::TopLeft);
        let image = overlay.into_inner();
        assert_eq!(*image.get_pixel(0, 0), Rgb([255, 0, 255]));
        assert_eq!(*image.get_pixel(3, 4), Rgb([255, 0, 255]));
        assert_eq!(*image.get_pixel(4, 4), Rgb([0, 0, 0]));
    }
}
