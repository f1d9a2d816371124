use super::PointI;

/// Axis-aligned rectangle in image coordinates, half-open on the right/bottom edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Area in pixels (zero for empty rectangles)
    pub fn area(&self) -> i64 {
        if self.width <= 0 || self.height <= 0 {
            return 0;
        }
        self.width as i64 * self.height as i64
    }

    /// Overlap of two rectangles, `None` when it has no area
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y1 = (self.y + self.height).min(other.y + other.height);
        let overlap = Rect::new(x0, y0, x1 - x0, y1 - y0);
        (overlap.area() > 0).then_some(overlap)
    }

    /// Center with integer division, matching pixel-grid rounding toward the origin
    pub fn center(&self) -> PointI {
        PointI::new(self.x + self.width / 2, self.y + self.height / 2)
    }
}
