use std::ops::{Add, Sub};

/// 2D point with floating point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<PointI> for Point {
    fn from(p: PointI) -> Self {
        Self::new(p.x as f64, p.y as f64)
    }
}

/// Integer point in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointI {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl PointI {
    /// Create a new integer point
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared length of this point taken as a vector
    pub fn norm_squared(&self) -> i64 {
        let x = self.x as i64;
        let y = self.y as i64;
        x * x + y * y
    }

    /// 2D cross product `self × other`
    pub fn cross(&self, other: &PointI) -> i64 {
        self.x as i64 * other.y as i64 - other.x as i64 * self.y as i64
    }
}

impl Add for PointI {
    type Output = PointI;

    fn add(self, rhs: PointI) -> PointI {
        PointI::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for PointI {
    type Output = PointI;

    fn sub(self, rhs: PointI) -> PointI {
        PointI::new(self.x - rhs.x, self.y - rhs.y)
    }
}
