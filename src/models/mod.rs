/// Packed bit matrix for binary images and module grids
pub mod matrix;
/// Float and integer points
pub mod point;
/// Axis-aligned integer rectangles
pub mod rect;

pub use matrix::BitMatrix;
pub use point::{Point, PointI};
pub use rect::Rect;
