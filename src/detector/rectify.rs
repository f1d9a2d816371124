//! Perspective rectification of a located symbol into its module grid

use super::corners::OrderedCorners;
use crate::error::DetectError;
use crate::models::{BitMatrix, Point, PointI};
use crate::utils::geometry::{PerspectiveTransform, warp_nearest};

/// Modules per side of the rectified grid (version 1 symbol)
pub const MODULE_GRID_SIZE: usize = 21;

/// Distance in modules from a grid edge to the nearest finder center
pub const FINDER_CENTER_OFFSET: usize = 3;

/// Grid coordinates of the finder centers: top-right, top-left, bottom-left, bottom-right
pub fn grid_anchors() -> [Point; 4] {
    let near = FINDER_CENTER_OFFSET as f64;
    let far = (MODULE_GRID_SIZE - 1 - FINDER_CENTER_OFFSET) as f64;
    [
        Point::new(far, near),
        Point::new(near, near),
        Point::new(near, far),
        Point::new(far, far),
    ]
}

/// Image-space anchors in the same order as [`grid_anchors`]
pub fn image_anchors(corners: &OrderedCorners) -> [PointI; 4] {
    [
        corners.top_right,
        corners.top_left,
        corners.bottom_left,
        corners.bottom_right(),
    ]
}

/// Transform from image pixels to grid module coordinates
pub fn image_to_grid(corners: &OrderedCorners) -> Result<PerspectiveTransform, DetectError> {
    let src = image_anchors(corners).map(Point::from);
    PerspectiveTransform::from_points(&src, &grid_anchors()).ok_or(DetectError::SingularTransform)
}

/// Resample the symbol area of `binary` into a `MODULE_GRID_SIZE` square grid
pub fn rectify(binary: &BitMatrix, corners: &OrderedCorners) -> Result<BitMatrix, DetectError> {
    let transform = image_to_grid(corners)?;
    warp_nearest(binary, &transform, MODULE_GRID_SIZE).ok_or(DetectError::SingularTransform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_anchors() {
        let anchors = grid_anchors();
        assert_eq!(anchors[0], Point::new(17.0, 3.0));
        assert_eq!(anchors[1], Point::new(3.0, 3.0));
        assert_eq!(anchors[2], Point::new(3.0, 17.0));
        assert_eq!(anchors[3], Point::new(17.0, 17.0));
    }

    #[test]
    fn test_bottom_right_is_exact_parallelogram() {
        // Grid anchors scaled by 10 and shifted, as an axis-aligned symbol would appear
        let corners = OrderedCorners {
            top_left: PointI::new(40, 40),
            top_right: PointI::new(180, 40),
            bottom_left: PointI::new(40, 180),
        };
        assert_eq!(corners.bottom_right(), PointI::new(180, 180));

        let skewed = OrderedCorners {
            top_left: PointI::new(101, 37),
            top_right: PointI::new(233, 81),
            bottom_left: PointI::new(58, 170),
        };
        let br = skewed.bottom_right();
        assert_eq!(br, PointI::new(58 + 233 - 101, 170 + 81 - 37));
        assert_eq!(image_anchors(&skewed)[3], br);
    }

    #[test]
    fn test_transform_maps_anchors() {
        let corners = OrderedCorners {
            top_left: PointI::new(101, 37),
            top_right: PointI::new(233, 81),
            bottom_left: PointI::new(58, 170),
        };
        let t = image_to_grid(&corners).unwrap();
        for (img, grid) in image_anchors(&corners).iter().zip(grid_anchors().iter()) {
            let mapped = t.transform(&Point::from(*img)).unwrap();
            assert!(mapped.distance(grid) < 1e-6);
        }
    }

    #[test]
    fn test_rectify_scaled_grid() {
        // Module (mx, my) occupies pixels [10 + 4mx, 14 + 4mx); black when mx == my
        let mut binary = BitMatrix::new(100, 100);
        for y in 10..94 {
            for x in 10..94 {
                binary.set(x, y, (x - 10) / 4 == (y - 10) / 4);
            }
        }
        // Module centers sit at 12 + 4m
        let corners = OrderedCorners {
            top_left: PointI::new(24, 24),
            top_right: PointI::new(80, 24),
            bottom_left: PointI::new(24, 80),
        };
        let grid = rectify(&binary, &corners).unwrap();
        assert_eq!(grid.width(), MODULE_GRID_SIZE);
        for gy in 0..MODULE_GRID_SIZE {
            for gx in 0..MODULE_GRID_SIZE {
                assert_eq!(grid.get(gx, gy), gx == gy, "module ({gx}, {gy})");
            }
        }
    }
}
