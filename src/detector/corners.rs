//! Assign top-left, top-right and bottom-left roles to three finder centers
//!
//! ```text
//! [top_left] ...... [top_right]
//!     .                 .
//! [bottom_left] ... (bottom_right)
//! ```

use crate::error::DetectError;
use crate::models::PointI;
use log::debug;

/// The three finder centers of one symbol, labeled by role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedCorners {
    /// Finder pattern at the right-angle corner
    pub top_left: PointI,
    /// Finder pattern along the first row
    pub top_right: PointI,
    /// Finder pattern along the first column
    pub bottom_left: PointI,
}

impl OrderedCorners {
    /// Fourth corner completing the parallelogram
    pub fn bottom_right(&self) -> PointI {
        self.bottom_left + self.top_right - self.top_left
    }
}

/// Order three finder centers by their geometric role.
///
/// Top-left is the point opposite the longest side. Of the other two, the
/// sign of the cross product around top-left (image y axis pointing down)
/// tells bottom-left from top-right. The result does not depend on input
/// order. Collinear or repeated points are rejected.
pub fn order_corners(centers: &[PointI]) -> Result<OrderedCorners, DetectError> {
    let pts: [PointI; 3] = centers
        .try_into()
        .map_err(|_| DetectError::CornerCount(centers.len()))?;

    // Side i is the one opposite pts[i]
    let sides = [
        (pts[2] - pts[1]).norm_squared(),
        (pts[0] - pts[2]).norm_squared(),
        (pts[1] - pts[0]).norm_squared(),
    ];
    let mut tl = 0;
    for i in 1..3 {
        if sides[i] > sides[tl] {
            tl = i;
        }
    }

    let top_left = pts[tl];
    let a = pts[(tl + 1) % 3];
    let b = pts[(tl + 2) % 3];
    let cross = (a - top_left).cross(&(b - top_left));
    if cross == 0 {
        return Err(DetectError::DegenerateCorners(pts));
    }

    let corners = if cross < 0 {
        OrderedCorners {
            top_left,
            top_right: b,
            bottom_left: a,
        }
    } else {
        OrderedCorners {
            top_left,
            top_right: a,
            bottom_left: b,
        }
    };
    debug!(
        "corners: top_left={:?} top_right={:?} bottom_left={:?}",
        corners.top_left, corners.top_right, corners.bottom_left
    );
    Ok(corners)
}
