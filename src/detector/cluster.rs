//! Merge overlapping candidate rectangles into one center per finder pattern.
//!
//! Rectangles are visited in discovery order. The first unassigned one seeds a
//! group, and every later unassigned rectangle that overlaps the group's
//! running intersection shrinks the group to that intersection. Each group
//! reports the center of its final intersection.

use crate::models::{PointI, Rect};

/// Group overlapping rectangles; each group is the intersection of its members
pub fn cluster_rects(rects: &[Rect]) -> Vec<Rect> {
    let mut used = vec![false; rects.len()];
    let mut groups = Vec::new();

    for i in 0..rects.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let mut group = rects[i];
        for j in (i + 1)..rects.len() {
            if used[j] {
                continue;
            }
            if let Some(overlap) = group.intersect(&rects[j]) {
                group = overlap;
                used[j] = true;
            }
        }
        groups.push(group);
    }

    groups
}

/// Finder pattern centers estimated from candidate rectangles
pub fn cluster_centers(rects: &[Rect]) -> Vec<PointI> {
    cluster_rects(rects).iter().map(Rect::center).collect()
}
