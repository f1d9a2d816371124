/// 1:1:3:1:1 cross-section classifier shared by every scan direction
///
/// The four outer bars (black, white, white, black) must agree within the
/// tolerance, and the center bar must be within the same tolerance of three
/// times their mean. Both comparisons are symmetric max/min ratios, and a
/// ratio exactly equal to the tolerance is accepted.
pub fn is_finder_ratio(counts: &[usize; 5], tolerance: f64) -> bool {
    let outer = [counts[0], counts[1], counts[3], counts[4]];
    let min_outer = outer.iter().copied().min().unwrap_or(0);
    let max_outer = outer.iter().copied().max().unwrap_or(0);
    if min_outer == 0 || counts[2] == 0 {
        return false;
    }
    if max_outer as f64 / min_outer as f64 > tolerance {
        return false;
    }

    let predicted = 3.0 * outer.iter().sum::<usize>() as f64 / 4.0;
    let center = counts[2] as f64;
    predicted.max(center) / predicted.min(center) <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: f64 = 1.5;

    #[test]
    fn test_reference_ratios() {
        assert!(is_finder_ratio(&[1, 1, 3, 1, 1], T));
        assert!(is_finder_ratio(&[2, 2, 6, 2, 2], T));
        assert!(is_finder_ratio(&[3, 3, 10, 2, 3], T));
        assert!(!is_finder_ratio(&[3, 1, 9, 3, 3], T));
    }

    #[test]
    fn test_outer_bar_boundary() {
        // 3/2 == 1.5 sits on the boundary and is accepted
        assert!(is_finder_ratio(&[2, 3, 7, 2, 2], T));
        // 4/2 == 2.0 is rejected
        assert!(!is_finder_ratio(&[2, 4, 8, 2, 2], T));
    }

    #[test]
    fn test_center_bar_boundary() {
        // outer mean 2 -> predicted center 6
        assert!(is_finder_ratio(&[2, 2, 9, 2, 2], T)); // 9/6 == 1.5
        assert!(is_finder_ratio(&[2, 2, 4, 2, 2], T)); // 6/4 == 1.5
        assert!(!is_finder_ratio(&[2, 2, 10, 2, 2], T));
        assert!(!is_finder_ratio(&[2, 2, 3, 2, 2], T));
    }

    #[test]
    fn test_empty_bars_rejected() {
        assert!(!is_finder_ratio(&[0, 0, 0, 0, 0], T));
        assert!(!is_finder_ratio(&[0, 1, 3, 1, 1], T));
        assert!(!is_finder_ratio(&[1, 1, 0, 1, 1], T));
    }

    #[test]
    fn test_tolerance_is_respected() {
        assert!(!is_finder_ratio(&[2, 3, 7, 2, 2], 1.2));
        assert!(is_finder_ratio(&[2, 4, 8, 2, 2], 2.0));
    }
}
