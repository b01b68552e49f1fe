// src/intersection.rs

use crate::geometry::Point2;

/// Segments whose directions differ by a sine at or below this are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// Where two segments cross.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentHit {
    pub point: Point2,
    /// Parameter along the first segment, in `[0, 1]`.
    pub t: f64,
    /// Parameter along the second segment, in `[0, 1]`.
    pub u: f64,
}

pub struct SegmentIntersection;

impl SegmentIntersection {
    /// Intersects the finite segments `a1 -> a2` and `b1 -> b2`.
    ///
    /// Both parameters must fall in the closed unit interval. Parallel and
    /// collinear pairs report no intersection.
    #[inline]
    pub fn find(a1: &Point2, a2: &Point2, b1: &Point2, b2: &Point2) -> Option<SegmentHit> {
        let dx_a = a2.x - a1.x;
        let dy_a = a2.y - a1.y;
        let dx_b = b2.x - b1.x;
        let dy_b = b2.y - b1.y;

        // The cross product is |A| * |B| * sin(angle); compare the sine, not the raw value.
        let denominator = dx_a * dy_b - dy_a * dx_b;
        if denominator.abs() <= PARALLEL_EPSILON * (dx_a.hypot(dy_a) * dx_b.hypot(dy_b)) {
            return None;
        }

        let ox = b1.x - a1.x;
        let oy = b1.y - a1.y;
        let t = (ox * dy_b - oy * dx_b) / denominator;
        let u = (ox * dy_a - oy * dx_a) / denominator;

        if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
            return None;
        }

        Some(SegmentHit {
            point: Point2::new(a1.x + t * dx_a, a1.y + t * dy_a),
            t,
            u,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn test_crossing_segments() {
        let hit = SegmentIntersection::find(&p(0.0, 0.0), &p(10.0, 0.0), &p(5.0, -5.0), &p(5.0, 5.0))
            .expect("segments cross");
        assert_eq!(hit.point, p(5.0, 0.0));
        assert_eq!(hit.t, 0.5);
        assert_eq!(hit.u, 0.5);
    }

    #[test]
    fn test_parallel_segments() {
        assert!(SegmentIntersection::find(&p(0.0, 0.0), &p(10.0, 0.0), &p(0.0, 1.0), &p(10.0, 1.0)).is_none());
    }

    #[test]
    fn test_collinear_overlap_is_not_a_hit() {
        assert!(SegmentIntersection::find(&p(0.0, 0.0), &p(10.0, 0.0), &p(2.0, 0.0), &p(8.0, 0.0)).is_none());
    }

    #[test]
    fn test_lines_cross_outside_segments() {
        // Infinite lines meet at (5, 0) but B stops short of it.
        assert!(SegmentIntersection::find(&p(0.0, 0.0), &p(10.0, 0.0), &p(5.0, 1.0), &p(5.0, 5.0)).is_none());
        // Infinite lines meet at (15, 0), past the end of A.
        assert!(SegmentIntersection::find(&p(0.0, 0.0), &p(10.0, 0.0), &p(15.0, -1.0), &p(15.0, 1.0)).is_none());
    }

    #[test]
    fn test_endpoint_touch_counts() {
        let hit = SegmentIntersection::find(&p(0.0, 0.0), &p(10.0, 0.0), &p(10.0, 0.0), &p(10.0, 4.0))
            .expect("touching endpoints intersect");
        assert_eq!(hit.point, p(10.0, 0.0));
        assert_eq!(hit.t, 1.0);
        assert_eq!(hit.u, 0.0);
    }

    #[test]
    fn test_tiny_perpendicular_segments_cross() {
        let hit = SegmentIntersection::find(&p(0.0, 0.0), &p(1e-5, 0.0), &p(5e-6, -5e-6), &p(5e-6, 5e-6))
            .expect("short segments still cross");
        assert!((hit.point.x - 5e-6).abs() < 1e-18);
        assert!((hit.t - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_length_segment_never_hits() {
        assert!(SegmentIntersection::find(&p(0.0, 0.0), &p(10.0, 0.0), &p(5.0, 0.0), &p(5.0, 0.0)).is_none());
    }

    #[test]
    fn test_t_measures_along_first_segment() {
        let hit = SegmentIntersection::find(&p(0.0, 0.0), &p(0.0, 100.0), &p(-1.0, 25.0), &p(1.0, 25.0)).unwrap();
        assert!((hit.t - 0.25).abs() < 1e-12);
        assert!((hit.point.y - 25.0).abs() < 1e-12);
    }
}
