//! Ear-clipping triangulation for simple polygons of either winding.

use crate::geometry::Point2;

/// Triangles as index triples into `points`. Leftover vertices that form no ear
/// (degenerate or self-intersecting input) are closed with a fan.
pub fn triangulate(points: &[Point2]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    let mut triangles = Vec::with_capacity(n - 2);
    let ccw = signed_area(points) >= 0.0;
    let mut remaining: Vec<usize> = (0..n).collect();

    while remaining.len() > 3 {
        let m = remaining.len();
        let mut found_ear = false;

        for i in 0..m {
            let prev = remaining[(i + m - 1) % m];
            let curr = remaining[i];
            let next = remaining[(i + 1) % m];
            let (a, b, c) = (points[prev], points[curr], points[next]);

            let turn = (b - a).cross(&(c - a));
            let is_convex = if ccw { turn > 0.0 } else { turn < 0.0 };
            if !is_convex {
                continue;
            }

            let blocked = remaining
                .iter()
                .filter(|&&j| j != prev && j != curr && j != next)
                .any(|&j| point_in_triangle(points[j], a, b, c));
            if blocked {
                continue;
            }

            triangles.push([prev, curr, next]);
            remaining.remove(i);
            found_ear = true;
            break;
        }

        if !found_ear {
            break;
        }
    }

    for k in 1..remaining.len() - 1 {
        triangles.push([remaining[0], remaining[k], remaining[k + 1]]);
    }
    triangles
}

/// Positive for counter-clockwise in a y-up frame.
fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].cross(&points[(i + 1) % n]))
        .sum::<f64>()
        / 2.0
}

fn point_in_triangle(p: Point2, a: Point2, b: Point2, c: Point2) -> bool {
    let v0 = c - a;
    let v1 = b - a;
    let v2 = p - a;

    let dot00 = v0.dot(&v0);
    let dot01 = v0.dot(&v1);
    let dot02 = v0.dot(&v2);
    let dot11 = v1.dot(&v1);
    let dot12 = v1.dot(&v2);

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom.abs() < f64::EPSILON {
        return false;
    }
    let u = (dot11 * dot02 - dot01 * dot12) / denom;
    let v = (dot00 * dot12 - dot01 * dot02) / denom;

    let eps = 1e-10;
    u > eps && v > eps && (u + v) < 1.0 - eps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[f64]) -> Vec<Point2> {
        coords.chunks_exact(2).map(|c| Point2::new(c[0], c[1])).collect()
    }

    fn covered_area(points: &[Point2], triangles: &[[usize; 3]]) -> f64 {
        triangles
            .iter()
            .map(|[a, b, c]| ((points[*b] - points[*a]).cross(&(points[*c] - points[*a]))).abs() / 2.0)
            .sum()
    }

    #[test]
    fn test_triangle_passthrough() {
        let p = pts(&[0.0, 0.0, 4.0, 0.0, 0.0, 3.0]);
        assert_eq!(triangulate(&p), vec![[0, 1, 2]]);
    }

    #[test]
    fn test_square_both_windings() {
        let ccw = pts(&[0.0, 0.0, 2.0, 0.0, 2.0, 2.0, 0.0, 2.0]);
        let mut cw = ccw.clone();
        cw.reverse();
        for p in [ccw, cw] {
            let tris = triangulate(&p);
            assert_eq!(tris.len(), 2);
            assert!((covered_area(&p, &tris) - 4.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_concave_arrow() {
        // Chevron with a reflex vertex at (2, 1); a naive fan would spill outside.
        let p = pts(&[0.0, 0.0, 4.0, 0.0, 4.0, 3.0, 2.0, 1.0, 0.0, 3.0]);
        let tris = triangulate(&p);
        assert_eq!(tris.len(), 3);
        assert!((covered_area(&p, &tris) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_points() {
        assert!(triangulate(&pts(&[0.0, 0.0, 1.0, 1.0])).is_empty());
    }
}
