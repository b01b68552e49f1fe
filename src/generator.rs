// src/generator.rs

use rand::Rng;

use crate::error::GeometryError;
use crate::geometry::Point2;
use crate::polygon::Polygon;

pub struct PolygonGenerator;

impl PolygonGenerator {
    /// Star-shaped polygon around `center`: evenly spread angles with a little jitter,
    /// each vertex at a random radius within 20% of `avg_radius`.
    pub fn generate_polygon(
        rng: &mut impl Rng,
        center: Point2,
        avg_radius: f64,
        num_vertices: usize,
    ) -> Result<Polygon, GeometryError> {
        let num_vertices = num_vertices.max(Polygon::MIN_VERTICES);
        let avg_radius = if avg_radius.is_finite() && avg_radius > 0.0 { avg_radius } else { 1.0 };

        let mut angles = Vec::with_capacity(num_vertices);
        for i in 0..num_vertices {
            angles.push((i as f64) * std::f64::consts::TAU / (num_vertices as f64));
        }

        let max_perturbation = std::f64::consts::PI / (num_vertices as f64) * 0.3;
        for angle in angles.iter_mut() {
            *angle += rng.gen_range(-max_perturbation..max_perturbation);
        }

        for i in 1..num_vertices {
            if angles[i] <= angles[i - 1] {
                angles[i] = angles[i - 1] + 0.01;
            }
        }

        let min_radius = avg_radius * 0.8;
        let max_radius = avg_radius * 1.2;

        let points: Vec<Point2> = angles
            .into_iter()
            .map(|angle| {
                let radius = rng.gen_range(min_radius..max_radius);
                Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
            })
            .collect();

        Polygon::from_points(&points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_vertices_within_radius_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let center = Point2::new(200.0, 150.0);
        for n in 3..12 {
            let poly = PolygonGenerator::generate_polygon(&mut rng, center, 50.0, n).unwrap();
            assert_eq!(poly.count(), n);
            for v in poly.vertices() {
                let r = center.distance(v);
                assert!((40.0..=60.0).contains(&r), "radius {r} out of band");
            }
        }
    }

    #[test]
    fn test_clamps_degenerate_requests() {
        let mut rng = StdRng::seed_from_u64(1);
        let poly = PolygonGenerator::generate_polygon(&mut rng, Point2::ORIGIN, -3.0, 1).unwrap();
        assert_eq!(poly.count(), Polygon::MIN_VERTICES);
        assert!(poly.area() > 0.0);
    }

    #[test]
    fn test_same_seed_same_polygon() {
        let a = PolygonGenerator::generate_polygon(&mut StdRng::seed_from_u64(42), Point2::ORIGIN, 30.0, 6).unwrap();
        let b = PolygonGenerator::generate_polygon(&mut StdRng::seed_from_u64(42), Point2::ORIGIN, 30.0, 6).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_finite_center_is_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let result = PolygonGenerator::generate_polygon(&mut rng, Point2::new(f64::NAN, 0.0), 10.0, 4);
        assert_eq!(result, Err(GeometryError::NonFiniteVertex(0)));
    }
}
