// tests/raycast_properties.rs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use raycast_fov::generator::PolygonGenerator;
use raycast_fov::geometry::{Bounds, Point2};
use raycast_fov::intersection::SegmentIntersection;
use raycast_fov::polygon::Polygon;
use raycast_fov::raycast::{RayCaster, DEFAULT_MAX_RAY_LENGTH};
use raycast_fov::{cast_rays, Scene};

const EPS: f64 = 1e-6;

fn random_polygons(seed: u64, count: usize) -> Vec<Polygon> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let center = Point2::new(rng.gen_range(-400.0..400.0), rng.gen_range(-400.0..400.0));
            let radius = rng.gen_range(20.0..120.0);
            let vertices = rng.gen_range(3..=9);
            PolygonGenerator::generate_polygon(&mut rng, center, radius, vertices).unwrap()
        })
        .collect()
}

fn distance_to_segment(p: Point2, a: Point2, b: Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(&ab);
    if len_sq == 0.0 {
        return p.distance(&a);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    p.distance(&(a + ab * t))
}

#[test]
fn test_every_ray_count_yields_that_many_endpoints_within_reach() {
    let polygons = random_polygons(1, 10);
    let origin = Point2::new(13.0, -27.0);
    for ray_count in [1, 2, 7, 90, 360, 1000] {
        let points = cast_rays(origin, ray_count, DEFAULT_MAX_RAY_LENGTH, &polygons).unwrap();
        assert_eq!(points.len(), ray_count);
        for p in &points {
            assert!(p.distance(&origin) <= DEFAULT_MAX_RAY_LENGTH + EPS);
        }
    }
}

#[test]
fn test_empty_scene_misses_land_at_max_length() {
    let polygons: Vec<Polygon> = Vec::new();
    let origin = Point2::new(5.0, 5.0);
    let hits = RayCaster::new(64, 250.0).unwrap().cast(origin, &polygons);
    assert_eq!(hits.len(), 64);
    for hit in &hits {
        assert!(hit.is_miss());
        assert!((hit.point.distance(&origin) - 250.0).abs() < EPS);
    }
}

#[test]
fn test_hits_lie_on_the_reported_edge() {
    let polygons = random_polygons(2, 8);
    let origin = Point2::ORIGIN;
    let hits = RayCaster::new(720, DEFAULT_MAX_RAY_LENGTH).unwrap().cast(origin, &polygons);
    let mut hit_count = 0;
    for hit in &hits {
        let Some(edge) = hit.edge else { continue };
        hit_count += 1;
        let (a, b) = polygons[edge.polygon].edge_at(edge.edge).unwrap();
        assert!(distance_to_segment(hit.point, a, b) < EPS);
        assert!(hit.point.distance(&origin) <= DEFAULT_MAX_RAY_LENGTH + EPS);
    }
    assert!(hit_count > 0);
}

#[test]
fn test_no_edge_is_crossed_before_the_reported_hit() {
    let polygons = random_polygons(3, 12);
    let origin = Point2::new(-50.0, 40.0);
    let caster = RayCaster::new(360, DEFAULT_MAX_RAY_LENGTH).unwrap();
    for hit in caster.cast(origin, &polygons) {
        let reach = hit.point.distance(&origin);
        let far = origin + Point2::from_angle_degrees(hit.angle_degrees) * DEFAULT_MAX_RAY_LENGTH;
        for polygon in &polygons {
            for (start, end) in polygon.edges() {
                if let Some(other) = SegmentIntersection::find(&origin, &far, &start, &end) {
                    assert!(other.point.distance(&origin) >= reach - EPS);
                }
            }
        }
    }
}

#[test]
fn test_square_around_origin_stops_four_rays_at_five() {
    let square = Polygon::from_coords(&[-5.0, -5.0, 5.0, -5.0, 5.0, 5.0, -5.0, 5.0]).unwrap();
    let points = cast_rays(Point2::ORIGIN, 4, DEFAULT_MAX_RAY_LENGTH, &[square]).unwrap();
    let expected = [
        Point2::new(5.0, 0.0),
        Point2::new(0.0, 5.0),
        Point2::new(-5.0, 0.0),
        Point2::new(0.0, -5.0),
    ];
    for (got, want) in points.iter().zip(expected.iter()) {
        assert!(got.distance(want) < EPS, "{got:?} != {want:?}");
    }
}

#[test]
fn test_casting_twice_gives_identical_output() {
    let scene = Scene::sample().unwrap();
    let caster = RayCaster::new(500, DEFAULT_MAX_RAY_LENGTH).unwrap();
    let origin = Point2::new(320.0, 240.0);
    let first = caster.cast(origin, scene.shapes());
    let second = caster.cast(origin, scene.shapes());
    assert_eq!(first, second);
}

#[test]
fn test_bounds_contain_every_vertex() {
    for polygon in random_polygons(4, 50) {
        let bounds: Bounds = polygon.bounds();
        for v in polygon.vertices() {
            assert!(bounds.contains(v), "{v:?} outside {bounds:?}");
        }
    }
}
