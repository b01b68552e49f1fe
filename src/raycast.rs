//! Brute-force ray fan against polygon edges.
//!
//! Every ray is tested against every edge of every polygon, in scene order and
//! then edge order. The nearest crossing wins; on an exact tie the first one
//! found is kept, so results depend on iteration order and nothing else.

use crate::error::RaycastError;
use crate::geometry::Point2;
use crate::intersection::SegmentIntersection;
use crate::polygon::Polygon;

pub const DEFAULT_MAX_RAY_LENGTH: f64 = 700.0;
pub const DEFAULT_RAY_COUNT: usize = 360;

/// Identifies the edge a ray stopped on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeRef {
    pub polygon: usize,
    pub edge: usize,
}

/// Terminal point of one ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub angle_degrees: f64,
    pub point: Point2,
    /// Fraction of the max ray length travelled, `1.0` on a miss.
    pub t: f64,
    /// `None` when the ray reached max length without crossing an edge.
    pub edge: Option<EdgeRef>,
}

impl RayHit {
    pub fn is_miss(&self) -> bool {
        self.edge.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayCaster {
    ray_count: usize,
    max_length: f64,
}

impl Default for RayCaster {
    fn default() -> Self {
        Self {
            ray_count: DEFAULT_RAY_COUNT,
            max_length: DEFAULT_MAX_RAY_LENGTH,
        }
    }
}

impl RayCaster {
    pub fn new(ray_count: usize, max_length: f64) -> Result<Self, RaycastError> {
        if !max_length.is_finite() || max_length <= 0.0 {
            return Err(RaycastError::InvalidMaxLength(max_length));
        }
        Ok(Self { ray_count, max_length })
    }

    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    /// Zero means no rays are cast.
    pub fn set_ray_count(&mut self, ray_count: usize) {
        self.ray_count = ray_count;
    }

    pub fn max_length(&self) -> f64 {
        self.max_length
    }

    /// Angular step between consecutive rays, or `None` with no rays.
    pub fn angle_step(&self) -> Option<f64> {
        if self.ray_count == 0 {
            None
        } else {
            Some(360.0 / self.ray_count as f64)
        }
    }

    pub fn cast<P: AsRef<Polygon>>(&self, origin: Point2, polygons: &[P]) -> Vec<RayHit> {
        let mut hits = Vec::with_capacity(self.ray_count);
        self.cast_into(origin, polygons, &mut hits);
        hits
    }

    /// Clears `out` and fills it with one hit per ray, ray `i` at `i * 360 / N` degrees.
    pub fn cast_into<P: AsRef<Polygon>>(&self, origin: Point2, polygons: &[P], out: &mut Vec<RayHit>) {
        out.clear();
        let Some(step) = self.angle_step() else {
            return;
        };
        out.reserve(self.ray_count);
        for i in 0..self.ray_count {
            out.push(self.cast_ray(origin, i as f64 * step, polygons));
        }
    }

    pub fn cast_ray<P: AsRef<Polygon>>(&self, origin: Point2, angle_degrees: f64, polygons: &[P]) -> RayHit {
        let direction = Point2::from_angle_degrees(angle_degrees);
        let far = origin + direction * self.max_length;

        let mut best = RayHit {
            angle_degrees,
            point: far,
            t: 1.0,
            edge: None,
        };
        let mut best_t = f64::INFINITY;

        for (polygon_index, polygon) in polygons.iter().enumerate() {
            for (edge_index, (start, end)) in polygon.as_ref().edges().enumerate() {
                let Some(hit) = SegmentIntersection::find(&origin, &far, &start, &end) else {
                    continue;
                };
                // Strictly closer only; an equal distance never replaces the earlier edge.
                if hit.t < best_t {
                    best_t = hit.t;
                    best.point = hit.point;
                    best.t = hit.t;
                    best.edge = Some(EdgeRef {
                        polygon: polygon_index,
                        edge: edge_index,
                    });
                }
            }
        }
        best
    }
}

/// Endpoints of `ray_count` rays from `origin`, nearest edge crossing or max length.
pub fn cast_rays<P: AsRef<Polygon>>(
    origin: Point2,
    ray_count: usize,
    max_length: f64,
    polygons: &[P],
) -> Result<Vec<Point2>, RaycastError> {
    let caster = RayCaster::new(ray_count, max_length)?;
    Ok(caster
        .cast(origin, polygons)
        .into_iter()
        .map(|hit| hit.point)
        .collect())
}
