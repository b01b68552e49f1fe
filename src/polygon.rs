// src/polygon.rs

use crate::error::GeometryError;
use crate::geometry::{Bounds, Point2};
use crate::style::Style;

/// Closed polygon. Edge `i` joins vertex `i` to its predecessor, so edge 0 closes
/// the loop back to the last vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2>, // Kept private so bounds always match
    bounds: Bounds,
}

impl Polygon {
    pub const MIN_VERTICES: usize = 3;

    pub fn from_points(points: &[Point2]) -> Result<Self, GeometryError> {
        let bounds = Self::validate(points)?;
        Ok(Self {
            vertices: points.to_vec(),
            bounds,
        })
    }

    /// Builds a polygon from a flat `x0, y0, x1, y1, ...` list.
    pub fn from_coords(coords: &[f64]) -> Result<Self, GeometryError> {
        Self::from_points(&Self::pair_up(coords)?)
    }

    /// Replaces the vertices from a flat coordinate list and recomputes the bounds.
    /// On error the polygon is left untouched.
    pub fn set_vertices(&mut self, coords: &[f64]) -> Result<(), GeometryError> {
        let points = Self::pair_up(coords)?;
        self.set_points(&points)
    }

    pub fn set_points(&mut self, points: &[Point2]) -> Result<(), GeometryError> {
        self.bounds = Self::validate(points)?;
        self.vertices.clear();
        self.vertices.extend_from_slice(points);
        Ok(())
    }

    fn pair_up(coords: &[f64]) -> Result<Vec<Point2>, GeometryError> {
        if coords.len() % 2 != 0 {
            return Err(GeometryError::OddCoordinateCount(coords.len()));
        }
        Ok(coords
            .chunks_exact(2)
            .map(|pair| Point2::new(pair[0], pair[1]))
            .collect())
    }

    fn validate(points: &[Point2]) -> Result<Bounds, GeometryError> {
        if points.len() < Self::MIN_VERTICES {
            return Err(GeometryError::TooFewVertices(points.len()));
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::NonFiniteVertex(index));
        }
        Bounds::from_points(points).ok_or(GeometryError::TooFewVertices(0))
    }

    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    pub fn count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, index: usize) -> Option<Point2> {
        self.vertices.get(index).copied()
    }

    /// Edge `index` as `(vertex[index], vertex[index - 1])`, wrapping at zero.
    pub fn edge_at(&self, index: usize) -> Option<(Point2, Point2)> {
        let n = self.vertices.len();
        if index >= n {
            return None;
        }
        let prev = (index + n - 1) % n;
        Some((self.vertices[index], self.vertices[prev]))
    }

    /// All edges in index order.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + n - 1) % n]))
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.vertices[i].x * self.vertices[j].y;
            area -= self.vertices[j].x * self.vertices[i].y;
        }
        area.abs() / 2.0
    }

    /// Average of the vertices.
    pub fn centroid(&self) -> Point2 {
        let sum = self
            .vertices
            .iter()
            .fold(Point2::ORIGIN, |acc, p| acc + *p);
        sum * (1.0 / self.vertices.len() as f64)
    }
}

impl AsRef<Polygon> for Polygon {
    fn as_ref(&self) -> &Polygon {
        self
    }
}

/// A polygon together with how it is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub polygon: Polygon,
    pub style: Style,
}

impl Shape {
    pub fn new(polygon: Polygon, style: Style) -> Self {
        Self { polygon, style }
    }

    /// Replaces the style wholesale; styles are never edited in place.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl AsRef<Polygon> for Shape {
    fn as_ref(&self) -> &Polygon {
        &self.polygon
    }
}
