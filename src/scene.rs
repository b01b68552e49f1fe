// src/scene.rs

use rand::Rng;

use crate::error::GeometryError;
use crate::generator::PolygonGenerator;
use crate::geometry::{Bounds, Point2};
use crate::polygon::{Polygon, Shape};
use crate::style::{Color, Style};

const RANDOM_FILLS: [Color; 5] = [Color::TEAL, Color::PALE_GREEN, Color::TOMATO, Color::CYAN, Color::BISQUE];

/// Shapes in insertion order. The order is part of the ray-cast contract: ties go
/// to the shape added first.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three overlapping triangles shown at startup.
    pub fn sample() -> Result<Self, GeometryError> {
        let mut scene = Self::new();
        scene.add(Shape::new(
            Polygon::from_coords(&[300.0, 250.0, 50.0, 70.0, 150.0, 170.0])?,
            Style::default().with_fill(Color::TEAL).with_stroke(Color::BLACK).with_width(5.0),
        ));
        scene.add(Shape::new(
            Polygon::from_coords(&[30.0, 40.0, 400.0, 60.0, 90.0, 80.0])?,
            Style::default().with_fill(Color::PALE_GREEN).with_stroke(Color::BLACK).with_width(3.0),
        ));
        scene.add(Shape::new(
            Polygon::from_coords(&[350.0, 200.0, 475.0, 110.0, 130.0, 500.0])?,
            Style::default().with_fill(Color::TOMATO).with_stroke(Color::BLACK).with_width(4.0),
        ));
        Ok(scene)
    }

    pub fn add(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.shapes.iter().map(|s| &s.polygon)
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Replaces the shapes with `count` generated polygons whose centres lie in `area`.
    /// On error the previous shapes are kept.
    pub fn randomize(&mut self, rng: &mut impl Rng, count: usize, area: Bounds) -> Result<(), GeometryError> {
        let mut shapes = Vec::with_capacity(count);
        let max_radius = (area.width().min(area.height()) / 6.0).max(10.0);
        for i in 0..count {
            let center = Point2::new(
                area.min_x + rng.gen::<f64>() * area.width(),
                area.min_y + rng.gen::<f64>() * area.height(),
            );
            let radius = rng.gen_range(10.0..=max_radius);
            let vertices = rng.gen_range(3..=8);
            let polygon = PolygonGenerator::generate_polygon(rng, center, radius, vertices)?;
            let style = Style::default()
                .with_fill(RANDOM_FILLS[i % RANDOM_FILLS.len()])
                .with_stroke(Color::BLACK)
                .with_width(rng.gen_range(1.0..5.0));
            shapes.push(Shape::new(polygon, style));
        }
        self.shapes = shapes;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_scene() {
        let scene = Scene::sample().unwrap();
        assert_eq!(scene.len(), 3);
        let fills: Vec<_> = scene.shapes().iter().map(|s| s.style.fill).collect();
        assert_eq!(fills, vec![Some(Color::TEAL), Some(Color::PALE_GREEN), Some(Color::TOMATO)]);
        let widths: Vec<_> = scene.shapes().iter().map(|s| s.style.width).collect();
        assert_eq!(widths, vec![5.0, 3.0, 4.0]);
        assert!(scene.polygons().all(|p| p.count() == 3));
    }

    #[test]
    fn test_randomize_replaces_shapes() {
        let mut scene = Scene::sample().unwrap();
        let area = Bounds { min_x: 0.0, min_y: 0.0, max_x: 800.0, max_y: 600.0 };
        scene.randomize(&mut StdRng::seed_from_u64(3), 5, area).unwrap();
        assert_eq!(scene.len(), 5);
        for shape in scene.shapes() {
            assert!((3..=8).contains(&shape.polygon.count()));
            assert_eq!(shape.style.stroke, Some(Color::BLACK));
        }
        scene.clear();
        assert!(scene.is_empty());
    }
}
