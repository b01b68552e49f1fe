//! Drawing surface used by the frame driver.

use crate::geometry::{Bounds, Point2};
use crate::polygon::{Polygon, Shape};
use crate::style::Color;

/// Immediate-mode 2D drawing in screen coordinates (origin top-left, y down).
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_polygon(&mut self, points: &[Point2], color: Color);
    fn stroke_polygon(&mut self, points: &[Point2], color: Color, width: f32);
    fn line(&mut self, from: Point2, to: Point2, color: Color, width: f32);
    fn fill_circle(&mut self, center: Point2, radius: f32, color: Color);
    fn text(&mut self, position: Point2, text: &str, size: f32, color: Color);

    fn stroke_rect(&mut self, bounds: &Bounds, color: Color, width: f32) {
        self.stroke_polygon(&bounds.corners(), color, width);
    }

    /// Stroke first, then fill over it.
    fn draw_shape(&mut self, shape: &Shape) {
        let points = shape.polygon.vertices();
        if let Some(stroke) = shape.style.stroke {
            self.stroke_polygon(points, stroke, shape.style.width);
        }
        if let Some(fill) = shape.style.fill {
            self.fill_polygon(points, fill);
        }
    }

    /// Numbered dot on every vertex.
    fn draw_joints(&mut self, polygon: &Polygon) {
        for (i, v) in polygon.vertices().iter().enumerate() {
            let label_at = Point2::new(v.x - 5.0, v.y - 5.0);
            self.text(label_at, &i.to_string(), 12.0, Color::BLACK);
            self.fill_circle(*v, 5.0, Color::BLACK);
        }
    }
}

/// One recorded call on a [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillPolygon { points: Vec<Point2>, color: Color },
    StrokePolygon { points: Vec<Point2>, color: Color, width: f32 },
    Line { from: Point2, to: Point2, color: Color, width: f32 },
    FillCircle { center: Point2, radius: f32, color: Color },
    Text { position: Point2, text: String, size: f32, color: Color },
}

/// Canvas that keeps a log of calls instead of drawing. Used for headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (Point2, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillCircle { center, color, .. } => Some((*center, *color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_polygon(&mut self, points: &[Point2], color: Color) {
        self.commands.push(DrawCommand::FillPolygon { points: points.to_vec(), color });
    }

    fn stroke_polygon(&mut self, points: &[Point2], color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokePolygon { points: points.to_vec(), color, width });
    }

    fn line(&mut self, from: Point2, to: Point2, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line { from, to, color, width });
    }

    fn fill_circle(&mut self, center: Point2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn text(&mut self, position: Point2, text: &str, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            position,
            text: text.to_string(),
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    #[test]
    fn test_draw_shape_strokes_before_fill() {
        let polygon = Polygon::from_coords(&[0.0, 0.0, 10.0, 0.0, 0.0, 10.0]).unwrap();
        let shape = Shape::new(polygon, Style::new(Some(Color::TEAL), Some(Color::BLACK), 5.0));
        let mut canvas = RecordingCanvas::new();
        canvas.draw_shape(&shape);
        assert!(matches!(canvas.commands[0], DrawCommand::StrokePolygon { width, .. } if width == 5.0));
        assert!(matches!(canvas.commands[1], DrawCommand::FillPolygon { color, .. } if color == Color::TEAL));
    }

    #[test]
    fn test_unstyled_parts_are_skipped() {
        let polygon = Polygon::from_coords(&[0.0, 0.0, 10.0, 0.0, 0.0, 10.0]).unwrap();
        let shape = Shape::new(polygon, Style::default().without_stroke());
        let mut canvas = RecordingCanvas::new();
        canvas.draw_shape(&shape);
        assert_eq!(canvas.commands.len(), 1);
    }

    #[test]
    fn test_joints_are_labelled() {
        let polygon = Polygon::from_coords(&[0.0, 0.0, 10.0, 0.0, 0.0, 10.0]).unwrap();
        let mut canvas = RecordingCanvas::new();
        canvas.draw_joints(&polygon);
        assert_eq!(canvas.texts().collect::<Vec<_>>(), vec!["0", "1", "2"]);
        assert_eq!(canvas.circles().count(), 3);
    }
}
