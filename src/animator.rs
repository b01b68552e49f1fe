//! Per-frame driver and the views it can show.

use std::cell::Cell;
use std::rc::Rc;

use serde::Deserialize;

use crate::canvas::Canvas;
use crate::error::RaycastError;
use crate::events::{PointerEventKind, PointerEvents, Subscription};
use crate::fps::FpsCounter;
use crate::geometry::Point2;
use crate::raycast::{RayCaster, RayHit};
use crate::scene::Scene;
use crate::settings::DisplaySettings;
use crate::style::Color;

const MARKER_RADIUS: f32 = 5.0;
const RAY_WIDTH: f32 = 1.0;
const BOUNDS_WIDTH: f32 = 1.0;
const TEXT_LABEL: &str = "Ray Cast";

/// What gets drawn underneath the overlays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Shapes plus a full fan of rays from the pointer.
    #[default]
    MultiRay,
    StaticShapes,
    /// A text label following the pointer.
    Text,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::MultiRay, ViewMode::StaticShapes, ViewMode::Text];

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::MultiRay => "Multi ray",
            ViewMode::StaticShapes => "Static shapes",
            ViewMode::Text => "Text",
        }
    }

    pub fn background(&self) -> Color {
        match self {
            ViewMode::MultiRay => Color::ORCHID,
            ViewMode::StaticShapes => Color::BISQUE,
            ViewMode::Text => Color::SLATE,
        }
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        frame.canvas.clear(self.background());
        match self {
            ViewMode::MultiRay => {
                draw_shapes(frame);
                draw_rays(frame);
            }
            ViewMode::StaticShapes => draw_shapes(frame),
            ViewMode::Text => {
                let at = frame.origin;
                frame.canvas.text(Point2::new(at.x + 2.0, at.y + 2.0), TEXT_LABEL, 50.0, Color::CRIMSON);
                frame.canvas.text(at, TEXT_LABEL, 50.0, Color::AQUA);
            }
        }
    }
}

struct Frame<'a> {
    canvas: &'a mut dyn Canvas,
    scene: &'a Scene,
    settings: &'a DisplaySettings,
    origin: Point2,
    caster: &'a RayCaster,
    hits: &'a mut Vec<RayHit>,
}

fn draw_shapes(frame: &mut Frame<'_>) {
    for shape in frame.scene.shapes() {
        frame.canvas.draw_shape(shape);
    }
}

fn draw_rays(frame: &mut Frame<'_>) {
    frame.caster.cast_into(frame.origin, frame.scene.shapes(), frame.hits);

    if frame.settings.show_sectors && frame.hits.len() >= 3 {
        let light = Color::GHOST_WHITE.with_alpha(0.35);
        for (i, hit) in frame.hits.iter().enumerate() {
            let next = &frame.hits[(i + 1) % frame.hits.len()];
            frame.canvas.fill_polygon(&[frame.origin, hit.point, next.point], light);
        }
    }

    for hit in frame.hits.iter() {
        frame.canvas.line(frame.origin, hit.point, Color::BLACK, RAY_WIDTH);
        if frame.settings.show_intersections {
            frame.canvas.fill_circle(hit.point, MARKER_RADIUS, Color::MAGENTA);
        }
    }
}

/// Runs one view per frame and draws the shared overlays on top.
///
/// The pointer origin is written by pointer handlers and read by [`FrameDriver::tick`],
/// both on the render thread.
pub struct FrameDriver {
    view: ViewMode,
    running: bool,
    pointer: Rc<Cell<Point2>>,
    subscriptions: Vec<Subscription>,
    fps: FpsCounter,
    caster: RayCaster,
    hits: Vec<RayHit>,
}

impl FrameDriver {
    pub fn new(max_ray_length: f64) -> Result<Self, RaycastError> {
        Ok(Self {
            view: ViewMode::default(),
            running: false,
            pointer: Rc::new(Cell::new(Point2::ORIGIN)),
            subscriptions: Vec::new(),
            fps: FpsCounter::new(Point2::new(1.0, 25.0)),
            caster: RayCaster::new(0, max_ray_length)?,
            hits: Vec::new(),
        })
    }

    /// Stops the current view and drops its pointer handlers, then installs and starts `view`.
    pub fn set_view(&mut self, view: ViewMode, events: &PointerEvents) {
        self.stop();
        self.subscriptions.clear();

        log::debug!("switching view {:?} -> {:?}", self.view, view);
        self.view = view;

        for kind in [PointerEventKind::Dragged, PointerEventKind::Moved] {
            let pointer = Rc::clone(&self.pointer);
            self.subscriptions.push(events.subscribe(kind, move |p| pointer.set(p)));
        }
        self.start();
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Later ticks do nothing until [`FrameDriver::start`].
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pointer(&self) -> Point2 {
        self.pointer.get()
    }

    pub fn set_pointer(&self, position: Point2) {
        self.pointer.set(position);
    }

    pub fn max_ray_length(&self) -> f64 {
        self.caster.max_length()
    }

    /// Draws one full frame. `now` is a monotonic timestamp in nanoseconds.
    pub fn tick(&mut self, now: u64, canvas: &mut dyn Canvas, scene: &Scene, settings: &DisplaySettings) {
        if !self.running {
            return;
        }
        if settings.show_fps {
            self.fps.calculate(now);
        }

        self.caster.set_ray_count(settings.ray_count);
        let origin = self.pointer.get();
        let mut frame = Frame {
            canvas: &mut *canvas,
            scene,
            settings,
            origin,
            caster: &self.caster,
            hits: &mut self.hits,
        };
        self.view.draw(&mut frame);

        if settings.show_light_source {
            canvas.fill_circle(origin, MARKER_RADIUS, Color::MAGENTA);
        }

        if settings.show_bounds || settings.show_joints {
            for shape in scene.shapes() {
                if settings.show_bounds {
                    canvas.stroke_rect(&shape.polygon.bounds(), Color::RED, BOUNDS_WIDTH);
                }
                if settings.show_joints {
                    canvas.draw_joints(&shape.polygon);
                }
            }
        }

        if settings.show_fps {
            canvas.text(self.fps.position(), self.fps.display(), self.fps.size(), self.fps.color());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};
    use crate::polygon::{Polygon, Shape};
    use crate::style::Style;

    fn square_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add(Shape::new(
            Polygon::from_coords(&[-5.0, -5.0, 5.0, -5.0, 5.0, 5.0, -5.0, 5.0]).unwrap(),
            Style::default(),
        ));
        scene
    }

    fn quiet_settings(ray_count: usize) -> DisplaySettings {
        DisplaySettings {
            ray_count,
            show_bounds: false,
            show_joints: false,
            show_intersections: false,
            show_light_source: false,
            show_sectors: false,
            show_fps: false,
        }
    }

    #[test]
    fn test_stopped_driver_draws_nothing() {
        let mut driver = FrameDriver::new(700.0).unwrap();
        let mut canvas = RecordingCanvas::new();
        driver.tick(0, &mut canvas, &square_scene(), &DisplaySettings::default());
        assert!(canvas.commands.is_empty());
    }

    #[test]
    fn test_multi_ray_frame() {
        let events = PointerEvents::new();
        let mut driver = FrameDriver::new(700.0).unwrap();
        driver.set_view(ViewMode::MultiRay, &events);
        let mut canvas = RecordingCanvas::new();

        driver.tick(0, &mut canvas, &square_scene(), &quiet_settings(4));

        assert_eq!(canvas.commands[0], DrawCommand::Clear(Color::ORCHID));
        let lines: Vec<_> = canvas.lines().collect();
        assert_eq!(lines.len(), 4);
        for (from, to) in lines {
            assert_eq!(from, Point2::ORIGIN);
            assert!((to.length() - 5.0).abs() < 1e-9);
        }
        assert_eq!(canvas.circles().count(), 0);
    }

    #[test]
    fn test_overlays_follow_settings() {
        let events = PointerEvents::new();
        let mut driver = FrameDriver::new(700.0).unwrap();
        driver.set_view(ViewMode::MultiRay, &events);
        events.dispatch(PointerEventKind::Moved, Point2::new(1.0, 1.0));

        let settings = DisplaySettings {
            show_intersections: true,
            show_light_source: true,
            show_bounds: true,
            show_joints: true,
            show_fps: true,
            ..quiet_settings(8)
        };
        let mut canvas = RecordingCanvas::new();
        driver.tick(1_000_000_000, &mut canvas, &square_scene(), &settings);

        // 8 intersection markers, 1 light source, 4 joints.
        assert_eq!(canvas.circles().count(), 13);
        assert!(canvas.circles().any(|(c, color)| c == Point2::new(1.0, 1.0) && color == Color::MAGENTA));
        assert!(canvas
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::StrokePolygon { color, .. } if *color == Color::RED)));
        let texts: Vec<_> = canvas.texts().collect();
        assert_eq!(texts, vec!["0", "1", "2", "3", "0"]);
    }

    #[test]
    fn test_sectors_fill_between_rays() {
        let events = PointerEvents::new();
        let mut driver = FrameDriver::new(700.0).unwrap();
        driver.set_view(ViewMode::MultiRay, &events);
        let settings = DisplaySettings { show_sectors: true, ..quiet_settings(6) };
        let mut canvas = RecordingCanvas::new();
        driver.tick(0, &mut canvas, &square_scene(), &settings);
        let sectors = canvas
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillPolygon { points, .. } if points.len() == 3))
            .count();
        assert_eq!(sectors, 6);
    }

    #[test]
    fn test_pointer_events_move_origin() {
        let events = PointerEvents::new();
        let mut driver = FrameDriver::new(700.0).unwrap();
        driver.set_view(ViewMode::Text, &events);
        events.dispatch(PointerEventKind::Dragged, Point2::new(40.0, 60.0));
        assert_eq!(driver.pointer(), Point2::new(40.0, 60.0));

        let mut canvas = RecordingCanvas::new();
        driver.tick(0, &mut canvas, &Scene::new(), &quiet_settings(0));
        assert!(canvas.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Text { position, text, .. } if *position == Point2::new(40.0, 60.0) && text == TEXT_LABEL
        )));
    }

    #[test]
    fn test_switching_views_replaces_handlers() {
        let events = PointerEvents::new();
        let mut driver = FrameDriver::new(700.0).unwrap();
        driver.set_view(ViewMode::MultiRay, &events);
        assert_eq!(events.handler_count(), 2);
        driver.set_view(ViewMode::StaticShapes, &events);
        assert_eq!(events.handler_count(), 2);
        assert!(driver.is_running());
        assert_eq!(driver.view(), ViewMode::StaticShapes);

        let mut canvas = RecordingCanvas::new();
        driver.tick(0, &mut canvas, &square_scene(), &quiet_settings(16));
        assert_eq!(canvas.commands[0], DrawCommand::Clear(Color::BISQUE));
        assert_eq!(canvas.lines().count(), 0);

        drop(driver);
        assert_eq!(events.handler_count(), 0);
    }
}
