// src/lib.rs

pub mod animator;
pub mod canvas;
pub mod config;
pub mod error;
pub mod events;
pub mod fps;
pub mod generator;
pub mod geometry;
pub mod intersection;
pub mod polygon;
pub mod raycast;
pub mod scene;
pub mod settings;
pub mod style;
pub mod triangulate;

pub use animator::{FrameDriver, ViewMode};
pub use canvas::Canvas;
pub use geometry::{Bounds, Point2};
pub use polygon::{Polygon, Shape};
pub use raycast::{cast_rays, RayCaster, RayHit};
pub use scene::Scene;
