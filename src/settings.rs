// src/settings.rs

use serde::Deserialize;

use crate::raycast::DEFAULT_RAY_COUNT;

/// Display toggles and ray count, read once per frame by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub ray_count: usize,
    /// Axis-aligned box around every shape.
    pub show_bounds: bool,
    /// Numbered marker on every vertex.
    pub show_joints: bool,
    /// Marker at the end of every ray.
    pub show_intersections: bool,
    /// Marker at the ray origin.
    pub show_light_source: bool,
    /// Translucent fill between neighbouring rays.
    pub show_sectors: bool,
    pub show_fps: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            ray_count: DEFAULT_RAY_COUNT,
            show_bounds: false,
            show_joints: false,
            show_intersections: true,
            show_light_source: true,
            show_sectors: false,
            show_fps: false,
        }
    }
}
