// src/fps.rs

use crate::geometry::Point2;
use crate::style::Color;

pub const ONE_SECOND_NANOS: u64 = 1_000_000_000;
pub const HALF_SECOND_NANOS: u64 = ONE_SECOND_NANOS / 2;

/// Frame counter refreshed every half second.
#[derive(Clone, Debug)]
pub struct FpsCounter {
    position: Point2,
    size: f32,
    color: Color,
    frame_count: u32,
    last_time: u64,
    display: String,
}

impl FpsCounter {
    pub fn new(position: Point2) -> Self {
        Self {
            position,
            size: 24.0,
            color: Color::RED,
            frame_count: 0,
            last_time: 0,
            display: String::new(),
        }
    }

    /// Records one frame at `now` (nanoseconds on any monotonic clock).
    pub fn calculate(&mut self, now: u64) {
        if now.saturating_sub(self.last_time) > HALF_SECOND_NANOS {
            // Half-second window, doubled to frames per second.
            self.display = (self.frame_count * 2).to_string();
            self.frame_count = 0;
            self.last_time = now;
        }
        self.frame_count += 1;
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn position(&self) -> Point2 {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn color(&self) -> Color {
        self.color
    }
}
