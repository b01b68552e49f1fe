// src/style.rs

/// Straight RGBA in `[0, 1]`, the layout the vertex buffer expects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 0.502, 0.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const AQUA: Color = Color::CYAN;
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const TEAL: Color = Color::rgb(0.0, 0.502, 0.502);
    pub const PALE_GREEN: Color = Color::rgb(0.596, 0.984, 0.596);
    pub const TOMATO: Color = Color::rgb(1.0, 0.388, 0.278);
    pub const ORCHID: Color = Color::rgb(0.855, 0.439, 0.839);
    pub const GHOST_WHITE: Color = Color::rgb(0.973, 0.973, 1.0);
    pub const BISQUE: Color = Color::rgb(1.0, 0.894, 0.769);
    pub const CRIMSON: Color = Color::rgb(0.863, 0.078, 0.235);
    pub const SLATE: Color = Color::rgb(0.184, 0.310, 0.310);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color([r, g, b, 1.0])
    }

    pub const fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.0;
        Color([r, g, b, alpha])
    }

    pub fn to_array(self) -> [f32; 4] {
        self.0
    }
}

/// How a shape is painted. Values are replaced, never mutated through a shared handle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub width: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Color::CYAN),
            stroke: Some(Color::GREEN),
            width: 1.0,
        }
    }
}

impl Style {
    pub fn new(fill: Option<Color>, stroke: Option<Color>, width: f32) -> Self {
        Self { fill, stroke, width }
    }

    pub fn with_fill(self, fill: Color) -> Self {
        Self { fill: Some(fill), ..self }
    }

    pub fn with_stroke(self, stroke: Color) -> Self {
        Self { stroke: Some(stroke), ..self }
    }

    pub fn with_width(self, width: f32) -> Self {
        Self { width, ..self }
    }

    pub fn without_fill(self) -> Self {
        Self { fill: None, ..self }
    }

    pub fn without_stroke(self) -> Self {
        Self { stroke: None, ..self }
    }
}
