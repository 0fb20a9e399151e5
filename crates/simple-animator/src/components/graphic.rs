use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Renderable component: anything drawn with a tint color.
/// Alpha lives in the color (0.0 = invisible, 1.0 = opaque).
#[derive(Debug, Clone, Default)]
pub struct Graphic {
    pub color: Color,
}

impl Graphic {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn alpha(&self) -> f32 {
        self.color.a
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.color.a = alpha;
    }
}
