// renderer/camera.rs
//
// Resolution-dependent camera settings: field-of-view correction for portrait
// screens, and the size of a low-resolution offscreen target.

use glam::UVec2;
use serde::{Deserialize, Serialize};

/// Convert a vertical field of view (degrees) to the horizontal one for `aspect` (width / height).
pub fn vertical_to_horizontal_fov(vertical_deg: f32, aspect: f32) -> f32 {
    let half = (vertical_deg.to_radians() * 0.5).tan() * aspect;
    2.0 * half.atan().to_degrees()
}

/// Keeps the configured angle on the narrower screen axis.
///
/// The camera's field of view is vertical. In landscape the base angle is used as-is;
/// in portrait it is widened so the horizontal extent gets the base angle instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldOfView {
    base: f32,
    current: f32,
}

impl FieldOfView {
    pub fn new(base_vertical_deg: f32) -> Self {
        Self {
            base: base_vertical_deg,
            current: base_vertical_deg,
        }
    }

    pub fn base(&self) -> f32 {
        self.base
    }

    /// Vertical field of view to apply to the camera, in degrees.
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Recompute for a new resolution and return the applied value.
    pub fn fit(&mut self, resolution: UVec2) -> f32 {
        self.current = if resolution.y > resolution.x && resolution.x > 0 {
            let inverted_aspect = resolution.y as f32 / resolution.x as f32;
            vertical_to_horizontal_fov(self.base, inverted_aspect)
        } else {
            self.base
        };
        self.current
    }

    /// Replace the base angle and refit.
    pub fn set_base(&mut self, base_vertical_deg: f32, resolution: UVec2) -> f32 {
        self.base = base_vertical_deg;
        self.fit(resolution)
    }
}

/// Texture sampling for the upscale blit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterMode {
    /// Nearest neighbour, for a pixelated look.
    #[default]
    Point,
    Bilinear,
}

/// Offscreen render target whose short side has a fixed pixel count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LowResTarget {
    /// Pixels on the shorter screen axis.
    pub short_side: u32,
    pub filter: FilterMode,
    /// Target size from the last `fit`.
    #[serde(skip)]
    pub size: UVec2,
}

impl Default for LowResTarget {
    fn default() -> Self {
        Self {
            short_side: 240,
            filter: FilterMode::Point,
            size: UVec2::ZERO,
        }
    }
}

impl LowResTarget {
    pub fn new(short_side: u32) -> Self {
        Self { short_side, ..Self::default() }
    }

    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Resize for a screen resolution, keeping its aspect ratio.
    /// A zero-sized resolution is ignored and the previous size kept.
    pub fn fit(&mut self, resolution: UVec2) -> UVec2 {
        if resolution.x == 0 || resolution.y == 0 {
            log::warn!("Ignoring degenerate resolution {} for low-res target", resolution);
            return self.size;
        }
        let short = self.short_side as f32;
        self.size = if resolution.y > resolution.x {
            let long = (short * (resolution.y as f32 / resolution.x as f32)).round() as u32;
            UVec2::new(self.short_side, long)
        } else {
            let long = (short * (resolution.x as f32 / resolution.y as f32)).round() as u32;
            UVec2::new(long, self.short_side)
        };
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_aspect_keeps_angle() {
        assert!((vertical_to_horizontal_fov(60.0, 1.0) - 60.0).abs() < 1e-4);
    }

    #[test]
    fn landscape_uses_base() {
        let mut fov = FieldOfView::new(60.0);
        assert_eq!(fov.fit(UVec2::new(1920, 1080)), 60.0);
    }

    #[test]
    fn portrait_widens_vertical_angle() {
        let mut fov = FieldOfView::new(60.0);
        let applied = fov.fit(UVec2::new(1080, 1920));
        assert!(applied > 60.0);

        // Horizontal extent of the widened camera equals the base angle.
        let horizontal = vertical_to_horizontal_fov(applied, 1080.0 / 1920.0);
        assert!((horizontal - 60.0).abs() < 1e-3, "got {}", horizontal);
    }

    #[test]
    fn set_base_refits() {
        let mut fov = FieldOfView::new(60.0);
        assert_eq!(fov.set_base(45.0, UVec2::new(800, 600)), 45.0);
        assert_eq!(fov.base(), 45.0);
    }

    #[test]
    fn low_res_landscape_and_portrait() {
        let mut target = LowResTarget::default();
        assert_eq!(target.fit(UVec2::new(1920, 1080)), UVec2::new(427, 240));
        assert_eq!(target.fit(UVec2::new(1080, 1920)), UVec2::new(240, 427));
        assert_eq!(target.filter, FilterMode::Point);
    }

    #[test]
    fn low_res_ignores_zero_resolution() {
        let mut target = LowResTarget::new(100);
        target.fit(UVec2::new(200, 100));
        assert_eq!(target.fit(UVec2::new(0, 100)), UVec2::new(200, 100));
    }

    #[test]
    fn low_res_settings_from_json() {
        let target: LowResTarget = serde_json::from_str(r#"{ "filter": "Bilinear" }"#).unwrap();
        assert_eq!(target.short_side, 240);
        assert_eq!(target.filter, FilterMode::Bilinear);
        assert_eq!(target.size, UVec2::ZERO);
    }
}
