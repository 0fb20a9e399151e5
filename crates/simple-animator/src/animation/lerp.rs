// animation/lerp.rs
//
// Unclamped linear interpolation for every value type a track can drive.
// Blend factors outside [0, 1] extrapolate, which is what overshooting curves rely on.
// The `a * (1 - t) + b * t` form lands exactly on `b` at t = 1.

use glam::{Quat, Vec3, Vec4};
use crate::components::graphic::Color;

pub trait Lerp: Copy {
    fn lerp_unclamped(start: Self, end: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_unclamped(start: Self, end: Self, t: f32) -> Self {
        start * (1.0 - t) + end * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp_unclamped(start: Self, end: Self, t: f32) -> Self {
        start * (1.0 - t) + end * t
    }
}

impl Lerp for Quat {
    /// Normalized component-wise lerp along the shorter arc. Returns `end` untouched at t = 1.
    #[inline]
    fn lerp_unclamped(start: Self, end: Self, t: f32) -> Self {
        if t == 1.0 {
            return end;
        }
        let mut a = Vec4::from(start);
        let b = Vec4::from(end);
        if a.dot(b) < 0.0 {
            a = -a;
        }
        let v = a * (1.0 - t) + b * t;
        if v.length_squared() <= f32::EPSILON {
            return end;
        }
        Quat::from_vec4(v).normalize()
    }
}

impl Lerp for Color {
    #[inline]
    fn lerp_unclamped(start: Self, end: Self, t: f32) -> Self {
        Color {
            r: f32::lerp_unclamped(start.r, end.r, t),
            g: f32::lerp_unclamped(start.g, end.g, t),
            b: f32::lerp_unclamped(start.b, end.b, t),
            a: f32::lerp_unclamped(start.a, end.a, t),
        }
    }
}
