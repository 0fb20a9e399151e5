// animation/curve.rs
//
// Blend curves: map a track's progress to the factor handed to `Lerp::lerp_unclamped`.
// Input is clamped to the curve's domain; output is not, so Back/Elastic presets and
// keyframes with tangents can overshoot.

use std::f32::consts::PI;
use std::fmt;
use std::sync::Arc;

/// Built-in easing presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Hermite ease-in-out with flat tangents (`3t² - 2t³`).
    #[default]
    SmoothStep,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineIn,
    SineOut,
    SineInOut,
    /// Pulls back before moving forward.
    BackIn,
    /// Overshoots the end then settles.
    BackOut,
    BounceOut,
    ElasticOut,
}

const BACK_C1: f32 = 1.70158;
const BACK_C3: f32 = BACK_C1 + 1.0;

impl Easing {
    /// Evaluate at `t`, clamped to [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
            Easing::QuadIn => t.powi(2),
            Easing::QuadOut => mirror(t, |x| x.powi(2)),
            Easing::QuadInOut => in_out(t, |x| x.powi(2)),
            Easing::CubicIn => t.powi(3),
            Easing::CubicOut => mirror(t, |x| x.powi(3)),
            Easing::CubicInOut => in_out(t, |x| x.powi(3)),
            Easing::SineIn => 1.0 - (t * PI * 0.5).cos(),
            Easing::SineOut => (t * PI * 0.5).sin(),
            Easing::SineInOut => 0.5 * (1.0 - (PI * t).cos()),
            Easing::BackIn => back_in(t),
            Easing::BackOut => mirror(t, back_in),
            Easing::BounceOut => bounce_out(t),
            Easing::ElasticOut => elastic_out(t),
        }
    }
}

/// Turn an ease-in into the matching ease-out.
#[inline]
fn mirror(t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    1.0 - ease_in(1.0 - t)
}

/// First half runs `ease_in`, second half its mirror.
#[inline]
fn in_out(t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    if t < 0.5 {
        0.5 * ease_in(2.0 * t)
    } else {
        1.0 - 0.5 * ease_in(2.0 - 2.0 * t)
    }
}

#[inline]
fn back_in(t: f32) -> f32 {
    BACK_C3 * t * t * t - BACK_C1 * t * t
}

fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    let (shift, floor) = if t < 1.0 / D {
        (0.0, 0.0)
    } else if t < 2.0 / D {
        (1.5 / D, 0.75)
    } else if t < 2.5 / D {
        (2.25 / D, 0.9375)
    } else {
        (2.625 / D, 0.984375)
    };
    let x = t - shift;
    N * x * x + floor
}

fn elastic_out(t: f32) -> f32 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }
    let period = (2.0 * PI) / 3.0;
    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * period).sin() + 1.0
}

/// One key of a `KeyframeCurve`. Tangents are slopes (value per unit time).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    pub in_tangent: f32,
    pub out_tangent: f32,
}

impl Keyframe {
    /// Key with flat tangents.
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value, in_tangent: 0.0, out_tangent: 0.0 }
    }

    pub fn with_tangents(mut self, in_tangent: f32, out_tangent: f32) -> Self {
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }
}

/// Piecewise cubic Hermite curve. Outside the first/last key the curve holds
/// the end values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframeCurve {
    keys: Vec<Keyframe>,
}

impl KeyframeCurve {
    /// Build from keys in any order; they are sorted by time.
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Two keys with flat tangents: an ease-in-out from `(t0, v0)` to `(t1, v1)`.
    pub fn ease_in_out(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        Self::new(vec![Keyframe::new(t0, v0), Keyframe::new(t1, v1)])
    }

    /// Two keys whose tangents match the straight line between them.
    pub fn linear(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        let dt = t1 - t0;
        let slope = if dt.abs() > 1e-6 { (v1 - v0) / dt } else { 0.0 };
        Self::new(vec![
            Keyframe::new(t0, v0).with_tangents(slope, slope),
            Keyframe::new(t1, v1).with_tangents(slope, slope),
        ])
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Insert a key, keeping time order.
    pub fn add_key(&mut self, key: Keyframe) {
        let idx = self.keys.partition_point(|k| k.time <= key.time);
        self.keys.insert(idx, key);
    }

    /// Sample the curve. An empty curve evaluates to 0; NaN holds the first key.
    pub fn evaluate(&self, time: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if time.is_nan() || time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // First key strictly after `time`; guaranteed to be in 1..len here.
        let next = self.keys.partition_point(|k| k.time <= time);
        let k0 = &self.keys[next - 1];
        let k1 = &self.keys[next];
        let dt = k1.time - k0.time;
        if dt <= 1e-6 {
            return k1.value;
        }
        let t = (time - k0.time) / dt;
        hermite(k0.value, k0.out_tangent * dt, k1.value, k1.in_tangent * dt, t)
    }
}

#[inline]
fn hermite(v0: f32, m0: f32, v1: f32, m1: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let s2 = -2.0 * t3 + 3.0 * t2;
    let s3 = t3 - t2;
    let s0 = 1.0 - s2;
    let s1 = s3 - t2 + t;
    s0 * v0 + s1 * m0 + s2 * v1 + s3 * m1
}

/// A blend curve used by a track.
#[derive(Clone)]
pub enum Curve {
    Ease(Easing),
    Keyframes(KeyframeCurve),
    /// Arbitrary function of progress.
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl Curve {
    pub fn custom(f: impl Fn(f32) -> f32 + Send + Sync + 'static) -> Self {
        Curve::Custom(Arc::new(f))
    }

    /// Blend factor for the given progress.
    #[inline]
    pub fn evaluate(&self, progress: f32) -> f32 {
        match self {
            Curve::Ease(easing) => easing.apply(progress),
            Curve::Keyframes(keys) => keys.evaluate(progress),
            Curve::Custom(f) => f(progress),
        }
    }
}

impl Default for Curve {
    fn default() -> Self {
        Curve::Ease(Easing::default())
    }
}

impl From<Easing> for Curve {
    fn from(easing: Easing) -> Self {
        Curve::Ease(easing)
    }
}

impl From<KeyframeCurve> for Curve {
    fn from(keys: KeyframeCurve) -> Self {
        Curve::Keyframes(keys)
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::Ease(easing) => f.debug_tuple("Ease").field(easing).finish(),
            Curve::Keyframes(keys) => f.debug_tuple("Keyframes").field(&keys.keys.len()).finish(),
            Curve::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
