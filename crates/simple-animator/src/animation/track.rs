// animation/track.rs
//
// Animation tracks: one animated property per track, driven by an Animator.
//
// Usage:
//   let track = PositionTrack::position(Vec3::new(10.0, 0.0, 0.0))
//       .from(Vec3::ZERO)
//       .with_curve(Easing::BackOut);
//   animator.add_track(track);

use glam::{EulerRot, Quat, Vec3};
use crate::api::types::EntityId;
use crate::animation::curve::Curve;
use crate::animation::lerp::Lerp;
use crate::animation::property::{
    GraphicAlpha, GraphicColor, Position, Property, Rotation, Scale, Space, TrackError,
};
use crate::components::graphic::Color;
use crate::core::scene::Scene;

/// One unit of a playback.
///
/// The Animator calls `on_start` once per playback before any `on_update`, and
/// `on_complete` once after the last `on_update`. A track whose `on_start` fails is
/// never updated by the main loop, but still receives the final `on_update(1.0)` and
/// `on_complete`, which must then be no-ops.
pub trait AnimationTrack {
    /// Resolve the target and capture the start value.
    fn on_start(&mut self, target: EntityId, scene: &Scene) -> Result<(), TrackError>;

    /// Apply the value for `progress`. Returns `true` when the track has finished early.
    fn on_update(&mut self, progress: f32, scene: &mut Scene) -> bool;

    /// Release anything captured in `on_start`.
    fn on_complete(&mut self);
}

/// Where a track's start value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StartValue<V> {
    /// Whatever the property holds when the track starts.
    #[default]
    Current,
    /// A fixed value.
    Fixed(V),
}

/// State captured between `on_start` and `on_complete`.
#[derive(Debug, Clone, Copy)]
struct Binding<V> {
    target: EntityId,
    start: V,
}

/// Generic track: interpolates one property from a start value to `end`.
#[derive(Debug, Clone)]
pub struct PropertyTrack<P: Property> {
    property: P,
    start: StartValue<P::Value>,
    end: P::Value,
    curve: Curve,
    binding: Option<Binding<P::Value>>,
}

pub type PositionTrack = PropertyTrack<Position>;
pub type RotationTrack = PropertyTrack<Rotation>;
pub type ScaleTrack = PropertyTrack<Scale>;
pub type AlphaTrack = PropertyTrack<GraphicAlpha>;
pub type ColorTrack = PropertyTrack<GraphicColor>;

impl<P: Property> PropertyTrack<P> {
    /// Track that animates `property` from its current value to `end`.
    pub fn new(property: P, end: P::Value) -> Self {
        Self {
            property,
            start: StartValue::Current,
            end,
            curve: Curve::default(),
            binding: None,
        }
    }

    // -- Builder methods --

    /// Start from a fixed value instead of the property's current one.
    pub fn from(mut self, start: P::Value) -> Self {
        self.start = StartValue::Fixed(start);
        self
    }

    pub fn with_start(mut self, start: StartValue<P::Value>) -> Self {
        self.start = start;
        self
    }

    pub fn with_curve(mut self, curve: impl Into<Curve>) -> Self {
        self.curve = curve.into();
        self
    }

    pub fn property(&self) -> &P {
        &self.property
    }

    pub fn end(&self) -> P::Value {
        self.end
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Whether the track currently holds a resolved target.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }
}

impl PositionTrack {
    pub fn position(end: Vec3) -> Self {
        Self::new(Position::default(), end)
    }

    pub fn in_space(mut self, space: Space) -> Self {
        self.property = Position(space);
        self
    }
}

impl RotationTrack {
    pub fn rotation(end: Quat) -> Self {
        Self::new(Rotation::default(), end)
    }

    /// Rotation to Euler angles in degrees (applied Y, then X, then Z).
    pub fn rotation_euler(end_degrees: Vec3) -> Self {
        Self::rotation(euler_degrees(end_degrees))
    }

    /// Fixed start expressed as Euler angles in degrees.
    pub fn from_euler(self, start_degrees: Vec3) -> Self {
        self.from(euler_degrees(start_degrees))
    }

    pub fn in_space(mut self, space: Space) -> Self {
        self.property = Rotation(space);
        self
    }
}

fn euler_degrees(deg: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        deg.y.to_radians(),
        deg.x.to_radians(),
        deg.z.to_radians(),
    )
}

impl ScaleTrack {
    pub fn scale(end: Vec3) -> Self {
        Self::new(Scale, end)
    }
}

impl AlphaTrack {
    pub fn alpha(end: f32) -> Self {
        Self::new(GraphicAlpha, end)
    }

    /// Fade from transparent to opaque.
    pub fn fade_in() -> Self {
        Self::alpha(1.0).from(0.0)
    }

    /// Fade from opaque to transparent.
    pub fn fade_out() -> Self {
        Self::alpha(0.0).from(1.0)
    }
}

impl ColorTrack {
    pub fn color(end: Color) -> Self {
        Self::new(GraphicColor, end)
    }
}

impl<P: Property> AnimationTrack for PropertyTrack<P> {
    fn on_start(&mut self, target: EntityId, scene: &Scene) -> Result<(), TrackError> {
        self.binding = None;
        // Reading first also proves the capability exists when the start is fixed.
        let current = self.property.read(scene, target)?;
        let start = match self.start {
            StartValue::Current => current,
            StartValue::Fixed(v) => v,
        };
        self.binding = Some(Binding { target, start });
        Ok(())
    }

    fn on_update(&mut self, progress: f32, scene: &mut Scene) -> bool {
        let Some(binding) = self.binding else { return false };
        let blend = self.curve.evaluate(progress);
        let value = P::Value::lerp_unclamped(binding.start, self.end, blend);
        if let Err(err) = self.property.write(scene, binding.target, value) {
            log::warn!("Dropping {} track: {}", self.property.name(), err);
            self.binding = None;
        }
        false
    }

    fn on_complete(&mut self) {
        self.binding = None;
    }
}
