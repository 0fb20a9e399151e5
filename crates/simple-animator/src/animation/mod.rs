// animation/mod.rs
//
// Tween sequencing: tracks interpolate one property each; an Animator runs a set of
// tracks through delay, per-tick updates and completion.

pub mod animator;
pub mod config;
pub mod curve;
pub mod lerp;
pub mod property;
pub mod registry;
pub mod track;

pub use animator::{Animator, AnimatorPhase, Hook};
pub use config::{AnimatorConfig, ConfigError};
pub use curve::{Curve, Easing, Keyframe, KeyframeCurve};
pub use lerp::Lerp;
pub use property::{
    GraphicAlpha, GraphicColor, Position, Property, Rotation, Scale, Space, TrackError,
};
pub use registry::AnimatorSet;
pub use track::{
    AlphaTrack, AnimationTrack, ColorTrack, PositionTrack, PropertyTrack, RotationTrack,
    ScaleTrack, StartValue,
};
