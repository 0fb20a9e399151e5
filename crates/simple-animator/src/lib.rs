pub mod api;
pub mod core;
pub mod components;
pub mod animation;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::types::{EntityId, AnimatorId, ListenerId};
pub use components::entity::Entity;
pub use components::graphic::{Color, Graphic};
pub use components::transform::Transform;
pub use crate::core::scene::Scene;
pub use animation::{
    Animator, AnimatorConfig, AnimatorPhase, AnimatorSet, ConfigError,
    AnimationTrack, PropertyTrack, StartValue, TrackError,
    PositionTrack, RotationTrack, ScaleTrack, AlphaTrack, ColorTrack,
    Position, Rotation, Scale, GraphicAlpha, GraphicColor, Property, Space,
    Curve, Easing, Keyframe, KeyframeCurve, Lerp,
};
pub use renderer::{FieldOfView, FilterMode, LowResTarget, ResolutionWatcher};
