pub mod camera;
pub mod resolution;

pub use camera::{vertical_to_horizontal_fov, FieldOfView, FilterMode, LowResTarget};
pub use resolution::ResolutionWatcher;
