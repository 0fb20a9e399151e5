pub mod entity;
pub mod graphic;
pub mod transform;
