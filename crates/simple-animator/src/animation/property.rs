// animation/property.rs
//
// Properties a track can drive. Each one knows how to read and write a single
// capability of an entity in the scene; tracks stay generic over the value type.

use std::fmt::Debug;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::api::types::EntityId;
use crate::animation::lerp::Lerp;
use crate::components::graphic::{Color, Graphic};
use crate::core::scene::Scene;

/// Why a track could not reach its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrackError {
    #[error("entity {0:?} is not in the scene")]
    MissingEntity(EntityId),
    #[error("entity {0:?} has no graphic; a graphic is required to animate {1}")]
    MissingGraphic(EntityId, &'static str),
}

/// Coordinate space for transform properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Space {
    /// Relative to the parent entity.
    Local,
    /// Absolute, compensating for the parent chain.
    #[default]
    World,
}

/// A readable and writable value on an entity.
pub trait Property: Debug {
    type Value: Lerp + Debug;

    /// Human-readable name used in log messages.
    fn name(&self) -> &'static str;

    fn read(&self, scene: &Scene, id: EntityId) -> Result<Self::Value, TrackError>;

    fn write(&self, scene: &mut Scene, id: EntityId, value: Self::Value) -> Result<(), TrackError>;
}

/// Entity position.
#[derive(Debug, Clone, Copy, Default)]
pub struct Position(pub Space);

impl Property for Position {
    type Value = Vec3;

    fn name(&self) -> &'static str {
        "position"
    }

    fn read(&self, scene: &Scene, id: EntityId) -> Result<Vec3, TrackError> {
        let value = match self.0 {
            Space::Local => scene.get(id).map(|e| e.transform.translation),
            Space::World => scene.world_position(id),
        };
        value.ok_or(TrackError::MissingEntity(id))
    }

    fn write(&self, scene: &mut Scene, id: EntityId, value: Vec3) -> Result<(), TrackError> {
        let written = match self.0 {
            Space::Local => match scene.get_mut(id) {
                Some(entity) => {
                    entity.transform.translation = value;
                    true
                }
                None => false,
            },
            Space::World => scene.set_world_position(id, value),
        };
        written.then_some(()).ok_or(TrackError::MissingEntity(id))
    }
}

/// Entity rotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rotation(pub Space);

impl Property for Rotation {
    type Value = Quat;

    fn name(&self) -> &'static str {
        "rotation"
    }

    fn read(&self, scene: &Scene, id: EntityId) -> Result<Quat, TrackError> {
        let value = match self.0 {
            Space::Local => scene.get(id).map(|e| e.transform.rotation),
            Space::World => scene.world_rotation(id),
        };
        value.ok_or(TrackError::MissingEntity(id))
    }

    fn write(&self, scene: &mut Scene, id: EntityId, value: Quat) -> Result<(), TrackError> {
        let written = match self.0 {
            Space::Local => match scene.get_mut(id) {
                Some(entity) => {
                    entity.transform.rotation = value;
                    true
                }
                None => false,
            },
            Space::World => scene.set_world_rotation(id, value),
        };
        written.then_some(()).ok_or(TrackError::MissingEntity(id))
    }
}

/// Entity scale. Always local: world scale is not separable under rotated parents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scale;

impl Property for Scale {
    type Value = Vec3;

    fn name(&self) -> &'static str {
        "scale"
    }

    fn read(&self, scene: &Scene, id: EntityId) -> Result<Vec3, TrackError> {
        scene
            .get(id)
            .map(|e| e.transform.scale)
            .ok_or(TrackError::MissingEntity(id))
    }

    fn write(&self, scene: &mut Scene, id: EntityId, value: Vec3) -> Result<(), TrackError> {
        let entity = scene.get_mut(id).ok_or(TrackError::MissingEntity(id))?;
        entity.transform.scale = value;
        Ok(())
    }
}

fn graphic<'a>(scene: &'a Scene, id: EntityId, what: &'static str) -> Result<&'a Graphic, TrackError> {
    let entity = scene.get(id).ok_or(TrackError::MissingEntity(id))?;
    entity.graphic.as_ref().ok_or(TrackError::MissingGraphic(id, what))
}

fn graphic_mut<'a>(scene: &'a mut Scene, id: EntityId, what: &'static str) -> Result<&'a mut Graphic, TrackError> {
    let entity = scene.get_mut(id).ok_or(TrackError::MissingEntity(id))?;
    entity.graphic.as_mut().ok_or(TrackError::MissingGraphic(id, what))
}

/// Alpha of the entity's graphic; RGB is left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphicAlpha;

impl Property for GraphicAlpha {
    type Value = f32;

    fn name(&self) -> &'static str {
        "alpha"
    }

    fn read(&self, scene: &Scene, id: EntityId) -> Result<f32, TrackError> {
        graphic(scene, id, self.name()).map(Graphic::alpha)
    }

    fn write(&self, scene: &mut Scene, id: EntityId, value: f32) -> Result<(), TrackError> {
        graphic_mut(scene, id, self.name())?.set_alpha(value);
        Ok(())
    }
}

/// Full RGBA color of the entity's graphic.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphicColor;

impl Property for GraphicColor {
    type Value = Color;

    fn name(&self) -> &'static str {
        "color"
    }

    fn read(&self, scene: &Scene, id: EntityId) -> Result<Color, TrackError> {
        graphic(scene, id, self.name()).map(|g| g.color)
    }

    fn write(&self, scene: &mut Scene, id: EntityId, value: Color) -> Result<(), TrackError> {
        graphic_mut(scene, id, self.name())?.color = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;

    fn parented_scene() -> Scene {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_pos(Vec3::new(10.0, 0.0, 0.0)));
        scene.spawn(
            Entity::new(EntityId(2))
                .with_pos(Vec3::new(1.0, 0.0, 0.0))
                .with_parent(EntityId(1)),
        );
        scene
    }

    #[test]
    fn position_reads_in_requested_space() {
        let scene = parented_scene();
        let local = Position(Space::Local).read(&scene, EntityId(2)).unwrap();
        let world = Position(Space::World).read(&scene, EntityId(2)).unwrap();
        assert_eq!(local, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(world, Vec3::new(11.0, 0.0, 0.0));
    }

    #[test]
    fn world_position_write_converts_to_local() {
        let mut scene = parented_scene();
        Position(Space::World)
            .write(&mut scene, EntityId(2), Vec3::new(12.0, 0.0, 0.0))
            .unwrap();
        let local = scene.get(EntityId(2)).unwrap().transform.translation;
        assert_eq!(local, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn alpha_without_graphic_is_missing_capability() {
        let scene = parented_scene();
        let err = GraphicAlpha.read(&scene, EntityId(1)).unwrap_err();
        assert_eq!(err, TrackError::MissingGraphic(EntityId(1), "alpha"));
    }

    #[test]
    fn alpha_write_keeps_rgb() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_graphic(Graphic::new(Color::rgb(0.2, 0.4, 0.6))));
        GraphicAlpha.write(&mut scene, EntityId(1), 0.25).unwrap();
        let color = scene.get(EntityId(1)).unwrap().graphic.as_ref().unwrap().color;
        assert_eq!(color, Color::rgba(0.2, 0.4, 0.6, 0.25));
    }

    #[test]
    fn missing_entity_reported() {
        let mut scene = Scene::new();
        assert_eq!(
            Scale.write(&mut scene, EntityId(7), Vec3::ONE),
            Err(TrackError::MissingEntity(EntityId(7)))
        );
    }
}
