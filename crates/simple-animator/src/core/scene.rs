use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::transform::Transform;

/// Parent chains longer than this are treated as cycles.
const MAX_HIERARCHY_DEPTH: usize = 64;

/// Simple entity storage using a flat Vec.
/// Designed for small-to-medium entity counts (hundreds, not millions).
///
/// Entities store transforms relative to their parent; world-space values are
/// resolved on demand by walking the parent chain.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(256),
        }
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Children keep their local transform and become roots.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        let removed = self.entities.swap_remove(idx);
        for e in self.entities.iter_mut().filter(|e| e.parent == Some(id)) {
            e.parent = None;
        }
        Some(removed)
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Set the parent of an entity. Pass `None` to make it a root.
    /// The local transform is kept as-is, so the world transform may jump.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) -> bool {
        match self.get_mut(child) {
            Some(entity) => {
                entity.parent = parent;
                true
            }
            None => false,
        }
    }

    /// World transform of an entity, composed from the root down.
    /// A parent link to a missing entity is treated as the world root.
    pub fn world_transform(&self, id: EntityId) -> Option<Transform> {
        let mut entity = self.get(id)?;
        let mut world = entity.transform;
        let mut depth = 0;
        while let Some(parent) = entity.parent.and_then(|p| self.get(p)) {
            depth += 1;
            if depth > MAX_HIERARCHY_DEPTH {
                log::warn!("Hierarchy above {:?} exceeds {} levels, treating as root", id, MAX_HIERARCHY_DEPTH);
                break;
            }
            world = parent.transform.mul_transform(&world);
            entity = parent;
        }
        Some(world)
    }

    /// World transform of an entity's parent; `Some(None)` for roots.
    fn parent_world(&self, id: EntityId) -> Option<Option<Transform>> {
        let entity = self.get(id)?;
        Some(entity.parent.and_then(|p| self.world_transform(p)))
    }

    pub fn world_position(&self, id: EntityId) -> Option<Vec3> {
        self.world_transform(id).map(|t| t.translation)
    }

    pub fn world_rotation(&self, id: EntityId) -> Option<Quat> {
        self.world_transform(id).map(|t| t.rotation)
    }

    /// Move an entity so that its world position equals `pos`.
    pub fn set_world_position(&mut self, id: EntityId, pos: Vec3) -> bool {
        let Some(parent) = self.parent_world(id) else { return false };
        let local = match parent {
            Some(parent) => parent.inverse_transform_point(pos),
            None => pos,
        };
        match self.get_mut(id) {
            Some(entity) => {
                entity.transform.translation = local;
                true
            }
            None => false,
        }
    }

    /// Rotate an entity so that its world rotation equals `rotation`.
    pub fn set_world_rotation(&mut self, id: EntityId, rotation: Quat) -> bool {
        let Some(parent) = self.parent_world(id) else { return false };
        let local = match parent {
            Some(parent) => (parent.rotation.inverse() * rotation).normalize(),
            None => rotation,
        };
        match self.get_mut(id) {
            Some(entity) => {
                entity.transform.rotation = local;
                true
            }
            None => false,
        }
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
