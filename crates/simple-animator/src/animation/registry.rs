// animation/registry.rs
//
// AnimatorSet owns many animators and drives them from the host's frame loop.
//
// Usage:
//   let mut animators = AnimatorSet::new();
//   let id = animators.add(Animator::new(entity_id).with_track(...));
//   animators.play(id, &mut scene);
//   animators.tick(dt, &mut scene);  // Advances every active playback

use std::collections::BTreeMap;
use crate::api::types::AnimatorId;
use crate::animation::animator::Animator;
use crate::core::scene::Scene;

/// Ticks in id order, so animators added first update first.
#[derive(Debug, Default)]
pub struct AnimatorSet {
    animators: BTreeMap<AnimatorId, Animator>,
    next_id: u32,
}

impl AnimatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an animator. Returns a handle for later control.
    /// Handles wrap around on overflow, skipping ones still in use.
    pub fn add(&mut self, animator: Animator) -> AnimatorId {
        let id = loop {
            let id = AnimatorId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            if !self.animators.contains_key(&id) {
                break id;
            }
        };
        self.animators.insert(id, animator);
        id
    }

    /// Remove an animator. An active playback is dropped without completion.
    pub fn remove(&mut self, id: AnimatorId) -> Option<Animator> {
        self.animators.remove(&id)
    }

    pub fn get(&self, id: AnimatorId) -> Option<&Animator> {
        self.animators.get(&id)
    }

    pub fn get_mut(&mut self, id: AnimatorId) -> Option<&mut Animator> {
        self.animators.get_mut(&id)
    }

    /// Play an animator. Returns `false` for an unknown handle.
    pub fn play(&mut self, id: AnimatorId, scene: &mut Scene) -> bool {
        match self.animators.get_mut(&id) {
            Some(animator) => {
                animator.play(scene);
                true
            }
            None => false,
        }
    }

    /// Cancel an animator. Returns `true` if a playback was active.
    pub fn cancel(&mut self, id: AnimatorId, scene: &mut Scene) -> bool {
        self.animators
            .get_mut(&id)
            .is_some_and(|animator| animator.cancel(scene))
    }

    /// Cancel every active playback.
    pub fn cancel_all(&mut self, scene: &mut Scene) {
        for animator in self.animators.values_mut() {
            animator.cancel(scene);
        }
    }

    /// Activate every animator, starting those configured to play on activation.
    /// Returns how many started.
    pub fn activate_all(&mut self, scene: &mut Scene) -> usize {
        self.animators
            .values_mut()
            .map(|animator| animator.activate(scene))
            .filter(|&started| started)
            .count()
    }

    /// Advance all animators. Returns the number of playbacks that completed this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let mut completed = 0;
        for animator in self.animators.values_mut() {
            if animator.tick(dt, scene) {
                completed += 1;
            }
        }
        completed
    }

    /// Number of animators with an active playback.
    pub fn playing_count(&self) -> usize {
        self.animators.values().filter(|a| a.is_playing()).count()
    }

    /// Number of registered animators.
    pub fn len(&self) -> usize {
        self.animators.len()
    }

    /// Whether no animators are registered.
    pub fn is_empty(&self) -> bool {
        self.animators.is_empty()
    }

    /// Drop every animator.
    pub fn clear(&mut self) {
        self.animators.clear();
    }
}
