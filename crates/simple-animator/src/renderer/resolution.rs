// renderer/resolution.rs
//
// Screen resolution change notifier. The host polls it once per frame with the
// current surface size; subscribers hear about every change.
//
// Usage:
//   let mut watcher = ResolutionWatcher::new();
//   watcher.subscribe(move |res| fov.borrow_mut().fit(res));
//   watcher.poll(UVec2::new(width, height));  // every frame

use std::fmt;
use glam::UVec2;
use crate::api::types::ListenerId;

type Listener = Box<dyn FnMut(UVec2)>;

#[derive(Default)]
pub struct ResolutionWatcher {
    current: Option<UVec2>,
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u32,
}

impl ResolutionWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known resolution, `None` before the first poll.
    pub fn resolution(&self) -> Option<UVec2> {
        self.current
    }

    /// Register a listener. Listeners run in subscription order.
    /// Ids wrap around on overflow, skipping ones still subscribed.
    pub fn subscribe(&mut self, listener: impl FnMut(UVec2) + 'static) -> ListenerId {
        let id = loop {
            let id = ListenerId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            if self.listeners.iter().all(|(lid, _)| *lid != id) {
                break id;
            }
        };
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Feed the current resolution. The first poll only records it; later polls
    /// notify every listener when it differs. Returns whether listeners were notified.
    pub fn poll(&mut self, resolution: UVec2) -> bool {
        match self.current.replace(resolution) {
            None => false,
            Some(previous) if previous == resolution => false,
            Some(previous) => {
                log::debug!("Resolution changed {} -> {}", previous, resolution);
                for (_, listener) in self.listeners.iter_mut() {
                    listener(resolution);
                }
                true
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for ResolutionWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionWatcher")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
