// animation/animator.rs
//
// Animator drives a fixed set of tracks on one target through a playback:
// invoke -> (delay) -> start -> per-tick update -> complete.
//
// Usage:
//   let mut animator = Animator::new(entity_id)
//       .with_config(AnimatorConfig::new(0.5).with_delay(0.1))
//       .with_track(PositionTrack::position(Vec3::X * 10.0))
//       .on_complete(|| log::info!("done"));
//   animator.play(&mut scene);
//   animator.tick(dt, &mut scene);  // once per frame

use std::fmt;
use crate::api::types::EntityId;
use crate::animation::config::AnimatorConfig;
use crate::animation::track::AnimationTrack;
use crate::core::scene::Scene;

/// Zero-argument event listener.
pub type Hook = Box<dyn FnMut()>;

type Callback = Box<dyn FnOnce()>;

/// Observable state of an animator between ticks.
///
/// `play()` runs the invoke (and, without a delay, the start) transitions
/// synchronously, so those never show up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimatorPhase {
    /// Never played.
    #[default]
    Idle,
    /// Waiting for the configured delay.
    Delaying,
    /// Tracks started; updating once per tick.
    Updating,
    /// Last playback ran to the end.
    Completed,
    /// Last playback was cancelled.
    Cancelled,
}

#[derive(Debug)]
enum Stage {
    Delaying { remaining: f32 },
    Updating {
        elapsed: f32,
        /// Per-track early-finish flags, in snapshot order.
        finished: Vec<bool>,
        /// Whether any track was still running after the last update pass.
        running: bool,
    },
}

/// One run of the animator from `play()` to completion or cancellation.
struct Playback {
    target: EntityId,
    config: AnimatorConfig,
    /// Tracks `0..track_count` take part; later additions wait for the next play.
    track_count: usize,
    stage: Stage,
    on_finished: Option<Callback>,
}

impl Playback {
    fn delay_done(&self) -> bool {
        matches!(self.stage, Stage::Updating { .. })
    }
}

#[derive(Default)]
struct Hooks {
    on_invoke: Option<Hook>,
    on_start: Option<Hook>,
    on_complete: Option<Hook>,
}

#[inline]
fn fire(hook: &mut Option<Hook>) {
    if let Some(f) = hook.as_mut() {
        f();
    }
}

/// Multi-track tween sequencer for a single target entity.
///
/// At most one playback is active. Calling `play()` while one is active drops it
/// without any completion side effects and starts over.
pub struct Animator {
    target: EntityId,
    config: AnimatorConfig,
    tracks: Vec<Box<dyn AnimationTrack>>,
    hooks: Hooks,
    playback: Option<Playback>,
    phase: AnimatorPhase,
}

impl Animator {
    pub fn new(target: EntityId) -> Self {
        Self {
            target,
            config: AnimatorConfig::default(),
            tracks: Vec::new(),
            hooks: Hooks::default(),
            playback: None,
            phase: AnimatorPhase::Idle,
        }
    }

    // -- Builder methods --

    pub fn with_config(mut self, config: AnimatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_track(mut self, track: impl AnimationTrack + 'static) -> Self {
        self.add_track(track);
        self
    }

    /// Fired synchronously by `play()`.
    pub fn on_invoke(mut self, hook: impl FnMut() + 'static) -> Self {
        self.hooks.on_invoke = Some(Box::new(hook));
        self
    }

    /// Fired once the delay has passed, before the tracks start.
    pub fn on_start(mut self, hook: impl FnMut() + 'static) -> Self {
        self.hooks.on_start = Some(Box::new(hook));
        self
    }

    /// Fired after every track has completed.
    pub fn on_complete(mut self, hook: impl FnMut() + 'static) -> Self {
        self.hooks.on_complete = Some(Box::new(hook));
        self
    }

    /// Register a track. Tracks added during a playback join the next one.
    pub fn add_track(&mut self, track: impl AnimationTrack + 'static) {
        self.tracks.push(Box::new(track));
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    /// Retarget the animator. An active playback keeps the target it was started with.
    pub fn set_target(&mut self, target: EntityId) {
        self.target = target;
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Replace the config. An active playback keeps the one it started with.
    pub fn set_config(&mut self, config: AnimatorConfig) {
        self.config = config;
    }

    pub fn phase(&self) -> AnimatorPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// Play if the config asks for it. Call when the owner becomes active.
    pub fn activate(&mut self, scene: &mut Scene) -> bool {
        if self.config.play_on_activate {
            self.play(scene);
        }
        self.config.play_on_activate
    }

    /// Start a playback, superseding any active one.
    pub fn play(&mut self, scene: &mut Scene) {
        self.begin(None, scene);
    }

    /// Start a playback and call `on_finished` once it completes
    /// (or is cancelled with `finish_on_cancel`).
    pub fn play_with(&mut self, scene: &mut Scene, on_finished: impl FnOnce() + 'static) {
        self.begin(Some(Box::new(on_finished)), scene);
    }

    fn begin(&mut self, on_finished: Option<Callback>, scene: &mut Scene) {
        if self.playback.take().is_some() {
            log::debug!("Animator {:?}: superseding active playback", self.target);
        }

        self.playback = Some(Playback {
            target: self.target,
            config: self.config,
            track_count: self.tracks.len(),
            stage: Stage::Delaying { remaining: self.config.delay },
            on_finished,
        });
        self.phase = AnimatorPhase::Delaying;
        fire(&mut self.hooks.on_invoke);

        // Run up to the first suspension point.
        self.tick(0.0, scene);
    }

    /// Advance the active playback by `dt` seconds.
    /// Returns `true` if the playback completed during this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> bool {
        let Some(mut playback) = self.playback.take() else { return false };

        if self.advance(&mut playback, dt, scene) {
            self.finish(playback, scene);
            self.phase = AnimatorPhase::Completed;
            log::debug!("Animator {:?}: playback complete", self.target);
            true
        } else {
            self.playback = Some(playback);
            false
        }
    }

    /// Stop the active playback. Does nothing (and returns `false`) when idle.
    ///
    /// With `finish_on_cancel` every track is started if it had not been yet, then
    /// snapped to its end value and completed, and the completion hook and callback
    /// fire. Without it, started tracks are completed where they stand and tracks
    /// still waiting on the delay get no calls at all.
    pub fn cancel(&mut self, scene: &mut Scene) -> bool {
        let Some(playback) = self.playback.take() else { return false };
        self.phase = AnimatorPhase::Cancelled;
        log::debug!("Animator {:?}: cancelled", self.target);

        if playback.config.finish_on_cancel {
            if !playback.delay_done() {
                self.start_tracks(playback.target, playback.track_count, scene);
            }
            self.finish(playback, scene);
        } else if playback.delay_done() {
            for track in self.tracks.iter_mut().take(playback.track_count) {
                track.on_complete();
            }
        }
        true
    }

    /// Returns `true` when the update loop has exited.
    fn advance(&mut self, playback: &mut Playback, dt: f32, scene: &mut Scene) -> bool {
        match &mut playback.stage {
            Stage::Delaying { remaining } => {
                *remaining -= dt;
                if *remaining > 0.0 {
                    return false;
                }
                let finished = self.start_tracks(playback.target, playback.track_count, scene);
                playback.stage = Stage::Updating { elapsed: 0.0, finished, running: true };
                self.phase = AnimatorPhase::Updating;
            }
            Stage::Updating { elapsed, .. } => *elapsed += dt,
        }
        self.update_tracks(playback, scene)
    }

    /// Fire `on_start` and start every track in the snapshot.
    /// Tracks that cannot reach their target come back flagged as finished.
    fn start_tracks(&mut self, target: EntityId, count: usize, scene: &mut Scene) -> Vec<bool> {
        fire(&mut self.hooks.on_start);

        let mut finished = Vec::with_capacity(count);
        for track in self.tracks.iter_mut().take(count) {
            match track.on_start(target, scene) {
                Ok(()) => finished.push(false),
                Err(err) => {
                    log::error!("Animator {:?}: track disabled for this playback: {}", target, err);
                    finished.push(true);
                }
            }
        }
        finished
    }

    /// One pass of the update loop. Returns `true` when the loop should exit instead.
    fn update_tracks(&mut self, playback: &mut Playback, scene: &mut Scene) -> bool {
        let duration = playback.config.duration;
        let Stage::Updating { elapsed, finished, running } = &mut playback.stage else {
            return false;
        };
        if !*running || *elapsed >= duration {
            return true;
        }

        let progress = *elapsed / duration;
        *running = false;
        for (track, done) in self.tracks.iter_mut().zip(finished.iter_mut()) {
            if *done {
                continue;
            }
            *done = track.on_update(progress, scene);
            if !*done {
                *running = true;
            }
        }
        false
    }

    /// Final pass: every track snaps to 1.0 and completes, then the hook and callback fire.
    fn finish(&mut self, playback: Playback, scene: &mut Scene) {
        for track in self.tracks.iter_mut().take(playback.track_count) {
            track.on_update(1.0, scene);
            track.on_complete();
        }
        fire(&mut self.hooks.on_complete);
        if let Some(callback) = playback.on_finished {
            callback();
        }
    }
}

impl fmt::Debug for Animator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("target", &self.target)
            .field("config", &self.config)
            .field("tracks", &self.tracks.len())
            .field("phase", &self.phase)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use glam::Vec3;
    use crate::animation::curve::Easing;
    use crate::animation::property::TrackError;
    use crate::animation::track::{ColorTrack, PositionTrack};
    use crate::components::entity::Entity;
    use crate::components::graphic::Color;

    const ID: EntityId = EntityId(1);

    #[derive(Debug, Clone, PartialEq)]
    enum Ev {
        Invoke,
        Start,
        Complete,
        Callback,
        TrackStart(&'static str),
        TrackUpdate(&'static str, f32),
        TrackComplete(&'static str),
    }

    type Log = Rc<RefCell<Vec<Ev>>>;

    struct RecordingTrack {
        name: &'static str,
        log: Log,
        finish_at: Option<f32>,
    }

    impl AnimationTrack for RecordingTrack {
        fn on_start(&mut self, _target: EntityId, _scene: &Scene) -> Result<(), TrackError> {
            self.log.borrow_mut().push(Ev::TrackStart(self.name));
            Ok(())
        }

        fn on_update(&mut self, progress: f32, _scene: &mut Scene) -> bool {
            self.log.borrow_mut().push(Ev::TrackUpdate(self.name, progress));
            self.finish_at.is_some_and(|at| progress >= at)
        }

        fn on_complete(&mut self) {
            self.log.borrow_mut().push(Ev::TrackComplete(self.name));
        }
    }

    fn track(name: &'static str, log: &Log) -> RecordingTrack {
        RecordingTrack { name, log: log.clone(), finish_at: None }
    }

    fn recorded(config: AnimatorConfig, log: &Log) -> Animator {
        let (a, b, c) = (log.clone(), log.clone(), log.clone());
        Animator::new(ID)
            .with_config(config)
            .on_invoke(move || a.borrow_mut().push(Ev::Invoke))
            .on_start(move || b.borrow_mut().push(Ev::Start))
            .on_complete(move || c.borrow_mut().push(Ev::Complete))
    }

    fn callback(log: &Log) -> impl FnOnce() + 'static {
        let log = log.clone();
        move || log.borrow_mut().push(Ev::Callback)
    }

    fn scene() -> Scene {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut scene = Scene::new();
        scene.spawn(Entity::new(ID));
        scene
    }

    fn updates(log: &Log, name: &'static str) -> Vec<f32> {
        log.borrow()
            .iter()
            .filter_map(|e| match e {
                Ev::TrackUpdate(n, p) if *n == name => Some(*p),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn linear_position_scenario() {
        let mut scene = scene();
        let mut animator = Animator::new(ID)
            .with_config(AnimatorConfig::new(1.0))
            .with_track(
                PositionTrack::position(Vec3::new(10.0, 0.0, 0.0))
                    .from(Vec3::ZERO)
                    .with_curve(Easing::Linear),
            );
        let x = |scene: &Scene| scene.get(ID).unwrap().transform.translation.x;

        animator.play(&mut scene);
        assert_eq!(x(&scene), 0.0);
        for expected in [2.5, 5.0, 7.5] {
            assert!(!animator.tick(0.25, &mut scene));
            assert_eq!(x(&scene), expected);
        }
        assert!(animator.tick(0.25, &mut scene));
        assert_eq!(scene.get(ID).unwrap().transform.translation, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(animator.phase(), AnimatorPhase::Completed);
        assert!(!animator.is_playing());
    }

    #[test]
    fn natural_completion_runs_full_lifecycle_in_order() {
        let log = Log::default();
        let mut scene = scene();
        let mut animator = recorded(AnimatorConfig::new(0.5), &log).with_track(track("a", &log));

        animator.play_with(&mut scene, callback(&log));
        while !animator.tick(0.25, &mut scene) {}

        assert_eq!(
            *log.borrow(),
            vec![
                Ev::Invoke,
                Ev::Start,
                Ev::TrackStart("a"),
                Ev::TrackUpdate("a", 0.0),
                Ev::TrackUpdate("a", 0.5),
                Ev::TrackUpdate("a", 1.0),
                Ev::TrackComplete("a"),
                Ev::Complete,
                Ev::Callback,
            ]
        );
    }

    #[test]
    fn delay_holds_start_until_elapsed() {
        let log = Log::default();
        let mut scene = scene();
        let mut animator = recorded(AnimatorConfig::new(1.0).with_delay(0.5), &log)
            .with_track(track("a", &log));

        animator.play(&mut scene);
        assert_eq!(*log.borrow(), vec![Ev::Invoke]);
        assert_eq!(animator.phase(), AnimatorPhase::Delaying);

        animator.tick(0.25, &mut scene);
        assert_eq!(log.borrow().len(), 1);

        animator.tick(0.25, &mut scene);
        assert_eq!(animator.phase(), AnimatorPhase::Updating);
        assert_eq!(
            log.borrow()[1..],
            [Ev::Start, Ev::TrackStart("a"), Ev::TrackUpdate("a", 0.0)]
        );
    }

    #[test]
    fn replay_supersedes_without_finishing() {
        let log = Log::default();
        let mut scene = scene();
        let mut animator = recorded(AnimatorConfig::new(1.0), &log).with_track(track("a", &log));

        animator.play_with(&mut scene, callback(&log));
        animator.tick(0.25, &mut scene);
        log.borrow_mut().clear();

        animator.play(&mut scene);
        assert_eq!(
            *log.borrow(),
            vec![Ev::Invoke, Ev::Start, Ev::TrackStart("a"), Ev::TrackUpdate("a", 0.0)]
        );

        while !animator.tick(0.25, &mut scene) {}
        let events = log.borrow();
        assert_eq!(events.iter().filter(|e| **e == Ev::Complete).count(), 1);
        assert!(!events.contains(&Ev::Callback));
    }

    #[test]
    fn finish_on_cancel_during_delay_starts_before_completing() {
        let log = Log::default();
        let mut scene = scene();
        let config = AnimatorConfig::new(1.0).with_delay(2.0).finish_on_cancel(true);
        let mut animator = recorded(config, &log)
            .with_track(track("a", &log))
            .with_track(track("b", &log));

        animator.play_with(&mut scene, callback(&log));
        animator.tick(0.5, &mut scene);
        assert!(animator.cancel(&mut scene));

        assert_eq!(
            *log.borrow(),
            vec![
                Ev::Invoke,
                Ev::Start,
                Ev::TrackStart("a"),
                Ev::TrackStart("b"),
                Ev::TrackUpdate("a", 1.0),
                Ev::TrackComplete("a"),
                Ev::TrackUpdate("b", 1.0),
                Ev::TrackComplete("b"),
                Ev::Complete,
                Ev::Callback,
            ]
        );
        assert_eq!(animator.phase(), AnimatorPhase::Cancelled);
    }

    #[test]
    fn finish_on_cancel_while_updating_snaps_to_end() {
        let mut scene = scene();
        let mut animator = Animator::new(ID)
            .with_config(AnimatorConfig::new(1.0).finish_on_cancel(true))
            .with_track(PositionTrack::position(Vec3::X * 4.0).from(Vec3::ZERO));

        animator.play(&mut scene);
        animator.tick(0.25, &mut scene);
        animator.cancel(&mut scene);
        assert_eq!(scene.get(ID).unwrap().transform.translation, Vec3::X * 4.0);
    }

    #[test]
    fn plain_cancel_after_start_completes_without_snapping() {
        let log = Log::default();
        let mut scene = scene();
        let mut animator = recorded(AnimatorConfig::new(1.0), &log)
            .with_track(track("a", &log))
            .with_track(
                PositionTrack::position(Vec3::new(10.0, 0.0, 0.0))
                    .from(Vec3::ZERO)
                    .with_curve(Easing::Linear),
            );

        animator.play_with(&mut scene, callback(&log));
        animator.tick(0.5, &mut scene);
        assert!(animator.cancel(&mut scene));

        let events = log.borrow();
        assert_eq!(events.last(), Some(&Ev::TrackComplete("a")));
        assert!(!events.contains(&Ev::Complete));
        assert!(!events.contains(&Ev::Callback));
        assert_eq!(updates(&log, "a"), vec![0.0, 0.5]);
        assert_eq!(scene.get(ID).unwrap().transform.translation.x, 5.0);
    }

    #[test]
    fn plain_cancel_during_delay_touches_no_track() {
        let log = Log::default();
        let mut scene = scene();
        let mut animator = recorded(AnimatorConfig::new(1.0).with_delay(1.0), &log)
            .with_track(track("a", &log));

        animator.play(&mut scene);
        animator.cancel(&mut scene);
        assert_eq!(*log.borrow(), vec![Ev::Invoke]);
    }

    #[test]
    fn cancel_when_idle_is_noop() {
        let mut scene = scene();
        let mut animator = Animator::new(ID);
        assert!(!animator.cancel(&mut scene));
        assert_eq!(animator.phase(), AnimatorPhase::Idle);
    }

    #[test]
    fn early_finished_track_is_skipped_until_final_pass() {
        let log = Log::default();
        let mut scene = scene();
        let mut animator = Animator::new(ID)
            .with_config(AnimatorConfig::new(1.0))
            .with_track(RecordingTrack { name: "early", log: log.clone(), finish_at: Some(0.5) })
            .with_track(track("full", &log));

        animator.play(&mut scene);
        while !animator.tick(0.25, &mut scene) {}

        assert_eq!(updates(&log, "early"), vec![0.0, 0.25, 0.5, 1.0]);
        assert_eq!(updates(&log, "full"), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn all_tracks_finished_ends_loop_on_next_tick() {
        let log = Log::default();
        let mut scene = scene();
        let mut animator = Animator::new(ID)
            .with_config(AnimatorConfig::new(10.0))
            .with_track(RecordingTrack { name: "a", log: log.clone(), finish_at: Some(0.0) });

        animator.play(&mut scene);
        assert!(animator.tick(0.1, &mut scene));
        assert_eq!(updates(&log, "a"), vec![0.0, 1.0]);
    }

    #[test]
    fn missing_capability_disables_only_that_track() {
        let log = Log::default();
        let mut scene = scene();
        let mut animator = recorded(AnimatorConfig::new(1.0), &log)
            .with_track(ColorTrack::color(Color::BLACK))
            .with_track(track("a", &log));

        animator.play(&mut scene);
        while !animator.tick(0.5, &mut scene) {}

        assert_eq!(updates(&log, "a"), vec![0.0, 0.5, 1.0]);
        assert_eq!(log.borrow().last(), Some(&Ev::Complete));
        assert!(scene.get(ID).unwrap().graphic.is_none());
    }

    #[test]
    fn non_positive_duration_completes_inside_play() {
        let log = Log::default();
        let mut scene = scene();
        let mut animator = recorded(AnimatorConfig::new(0.0), &log).with_track(track("a", &log));

        animator.play(&mut scene);
        assert!(!animator.is_playing());
        assert_eq!(updates(&log, "a"), vec![1.0]);
    }

    #[test]
    fn tracks_added_mid_playback_join_next_play() {
        let log = Log::default();
        let mut scene = scene();
        let mut animator = Animator::new(ID)
            .with_config(AnimatorConfig::new(1.0))
            .with_track(track("a", &log));

        animator.play(&mut scene);
        animator.add_track(track("late", &log));
        while !animator.tick(0.5, &mut scene) {}
        assert!(updates(&log, "late").is_empty());

        animator.play(&mut scene);
        assert_eq!(updates(&log, "late"), vec![0.0]);
    }

    #[test]
    fn activate_respects_config() {
        let mut scene = scene();
        let mut idle = Animator::new(ID);
        assert!(!idle.activate(&mut scene));
        assert!(!idle.is_playing());

        let mut eager = Animator::new(ID)
            .with_config(AnimatorConfig::new(1.0).with_delay(1.0).play_on_activate(true));
        assert!(eager.activate(&mut scene));
        assert!(eager.is_playing());
    }
}
