use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-animator settings. Fixed for the lifetime of a playback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Seconds to wait after `play()` before the tracks start.
    pub delay: f32,
    /// Maximum time the update phase runs, in seconds.
    pub duration: f32,
    /// Start playing when the animator is activated.
    pub play_on_activate: bool,
    /// On cancel, jump every track to its end value and complete normally.
    pub finish_on_cancel: bool,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            delay: 0.0,
            duration: 1.0,
            play_on_activate: false,
            finish_on_cancel: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid animator config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duration must be positive, got {0}")]
    InvalidDuration(f32),
    #[error("delay must not be negative, got {0}")]
    NegativeDelay(f32),
}

impl AnimatorConfig {
    pub fn new(duration: f32) -> Self {
        Self { duration, ..Self::default() }
    }

    // -- Builder methods --

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn play_on_activate(mut self, enabled: bool) -> Self {
        self.play_on_activate = enabled;
        self
    }

    pub fn finish_on_cancel(mut self, enabled: bool) -> Self {
        self.finish_on_cancel = enabled;
        self
    }

    /// Check the ranges the animator assumes. The animator itself tolerates
    /// out-of-range values (a non-positive duration completes on the first step).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration.is_nan() || self.duration <= 0.0 {
            return Err(ConfigError::InvalidDuration(self.duration));
        }
        if self.delay < 0.0 {
            return Err(ConfigError::NegativeDelay(self.delay));
        }
        Ok(())
    }

    /// Parse and validate a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
