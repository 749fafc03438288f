//! Multi-stage indicator patterns
//!
//! A pattern is an immutable list of timed stages plus a repeat policy.
//! All built-in patterns live in [`library`] as `static` items.

pub mod library;

use embassy_time::Duration;

use crate::color::{OFF, Rgb};
use crate::math8::LEVEL_MIN;

/// One timed segment of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    /// How long the stage is held
    pub duration: Duration,
    /// Fade-in time towards the stage output (zero = immediate)
    pub fade: Duration,
    /// Target level (0-255)
    pub level: u8,
    /// Target color for color-capable indicators
    pub color: Option<Rgb>,
}

impl Stage {
    /// Stage lit at `level` with `color`, durations in milliseconds
    pub const fn new(level: u8, color: Rgb, duration_ms: u64, fade_ms: u64) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms),
            fade: Duration::from_millis(fade_ms),
            level,
            color: Some(color),
        }
    }

    /// Dark stage, durations in milliseconds
    pub const fn off(duration_ms: u64, fade_ms: u64) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms),
            fade: Duration::from_millis(fade_ms),
            level: LEVEL_MIN,
            color: Some(OFF),
        }
    }

    /// Stage without a color; color-capable indicators show gray
    pub const fn level(level: u8, duration_ms: u64, fade_ms: u64) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms),
            fade: Duration::from_millis(fade_ms),
            level,
            color: None,
        }
    }
}

/// How many times a pattern runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Run until the counter of completed runs reaches the limit
    ///
    /// `Times(0)` and `Times(1)` both play the pattern once.
    Times(u8),
    /// Loop until replaced
    Forever,
}

impl Repeat {
    /// Play once, never repeat
    pub const NONE: Self = Self::Times(0);

    /// Check if another run may start after `completed` runs
    pub const fn allows(self, completed: u8) -> bool {
        match self {
            Self::Times(limit) => completed < limit,
            Self::Forever => true,
        }
    }

    pub const fn is_forever(self) -> bool {
        matches!(self, Self::Forever)
    }
}

/// Ordered stages plus a repeat policy
#[derive(Debug, PartialEq, Eq)]
pub struct Pattern {
    pub stages: &'static [Stage],
    pub repeat: Repeat,
    /// Scaling value for biasing the color by the pointing target
    ///
    /// Reserved: carried by the pattern data but never applied to the output.
    pub gradual: Option<u8>,
}

impl Pattern {
    pub const fn new(stages: &'static [Stage], repeat: Repeat) -> Self {
        Self {
            stages,
            repeat,
            gradual: None,
        }
    }

    #[must_use]
    pub const fn with_gradual(mut self, value: u8) -> Self {
        self.gradual = Some(value);
        self
    }

    /// Number of stages
    #[allow(clippy::cast_possible_truncation)]
    pub const fn count(&self) -> u8 {
        self.stages.len() as u8
    }

    pub fn stage(&self, index: u8) -> Option<&Stage> {
        self.stages.get(usize::from(index))
    }

    /// Wall time of a single run
    pub fn run_duration(&self) -> Duration {
        self.stages
            .iter()
            .fold(Duration::from_millis(0), |acc, stage| acc + stage.duration)
    }
}
