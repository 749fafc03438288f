//! Easing curves for actuator transitions
//!
//! Every curve maps normalized progress in `[0, 1]` to eased progress,
//! with `0 -> 0` and `1 -> 1`.

use core::f32::consts::PI;

/// Default number of ticks a servo transition lasts
pub const DEFAULT_EASE_STEPS: u16 = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    InQuad,
    OutQuad,
    #[default]
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InSine,
    OutSine,
    InOutSine,
}

impl Easing {
    /// Eased progress for `t`, clamped to `[0, 1]`
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - libm::powf(-2.0 * t + 2.0, 2.0) / 2.0
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - libm::powf(1.0 - t, 3.0),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - libm::powf(-2.0 * t + 2.0, 3.0) / 2.0
                }
            }
            Self::InSine => 1.0 - libm::cosf(t * PI / 2.0),
            Self::OutSine => libm::sinf(t * PI / 2.0),
            Self::InOutSine => -(libm::cosf(PI * t) - 1.0) / 2.0,
        }
    }
}

/// Shape and length of a servo transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EaseConfig {
    pub easing: Easing,
    /// Ticks from the old to the new pulse width; 0 jumps immediately
    pub steps: u16,
}

impl Default for EaseConfig {
    fn default() -> Self {
        Self {
            easing: Easing::default(),
            steps: DEFAULT_EASE_STEPS,
        }
    }
}

impl EaseConfig {
    /// Eased progress after `step` of `steps` ticks
    pub fn progress(&self, step: u16) -> f32 {
        if self.steps == 0 || step >= self.steps {
            return 1.0;
        }
        self.easing.apply(f32::from(step) / f32::from(self.steps))
    }
}
