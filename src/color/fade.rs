//! Tick-driven color fading
//!
//! A fade moves each channel by a fixed signed step on every update until it
//! reaches the target. Steps are computed once when the fade begins.

use super::Rgb;
use crate::math8::round_away_from_zero;

/// Most negative per-update change of a channel
pub const COLOR_STEP_MIN: i16 = -255;
/// Most positive per-update change of a channel
pub const COLOR_STEP_MAX: i16 = 255;

/// Signed per-channel step applied on every fade update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorStep {
    pub r: i16,
    pub g: i16,
    pub b: i16,
}

/// Color fade state of a color-capable indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorFade {
    current: Rgb,
    target: Rgb,
    step: ColorStep,
    active: bool,
}

impl ColorFade {
    pub const fn new(initial: Rgb) -> Self {
        Self {
            current: initial,
            target: initial,
            step: ColorStep { r: 0, g: 0, b: 0 },
            active: false,
        }
    }

    /// Color currently shown
    pub const fn current(&self) -> Rgb {
        self.current
    }

    /// Color the fade converges to
    pub const fn target(&self) -> Rgb {
        self.target
    }

    pub const fn step(&self) -> ColorStep {
        self.step
    }

    /// Check if a fade still has steps outstanding
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Start fading towards `target` over `ticks` updates
    ///
    /// A fade that is still running is snapped to its own target first, and
    /// that snapped color is returned so the caller can show it. Fades never
    /// blend into each other.
    pub fn begin(&mut self, target: Rgb, ticks: u32) -> Option<Rgb> {
        let snapped = if self.active {
            self.current = self.target;
            Some(self.current)
        } else {
            None
        };

        #[allow(clippy::cast_precision_loss)]
        let ticks = ticks.max(1) as f32;
        self.target = target;
        self.step = ColorStep {
            r: channel_step(self.current.r, target.r, ticks),
            g: channel_step(self.current.g, target.g, ticks),
            b: channel_step(self.current.b, target.b, ticks),
        };
        self.active = self.current != self.target;

        snapped
    }

    /// Show `color` immediately, cancelling any fade in progress
    pub fn jump(&mut self, color: Rgb) {
        self.current = color;
        self.target = color;
        self.step = ColorStep::default();
        self.active = false;
    }

    /// Move one step closer to the target
    ///
    /// Returns the new color if it changed. The fade deactivates in the same
    /// update that reaches the target.
    pub fn advance(&mut self) -> Option<Rgb> {
        if !self.active {
            return None;
        }
        if self.current == self.target {
            self.active = false;
            return None;
        }

        self.current = Rgb {
            r: step_channel(self.current.r, self.target.r, self.step.r),
            g: step_channel(self.current.g, self.target.g, self.step.g),
            b: step_channel(self.current.b, self.target.b, self.step.b),
        };
        if self.current == self.target {
            self.active = false;
        }

        Some(self.current)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn channel_step(current: u8, target: u8, ticks: f32) -> i16 {
    let delta = f32::from(i16::from(target) - i16::from(current));
    let step = round_away_from_zero(delta / ticks) as i16;
    step.clamp(COLOR_STEP_MIN, COLOR_STEP_MAX)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn step_channel(current: u8, target: u8, step: i16) -> u8 {
    let next = i16::from(current) + step;
    let target_wide = i16::from(target);
    if (step > 0 && next > target_wide) || (step < 0 && next < target_wide) {
        return target;
    }
    next.clamp(0, 255) as u8
}
