//! Pan/tilt servo control
//!
//! Degrees are converted to RC pulse widths through a per-axis
//! [`PulseCurve`], and transitions are eased over a fixed number of ticks by
//! the [`ServoController`].

mod controller;

pub use controller::{ServoController, ServoSettings};

use crate::error::ConfigError;

/// Servo driving frequency (standard 20 ms RC period)
pub const SERVO_FREQUENCY_HZ: u32 = 50;

pub const DEFAULT_MIN_PULSEWIDTH: u16 = 1000;
pub const DEFAULT_MAX_PULSEWIDTH: u16 = 2000;
pub const MAX_PAN_DEGREE: u16 = 180;
pub const MAX_TILT_DEGREE: u16 = 90;

const AXIS_NAME_PAN: &str = "pan";
const AXIS_NAME_TILT: &str = "tilt";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Axis {
    Pan = 0,
    Tilt = 1,
}

impl Axis {
    pub const ALL: [Self; 2] = [Self::Pan, Self::Tilt];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pan => AXIS_NAME_PAN,
            Self::Tilt => AXIS_NAME_TILT,
        }
    }
}

/// Pulse width (µs) and degree bounds of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisLimits {
    pub min_pulsewidth: u16,
    pub max_pulsewidth: u16,
    pub min_degree: u16,
    pub max_degree: u16,
}

impl AxisLimits {
    /// Pan limits used by the tracker: half a turn
    pub const PAN: Self = Self {
        min_pulsewidth: DEFAULT_MIN_PULSEWIDTH,
        max_pulsewidth: DEFAULT_MAX_PULSEWIDTH,
        min_degree: 0,
        max_degree: MAX_PAN_DEGREE,
    };

    /// Tilt limits used by the tracker: horizon to zenith
    pub const TILT: Self = Self {
        min_pulsewidth: DEFAULT_MIN_PULSEWIDTH,
        max_pulsewidth: DEFAULT_MAX_PULSEWIDTH,
        min_degree: 0,
        max_degree: MAX_TILT_DEGREE,
    };

    /// Reject empty or inverted ranges
    pub const fn validate(&self, axis: Axis) -> Result<(), ConfigError> {
        if self.min_pulsewidth >= self.max_pulsewidth {
            return Err(ConfigError::PulseWidthRange {
                axis,
                min: self.min_pulsewidth,
                max: self.max_pulsewidth,
            });
        }
        if self.min_degree >= self.max_degree {
            return Err(ConfigError::DegreeRange {
                axis,
                min: self.min_degree,
                max: self.max_degree,
            });
        }
        Ok(())
    }

    pub fn clamp_degree(&self, degree: u16) -> u16 {
        degree.max(self.min_degree).min(self.max_degree)
    }

    pub fn clamp_pulsewidth(&self, pulsewidth: u16) -> u16 {
        pulsewidth.max(self.min_pulsewidth).min(self.max_pulsewidth)
    }

    /// Mirror a degree inside `[min_degree, max_degree]`
    pub fn mirror_degree(&self, degree: u16) -> u16 {
        let offset = self.clamp_degree(degree).saturating_sub(self.min_degree);
        self.max_degree.saturating_sub(offset)
    }

    /// Degree shown for a pulse width, inverse of [`linear_curve`]
    ///
    /// An empty pulse width range reads as `min_degree`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn degree_from_pulsewidth(&self, pulsewidth: u16, reverse: bool) -> u16 {
        let pulse_span = u32::from(self.max_pulsewidth.saturating_sub(self.min_pulsewidth));
        let degree_span = u32::from(self.max_degree.saturating_sub(self.min_degree));
        let degree = if pulse_span == 0 {
            self.min_degree
        } else {
            let offset = u32::from(self.clamp_pulsewidth(pulsewidth) - self.min_pulsewidth);
            self.min_degree + ((offset * degree_span + pulse_span / 2) / pulse_span) as u16
        };
        if reverse {
            self.mirror_degree(degree)
        } else {
            degree
        }
    }

    /// Position of a pulse width inside the range, in percent
    #[allow(clippy::cast_possible_truncation)]
    pub fn pulsewidth_percentage(&self, pulsewidth: u16) -> u8 {
        let span = u32::from(self.max_pulsewidth.saturating_sub(self.min_pulsewidth));
        if span == 0 {
            return 0;
        }
        let offset = u32::from(self.clamp_pulsewidth(pulsewidth) - self.min_pulsewidth);
        (offset * 100 / span) as u8
    }
}

/// Converts a degree into a pulse width for an axis
///
/// The degree is already clamped to the limits. `reverse` asks for the
/// mirrored mapping.
pub type PulseCurve = fn(limits: &AxisLimits, degree: u16, reverse: bool) -> u16;

/// Linear mapping from `[min_degree, max_degree]` to `[min_pulsewidth, max_pulsewidth]`
///
/// An empty degree range maps to `min_pulsewidth`.
#[allow(clippy::cast_possible_truncation)]
pub fn linear_curve(limits: &AxisLimits, degree: u16, reverse: bool) -> u16 {
    let degree_span = u32::from(limits.max_degree.saturating_sub(limits.min_degree));
    if degree_span == 0 {
        return limits.min_pulsewidth;
    }
    let degree = if reverse {
        limits.mirror_degree(degree)
    } else {
        limits.clamp_degree(degree)
    };
    let pulse_span = u32::from(limits.max_pulsewidth.saturating_sub(limits.min_pulsewidth));
    let offset = u32::from(degree - limits.min_degree);
    limits.min_pulsewidth + ((offset * pulse_span + degree_span / 2) / degree_span) as u16
}

/// Static configuration of one axis
#[derive(Debug, Clone, Copy)]
pub struct AxisConfig {
    pub limits: AxisLimits,
    pub curve: PulseCurve,
    pub reverse: bool,
}

impl AxisConfig {
    pub const fn new(limits: AxisLimits) -> Self {
        Self {
            limits,
            curve: linear_curve,
            reverse: false,
        }
    }

    #[must_use]
    pub const fn with_curve(mut self, curve: PulseCurve) -> Self {
        self.curve = curve;
        self
    }

    #[must_use]
    pub const fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }
}

/// Runtime state of one axis
#[derive(Debug, Clone, Copy)]
pub struct AxisStatus {
    /// Commanded degree
    pub degree: u16,
    /// Pulse width currently emitted
    pub pulsewidth: u16,
    /// Pulse width the running transition started from
    pub last_pulsewidth: u16,
    /// Pulse width the running transition converges to
    pub target_pulsewidth: u16,
    /// Ticks elapsed in the running transition
    pub step_position: u16,
    pub is_easing: bool,
    pub is_reverse: bool,
    /// Output channel, `None` until the axis is configured
    pub channel: Option<u8>,
    pub limits: AxisLimits,
    pub curve: PulseCurve,
}

impl AxisStatus {
    pub fn new(config: &AxisConfig) -> Self {
        let mut status = Self {
            degree: 0,
            pulsewidth: 0,
            last_pulsewidth: 0,
            target_pulsewidth: 0,
            step_position: 0,
            is_easing: false,
            is_reverse: config.reverse,
            channel: None,
            limits: config.limits,
            curve: config.curve,
        };
        status.reset();
        status
    }

    /// Rest at the lowest degree with no transition running
    pub fn reset(&mut self) {
        self.degree = self.limits.min_degree;
        self.pulsewidth = self.pulsewidth_for(self.degree);
        self.last_pulsewidth = self.pulsewidth;
        self.target_pulsewidth = self.pulsewidth;
        self.step_position = 0;
        self.is_easing = false;
    }

    /// Pulse width for `degree` through the axis curve, always within limits
    pub fn pulsewidth_for(&self, degree: u16) -> u16 {
        let degree = self.limits.clamp_degree(degree);
        self.limits
            .clamp_pulsewidth((self.curve)(&self.limits, degree, self.is_reverse))
    }
}
