use core::fmt;

use crate::servo::Axis;

/// Configuration rejected at setup time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `min_pulsewidth >= max_pulsewidth`
    PulseWidthRange { axis: Axis, min: u16, max: u16 },
    /// `min_degree >= max_degree`
    DegreeRange { axis: Axis, min: u16, max: u16 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PulseWidthRange { axis, min, max } => write!(
                f,
                "{} axis: pulse width range {}..{} is empty",
                axis.as_str(),
                min,
                max
            ),
            Self::DegreeRange { axis, min, max } => write!(
                f,
                "{} axis: degree range {}..{} is empty",
                axis.as_str(),
                min,
                max
            ),
        }
    }
}

impl core::error::Error for ConfigError {}
