use embassy_time::Duration;

/// Lowest stage level (output off)
pub const LEVEL_MIN: u8 = 0;
/// GPIO-only indicators are switched on for levels at or above this value
pub const LEVEL_CENTER: u8 = 128;
/// Highest stage level
pub const LEVEL_MAX: u8 = 255;

/// Resolution of the PWM indicator channel
pub const PWM_RESOLUTION_BITS: u32 = 10;
/// Highest duty value accepted by the PWM indicator channel
pub const PWM_MAX: u16 = (1 << PWM_RESOLUTION_BITS) - 1;

/// Scale an 8-bit value by a stage level using exact integer division
///
/// Unlike a `>> 8` approximation, `scale_level(255, 255)` is 255.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn scale_level(value: u8, level: u8) -> u8 {
    ((value as u16 * level as u16) / LEVEL_MAX as u16) as u8
}

/// Convert a stage level to a PWM duty value
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn level_to_duty(level: u8) -> u16 {
    ((level as u32 * PWM_MAX as u32) / LEVEL_MAX as u32) as u16
}

/// Round towards the larger magnitude, so any non-zero input stays non-zero
#[inline]
pub fn round_away_from_zero(value: f32) -> f32 {
    if value < 0.0 {
        libm::floorf(value)
    } else {
        libm::ceilf(value)
    }
}

/// Number of whole update intervals that fit into `duration`
///
/// Returns 0 when `interval` is zero.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn ticks_in(duration: Duration, interval: Duration) -> u32 {
    let interval = interval.as_ticks();
    if interval == 0 {
        return 0;
    }
    let count = duration.as_ticks() / interval;
    if count > u32::MAX as u64 {
        u32::MAX
    } else {
        count as u32
    }
}
