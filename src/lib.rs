#![no_std]

pub mod channel;
pub mod color;
pub mod command;
pub mod ease;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod math8;
pub mod mode;
pub mod pattern;
pub mod servo;
pub mod tracker;

pub use command::{CommandChannel, CommandProcessor, CommandReceiver, CommandSender, TrackerCommand};
pub use ease::{EaseConfig, Easing};
pub use engine::{EngineConfig, IndicatorConfig, PatternEngine};
pub use error::ConfigError;
pub use indicator::{IndicatorId, IndicatorKind};
pub use mode::{Mode, ModeSet};
pub use pattern::{Pattern, Repeat, Stage};
pub use servo::{Axis, AxisConfig, AxisLimits, ServoController, ServoSettings};
pub use tracker::{TickResult, Tracker};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract indicator hardware
///
/// Implement this trait to drive status LEDs on a board. Each indicator uses
/// exactly one of the output methods, chosen by its [`IndicatorKind`]; the
/// others may keep their empty defaults. Writes are fire-and-forget: a
/// failing write is fatal for the board and must not return.
pub trait IndicatorDriver {
    /// Prepare a channel for output
    fn open(&mut self, channel: u8, kind: IndicatorKind);

    /// Switch a GPIO-only indicator
    fn set_level(&mut self, _channel: u8, _on: bool) {}

    /// Show a color on an addressable LED
    fn set_color(&mut self, _channel: u8, _color: Rgb) {}

    /// Set the duty of a PWM indicator, fading in hardware over `fade`
    fn set_pwm_duty(&mut self, _channel: u8, _duty: u16, _fade: Duration) {}
}

/// Abstract servo pulse output
///
/// Implement this trait to support different PWM peripherals. Pulse widths
/// are in microseconds.
pub trait ServoDriver {
    /// Prepare a channel at the given frequency
    fn open(&mut self, channel: u8, frequency_hz: u32);

    /// Emit a pulse width on a channel
    fn emit_pulse(&mut self, channel: u8, pulsewidth_us: u16);
}
