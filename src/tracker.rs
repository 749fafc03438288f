//! Cooperative tick loop for the indicator and the servos.
//!
//! Provides portable tick pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between ticks.

use embassy_time::{Duration, Instant};

use crate::command::{CommandProcessor, CommandReceiver};
use crate::engine::PatternEngine;
use crate::servo::ServoController;
use crate::{IndicatorDriver, ServoDriver};

/// Result of a tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero if behind schedule).
    pub sleep_duration: Duration,
    /// Commands applied during this tick.
    pub commands: usize,
}

/// Single-threaded owner of the pattern engine and the servo controller.
///
/// Every tick:
/// - Applies queued commands from other threads
/// - Advances the indicator patterns and fades
/// - Advances the servo transitions
/// - Returns timing info so the caller can sleep appropriately
///
/// The tick period is the engine's update interval, so fade lengths computed
/// in ticks match wall time.
///
/// # Usage
///
/// ```ignore
/// let mut tracker = Tracker::new(engine, servo, channel.receiver());
///
/// loop {
///     let result = tracker.tick(Instant::now());
///     Timer::at(result.next_deadline).await;
/// }
/// ```
pub struct Tracker<'a, I: IndicatorDriver, S: ServoDriver, const COMMAND_CHANNEL_SIZE: usize> {
    engine: PatternEngine<I>,
    servo: ServoController<S>,
    commands: CommandProcessor<'a, COMMAND_CHANNEL_SIZE>,
    next_tick: Instant,
}

impl<'a, I: IndicatorDriver, S: ServoDriver, const COMMAND_CHANNEL_SIZE: usize>
    Tracker<'a, I, S, COMMAND_CHANNEL_SIZE>
{
    pub fn new(
        engine: PatternEngine<I>,
        servo: ServoController<S>,
        commands: CommandReceiver<'a, COMMAND_CHANNEL_SIZE>,
    ) -> Self {
        Self {
            engine,
            servo,
            commands: CommandProcessor::new(commands),
            next_tick: Instant::from_millis(0),
        }
    }

    /// Run one scheduling pass and return timing information.
    ///
    /// Falling more than two periods behind resets the schedule to `now`
    /// instead of bursting to catch up.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        let period = self.engine.update_interval();
        if now > self.next_tick + period * 2 {
            self.next_tick = now;
        }

        let commands = self
            .commands
            .process_pending(&mut self.engine, &mut self.servo, now);
        self.engine.tick(now);
        self.servo.tick();

        self.next_tick += period;
        let sleep_duration = if self.next_tick > now {
            self.next_tick - now
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration,
            commands,
        }
    }

    /// Check if the indicator is fading or a servo is still moving.
    ///
    /// Power management keeps the loop running while this is true.
    pub fn is_animating(&self) -> bool {
        self.engine.is_fading() || self.servo.is_easing()
    }

    pub fn engine(&self) -> &PatternEngine<I> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PatternEngine<I> {
        &mut self.engine
    }

    pub fn servo(&self) -> &ServoController<S> {
        &self.servo
    }

    pub fn servo_mut(&mut self) -> &mut ServoController<S> {
        &mut self.servo
    }
}
