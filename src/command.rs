//! Commands queued by other threads for the tick loop
//!
//! The engine and the servo controller are owned by the tick loop. UI or
//! network code running elsewhere sends [`TrackerCommand`]s instead, and the
//! [`CommandProcessor`] applies them at the start of the next tick.

use embassy_time::Instant;

use crate::channel::{Channel, Receiver, Sender};
use crate::engine::PatternEngine;
use crate::indicator::IndicatorId;
use crate::mode::Mode;
use crate::pattern::Pattern;
use crate::servo::{Axis, ServoController};
use crate::{IndicatorDriver, ServoDriver};

/// Request to change indicator or servo state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerCommand {
    /// Enable or disable a mode
    SetMode(Mode, bool),
    /// Play a pattern directly on one indicator
    StartPattern(IndicatorId, &'static Pattern),
    /// Freeze the indicators
    Pause,
    /// Restart the active mode's pattern
    Resume,
    /// Aim an axis at a degree
    SetTargetDegree(Axis, u16),
    /// Emit a raw pulse width on an axis
    Out(Axis, u16),
    /// Mirror the degree mapping of an axis
    SetReverse(Axis, bool),
}

/// Type alias for command sender
pub type CommandSender<'a, const SIZE: usize> = Sender<'a, TrackerCommand, SIZE>;

/// Type alias for command receiver
pub type CommandReceiver<'a, const SIZE: usize> = Receiver<'a, TrackerCommand, SIZE>;

/// Type alias for the command channel
pub type CommandChannel<const SIZE: usize> = Channel<TrackerCommand, SIZE>;

/// Applies queued commands on the tick thread
pub struct CommandProcessor<'a, const SIZE: usize> {
    commands: CommandReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> CommandProcessor<'a, SIZE> {
    pub const fn new(commands: CommandReceiver<'a, SIZE>) -> Self {
        Self { commands }
    }

    /// Apply every pending command (non-blocking)
    ///
    /// Returns the number of commands applied.
    pub fn process_pending<I: IndicatorDriver, S: ServoDriver>(
        &mut self,
        engine: &mut PatternEngine<I>,
        servo: &mut ServoController<S>,
        now: Instant,
    ) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.commands.try_receive() {
            Self::apply(command, engine, servo, now);
            applied += 1;
        }
        applied
    }

    fn apply<I: IndicatorDriver, S: ServoDriver>(
        command: TrackerCommand,
        engine: &mut PatternEngine<I>,
        servo: &mut ServoController<S>,
        now: Instant,
    ) {
        match command {
            TrackerCommand::SetMode(mode, enabled) => engine.set_mode(mode, enabled, now),
            TrackerCommand::StartPattern(id, pattern) => engine.start_pattern(id, pattern, now),
            TrackerCommand::Pause => engine.pause(),
            TrackerCommand::Resume => engine.resume(now),
            TrackerCommand::SetTargetDegree(axis, degree) => servo.set_target_degree(axis, degree),
            TrackerCommand::Out(axis, pulsewidth) => servo.out(axis, pulsewidth),
            TrackerCommand::SetReverse(axis, reverse) => servo.set_reverse(axis, reverse),
        }
    }
}
