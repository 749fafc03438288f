//! Indicator runtime state and stage sequencing
//!
//! An [`Indicator`] plays one [`Pattern`] at a time. Its hardware capability
//! is resolved once at construction into an [`IndicatorOutput`] variant.

use embassy_time::{Duration, Instant};

use crate::IndicatorDriver;
use crate::color::{ColorFade, OFF, Rgb, gray, scale_color};
use crate::math8::{LEVEL_CENTER, LEVEL_MIN, level_to_duty, ticks_in};
use crate::mode::Mode;
use crate::pattern::Pattern;

/// Known indicators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum IndicatorId {
    Led1 = 0,
}

impl IndicatorId {
    pub const ALL: [Self; 1] = [Self::Led1];
    pub const COUNT: usize = Self::ALL.len();

    pub fn from_raw(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Output capability of an indicator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorKind {
    /// Plain on/off pin
    Gpio,
    /// Dimmable channel with hardware fading
    Pwm,
    /// Addressable color LED, faded in software
    Color,
}

/// Capability-specific output state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorOutput {
    Gpio,
    Pwm,
    Color(ColorFade),
}

impl IndicatorOutput {
    pub const fn new(kind: IndicatorKind) -> Self {
        match kind {
            IndicatorKind::Gpio => Self::Gpio,
            IndicatorKind::Pwm => Self::Pwm,
            IndicatorKind::Color => Self::Color(ColorFade::new(OFF)),
        }
    }

    pub const fn kind(&self) -> IndicatorKind {
        match self {
            Self::Gpio => IndicatorKind::Gpio,
            Self::Pwm => IndicatorKind::Pwm,
            Self::Color(_) => IndicatorKind::Color,
        }
    }
}

/// Outcome of a single indicator update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    /// Nothing changed stage
    Idle,
    /// A stage started
    Started(u8),
    /// A finite pattern finished its last run; carries the mode that installed it
    Completed(Option<Mode>),
}

/// Runtime state of one physical indicator
#[derive(Debug, Clone)]
pub struct Indicator {
    channel: u8,
    output: IndicatorOutput,
    pattern: Option<&'static Pattern>,
    owner: Option<Mode>,
    stage: u8,
    repeat: u8,
    next_update: Option<Instant>,
    /// Stage 0 of a freshly installed pattern waits for the pending deadline
    pending_start: bool,
}

impl Indicator {
    pub const fn new(channel: u8, kind: IndicatorKind) -> Self {
        Self {
            channel,
            output: IndicatorOutput::new(kind),
            pattern: None,
            owner: None,
            stage: 0,
            repeat: 0,
            next_update: None,
            pending_start: false,
        }
    }

    pub const fn channel(&self) -> u8 {
        self.channel
    }

    pub const fn output(&self) -> &IndicatorOutput {
        &self.output
    }

    pub const fn pattern(&self) -> Option<&'static Pattern> {
        self.pattern
    }

    /// Mode whose pattern is playing, if it was installed by arbitration
    pub const fn owner(&self) -> Option<Mode> {
        self.owner
    }

    pub const fn stage(&self) -> u8 {
        self.stage
    }

    /// Completed runs of the current pattern
    pub const fn repeat(&self) -> u8 {
        self.repeat
    }

    pub const fn next_update(&self) -> Option<Instant> {
        self.next_update
    }

    /// Color currently shown by a color-capable indicator
    pub const fn color(&self) -> Option<Rgb> {
        match &self.output {
            IndicatorOutput::Color(fade) => Some(fade.current()),
            _ => None,
        }
    }

    pub const fn is_fading(&self) -> bool {
        match &self.output {
            IndicatorOutput::Color(fade) => fade.is_active(),
            _ => false,
        }
    }

    /// Prepare the hardware channel and switch the output off
    pub fn open<D: IndicatorDriver>(&mut self, driver: &mut D) {
        driver.open(self.channel, self.output.kind());
        self.apply(driver, LEVEL_MIN, None, Duration::from_millis(0), Duration::from_millis(0));
        self.next_update = None;
    }

    /// Install `pattern` from its first stage
    ///
    /// If a stage deadline is still pending, stage 0 starts once it expires.
    pub fn start_pattern<D: IndicatorDriver>(
        &mut self,
        driver: &mut D,
        pattern: &'static Pattern,
        owner: Option<Mode>,
        now: Instant,
        interval: Duration,
    ) {
        self.pattern = Some(pattern);
        self.owner = owner;
        self.stage = 0;
        self.repeat = 0;

        let pending = self.next_update.is_some_and(|deadline| now <= deadline);
        if pending {
            self.pending_start = true;
        } else {
            self.pending_start = false;
            self.start_stage(driver, now, interval);
        }
    }

    /// Detach the pattern; the output keeps its last value
    pub fn detach(&mut self) {
        self.pattern = None;
        self.pending_start = false;
    }

    /// Advance the stage state machine and the fade
    pub fn update<D: IndicatorDriver>(
        &mut self,
        driver: &mut D,
        now: Instant,
        interval: Duration,
    ) -> StageEvent {
        let Some(pattern) = self.pattern else {
            return StageEvent::Idle;
        };

        let mut event = StageEvent::Idle;
        if self.next_update.is_some_and(|deadline| now > deadline) {
            if self.pending_start {
                self.pending_start = false;
            } else {
                self.stage += 1;
                if self.stage >= pattern.count() {
                    self.repeat = self.repeat.saturating_add(1);
                    if !pattern.repeat.allows(self.repeat) {
                        let owner = self.owner;
                        self.finish(driver);
                        return StageEvent::Completed(owner);
                    }
                    self.stage = 0;
                }
            }
            self.start_stage(driver, now, interval);
            event = StageEvent::Started(self.stage);
        }

        if let IndicatorOutput::Color(fade) = &mut self.output {
            if let Some(color) = fade.advance() {
                driver.set_color(self.channel, color);
            }
        }

        event
    }

    fn start_stage<D: IndicatorDriver>(&mut self, driver: &mut D, now: Instant, interval: Duration) {
        let stage = self.pattern.and_then(|pattern| pattern.stage(self.stage)).copied();
        match stage {
            Some(stage) => {
                self.apply(driver, stage.level, stage.color, stage.fade, interval);
                self.next_update = Some(now + stage.duration);
            }
            None => {
                self.apply(driver, LEVEL_MIN, None, Duration::from_millis(0), interval);
                self.next_update = None;
            }
        }
    }

    /// Go idle with the output off
    fn finish<D: IndicatorDriver>(&mut self, driver: &mut D) {
        self.pattern = None;
        self.owner = None;
        self.stage = 0;
        self.pending_start = false;
        self.next_update = None;
        self.apply(driver, LEVEL_MIN, None, Duration::from_millis(0), Duration::from_millis(0));
    }

    fn apply<D: IndicatorDriver>(
        &mut self,
        driver: &mut D,
        level: u8,
        color: Option<Rgb>,
        fade: Duration,
        interval: Duration,
    ) {
        match &mut self.output {
            IndicatorOutput::Gpio => {
                driver.set_level(self.channel, level >= LEVEL_CENTER);
            }
            IndicatorOutput::Pwm => {
                driver.set_pwm_duty(self.channel, level_to_duty(level), fade);
            }
            IndicatorOutput::Color(state) => {
                let target = match color {
                    Some(color) => scale_color(color, level),
                    None => gray(level),
                };
                let ticks = ticks_in(fade, interval);
                if ticks > 0 {
                    if let Some(snapped) = state.begin(target, ticks) {
                        driver.set_color(self.channel, snapped);
                    }
                } else {
                    state.jump(target);
                    driver.set_color(self.channel, target);
                }
            }
        }
    }
}
