//! Pattern engine - mode arbitration on top of the indicators
//!
//! The engine keeps the set of enabled modes and shows the pattern of the
//! highest-priority one on every configured indicator. Finite patterns
//! disable their mode once they have played.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::IndicatorDriver;
use crate::color::Rgb;
use crate::indicator::{Indicator, IndicatorId, IndicatorKind, StageEvent};
use crate::mode::{Mode, ModeSet};
use crate::pattern::Pattern;

/// Default period between two `tick` calls
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_millis(10);

/// Hardware binding of one indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorConfig {
    pub channel: u8,
    pub kind: IndicatorKind,
}

/// Configuration for the pattern engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Expected period between two `tick` calls
    ///
    /// Fade durations are converted into a number of ticks with it.
    pub update_interval: Duration,
    /// Indicator bindings indexed by [`IndicatorId`]; `None` leaves the slot unused
    pub indicators: [Option<IndicatorConfig>; IndicatorId::COUNT],
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL,
            indicators: [None; IndicatorId::COUNT],
        }
    }
}

/// Pattern engine - drives every indicator from the mode set
pub struct PatternEngine<D: IndicatorDriver> {
    driver: D,
    update_interval: Duration,
    indicators: [Option<Indicator>; IndicatorId::COUNT],
    enabled: ModeSet,
    active_mode: Mode,
}

impl<D: IndicatorDriver> PatternEngine<D> {
    /// Create the engine, open every configured indicator and switch it off
    pub fn new(mut driver: D, config: &EngineConfig) -> Self {
        let indicators = config.indicators.map(|binding| {
            binding.map(|binding| {
                let mut indicator = Indicator::new(binding.channel, binding.kind);
                indicator.open(&mut driver);
                indicator
            })
        });

        Self {
            driver,
            update_interval: config.update_interval,
            indicators,
            enabled: ModeSet::new(),
            active_mode: Mode::None,
        }
    }

    /// Play `pattern` on one indicator from its first stage
    ///
    /// Unconfigured indicators are ignored.
    pub fn start_pattern(&mut self, id: IndicatorId, pattern: &'static Pattern, now: Instant) {
        self.start_on(id, pattern, None, now);
    }

    /// Enable or disable a mode and re-run arbitration
    pub fn set_mode(&mut self, mode: Mode, enabled: bool, now: Instant) {
        self.enabled.set(mode, enabled);
        self.update_active_mode(false, now);
    }

    pub fn add_mode(&mut self, mode: Mode, now: Instant) {
        self.set_mode(mode, true, now);
    }

    pub fn remove_mode(&mut self, mode: Mode, now: Instant) {
        self.set_mode(mode, false, now);
    }

    pub fn is_mode_enabled(&self, mode: Mode) -> bool {
        self.enabled.contains(mode)
    }

    /// Advance every indicator by one scheduling step
    ///
    /// Never blocks. Call it at least every `update_interval`. Once a finite
    /// pattern completes, its owner mode is removed and the highest enabled
    /// mode is shown again. A directly started pattern counts as replacing
    /// the active mode.
    pub fn tick(&mut self, now: Instant) {
        for index in 0..IndicatorId::COUNT {
            let event = match self.indicators[index].as_mut() {
                Some(indicator) => indicator.update(&mut self.driver, now, self.update_interval),
                None => continue,
            };

            if let StageEvent::Completed(owner) = event {
                #[cfg(feature = "esp32-log")]
                println!("[indicator] pattern completed, owner: {:?}", owner);

                match owner {
                    Some(mode) => self.remove_mode(mode, now),
                    // A direct pattern replaced the active mode's pattern
                    None if self.active_mode != Mode::None => {
                        self.end_mode(self.active_mode);
                        self.update_active_mode(true, now);
                    }
                    None => {}
                }
            }
        }
    }

    /// Freeze every indicator at its last output, keeping the mode set
    pub fn pause(&mut self) {
        for indicator in self.indicators.iter_mut().flatten() {
            indicator.detach();
        }
    }

    /// Restart the pattern of the active mode from scratch
    pub fn resume(&mut self, now: Instant) {
        self.update_active_mode(true, now);
    }

    /// Check if any indicator still has a color fade outstanding
    pub fn is_fading(&self) -> bool {
        self.indicators.iter().flatten().any(Indicator::is_fading)
    }

    /// Mode currently shown
    pub const fn active_mode(&self) -> Mode {
        self.active_mode
    }

    pub const fn enabled_modes(&self) -> &ModeSet {
        &self.enabled
    }

    pub fn indicator(&self, id: IndicatorId) -> Option<&Indicator> {
        self.indicators[id.index()].as_ref()
    }

    pub fn active_pattern(&self, id: IndicatorId) -> Option<&'static Pattern> {
        self.indicator(id).and_then(Indicator::pattern)
    }

    /// Stage index playing on an indicator
    pub fn stage(&self, id: IndicatorId) -> Option<u8> {
        self.indicator(id)
            .filter(|indicator| indicator.pattern().is_some())
            .map(Indicator::stage)
    }

    /// Color shown by a color-capable indicator
    pub fn color(&self, id: IndicatorId) -> Option<Rgb> {
        self.indicator(id).and_then(Indicator::color)
    }

    pub const fn update_interval(&self) -> Duration {
        self.update_interval
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    fn update_active_mode(&mut self, force: bool, now: Instant) {
        let new_active = self.enabled.highest();
        if !force && new_active == self.active_mode {
            return;
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[indicator] mode {} -> {}",
            self.active_mode.as_str(),
            new_active.as_str()
        );

        self.end_mode(self.active_mode);
        self.active_mode = new_active;
        for id in IndicatorId::ALL {
            self.start_on(id, new_active.pattern(), Some(new_active), now);
        }
    }

    /// Finite patterns never compete for the indicator again once replaced
    fn end_mode(&mut self, mode: Mode) {
        if !mode.pattern().repeat.is_forever() {
            self.enabled.set(mode, false);
        }
    }

    fn start_on(
        &mut self,
        id: IndicatorId,
        pattern: &'static Pattern,
        owner: Option<Mode>,
        now: Instant,
    ) {
        let interval = self.update_interval;
        if let Some(indicator) = self.indicators[id.index()].as_mut() {
            indicator.start_pattern(&mut self.driver, pattern, owner, now, interval);
        }
    }
}
