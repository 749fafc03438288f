use libm::roundf;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{Axis, AxisConfig, AxisLimits, AxisStatus, SERVO_FREQUENCY_HZ};
use crate::ServoDriver;
use crate::ease::EaseConfig;
use crate::error::ConfigError;

/// Configuration for both axes and the transition shape
#[derive(Debug, Clone, Copy)]
pub struct ServoSettings {
    pub pan: AxisConfig,
    pub tilt: AxisConfig,
    pub ease: EaseConfig,
}

impl Default for ServoSettings {
    fn default() -> Self {
        Self {
            pan: AxisConfig::new(AxisLimits::PAN),
            tilt: AxisConfig::new(AxisLimits::TILT),
            ease: EaseConfig::default(),
        }
    }
}

/// Servo control loop for the pan and tilt axes
pub struct ServoController<D: ServoDriver> {
    driver: D,
    axes: [AxisStatus; 2],
    ease: EaseConfig,
}

impl<D: ServoDriver> ServoController<D> {
    /// Create the controller, rejecting malformed axis limits
    pub fn new(driver: D, settings: &ServoSettings) -> Result<Self, ConfigError> {
        settings.pan.limits.validate(Axis::Pan)?;
        settings.tilt.limits.validate(Axis::Tilt)?;

        Ok(Self {
            driver,
            axes: [AxisStatus::new(&settings.pan), AxisStatus::new(&settings.tilt)],
            ease: settings.ease,
        })
    }

    /// Zero the status of both axes and set bound outputs to the driving frequency
    pub fn initialize(&mut self) {
        for axis in Axis::ALL {
            let status = &mut self.axes[axis.index()];
            status.reset();
            if let Some(channel) = status.channel {
                self.driver.open(channel, SERVO_FREQUENCY_HZ);
                self.driver.emit_pulse(channel, status.pulsewidth);
            }
        }
    }

    /// Bind an axis to an output channel and emit its current pulse width
    ///
    /// Nothing is emitted for an axis before it is configured.
    pub fn configure(&mut self, axis: Axis, channel: u8) {
        let status = &mut self.axes[axis.index()];
        status.channel = Some(channel);
        self.driver.open(channel, SERVO_FREQUENCY_HZ);
        self.driver.emit_pulse(channel, status.pulsewidth);

        #[cfg(feature = "esp32-log")]
        println!("[servo] {} bound to channel {}", axis.as_str(), channel);
    }

    /// Aim an axis at `degree`, clamped to its limits
    ///
    /// Starts an eased transition from the current pulse width when the target
    /// differs. With a zero-length ease the pulse is emitted immediately.
    pub fn set_target_degree(&mut self, axis: Axis, degree: u16) {
        let status = &mut self.axes[axis.index()];
        let degree = status.limits.clamp_degree(degree);
        let target = status.pulsewidth_for(degree);

        status.degree = degree;
        status.target_pulsewidth = target;
        if target == status.pulsewidth {
            status.is_easing = false;
            status.last_pulsewidth = target;
            return;
        }

        status.last_pulsewidth = status.pulsewidth;
        status.step_position = 0;
        status.is_easing = true;

        if self.ease.steps == 0 {
            self.advance(axis);
        }
    }

    /// Emit a raw pulse width, bypassing the degree conversion
    ///
    /// The value is clamped to the axis limits and cancels any transition.
    pub fn out(&mut self, axis: Axis, pulsewidth: u16) {
        let status = &mut self.axes[axis.index()];
        let pulsewidth = status.limits.clamp_pulsewidth(pulsewidth);

        status.pulsewidth = pulsewidth;
        status.last_pulsewidth = pulsewidth;
        status.target_pulsewidth = pulsewidth;
        status.step_position = 0;
        status.is_easing = false;
        status.degree = status
            .limits
            .degree_from_pulsewidth(pulsewidth, status.is_reverse);

        if let Some(channel) = status.channel {
            self.driver.emit_pulse(channel, pulsewidth);
        }
    }

    /// Mirror the degree mapping of an axis
    ///
    /// The commanded degree is kept and re-targeted through the new mapping.
    pub fn set_reverse(&mut self, axis: Axis, reverse: bool) {
        let status = &mut self.axes[axis.index()];
        if status.is_reverse == reverse {
            return;
        }
        status.is_reverse = reverse;
        let degree = status.degree;
        self.set_target_degree(axis, degree);
    }

    /// Advance every running transition by one step
    pub fn tick(&mut self) {
        for axis in Axis::ALL {
            if self.axes[axis.index()].is_easing {
                self.advance(axis);
            }
        }
    }

    pub fn status(&self, axis: Axis) -> &AxisStatus {
        &self.axes[axis.index()]
    }

    pub fn degree(&self, axis: Axis) -> u16 {
        self.axes[axis.index()].degree
    }

    pub fn pulsewidth(&self, axis: Axis) -> u16 {
        self.axes[axis.index()].pulsewidth
    }

    pub fn target_pulsewidth(&self, axis: Axis) -> u16 {
        self.axes[axis.index()].target_pulsewidth
    }

    /// Position of the current pulse width inside the axis range, in percent
    pub fn pulsewidth_percentage(&self, axis: Axis) -> u8 {
        let status = &self.axes[axis.index()];
        status.limits.pulsewidth_percentage(status.pulsewidth)
    }

    pub fn is_easing(&self) -> bool {
        self.axes.iter().any(|status| status.is_easing)
    }

    pub const fn ease(&self) -> EaseConfig {
        self.ease
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn advance(&mut self, axis: Axis) {
        let status = &mut self.axes[axis.index()];
        status.step_position = status.step_position.saturating_add(1);

        let progress = self.ease.progress(status.step_position);
        let from = f32::from(status.last_pulsewidth);
        let to = f32::from(status.target_pulsewidth);
        let next = roundf(from + (to - from) * progress) as u16;
        status.pulsewidth = status.limits.clamp_pulsewidth(next);

        if self.ease.steps == 0 || status.step_position >= self.ease.steps {
            status.pulsewidth = status.target_pulsewidth;
            status.last_pulsewidth = status.target_pulsewidth;
            status.is_easing = false;
        }

        if let Some(channel) = status.channel {
            self.driver.emit_pulse(channel, status.pulsewidth);
        }
    }
}
