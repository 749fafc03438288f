mod tests {
    use tracker_ui_core::servo::{AxisStatus, SERVO_FREQUENCY_HZ, linear_curve};
    use tracker_ui_core::{
        Axis, AxisConfig, AxisLimits, ConfigError, EaseConfig, Easing, ServoController,
        ServoDriver, ServoSettings,
    };

    const PAN_CHANNEL: u8 = 27;
    const TILT_CHANNEL: u8 = 26;

    #[derive(Default)]
    struct RecordingDriver {
        opened: Vec<(u8, u32)>,
        pulses: Vec<(u8, u16)>,
    }

    impl RecordingDriver {
        fn last_pulse(&self, channel: u8) -> Option<u16> {
            self.pulses
                .iter()
                .rev()
                .find(|(c, _)| *c == channel)
                .map(|(_, pulse)| *pulse)
        }
    }

    impl ServoDriver for RecordingDriver {
        fn open(&mut self, channel: u8, frequency_hz: u32) {
            self.opened.push((channel, frequency_hz));
        }

        fn emit_pulse(&mut self, channel: u8, pulsewidth_us: u16) {
            self.pulses.push((channel, pulsewidth_us));
        }
    }

    fn linear(steps: u16) -> EaseConfig {
        EaseConfig {
            easing: Easing::Linear,
            steps,
        }
    }

    fn controller(settings: &ServoSettings) -> ServoController<RecordingDriver> {
        let mut servo =
            ServoController::new(RecordingDriver::default(), settings).expect("valid settings");
        servo.initialize();
        servo.configure(Axis::Pan, PAN_CHANNEL);
        servo.configure(Axis::Tilt, TILT_CHANNEL);
        servo
    }

    #[test]
    fn test_configure_opens_at_servo_frequency() {
        let servo = controller(&ServoSettings::default());
        assert_eq!(
            servo.driver().opened,
            [(PAN_CHANNEL, SERVO_FREQUENCY_HZ), (TILT_CHANNEL, 50)]
        );
        assert_eq!(servo.driver().pulses, [(PAN_CHANNEL, 1000), (TILT_CHANNEL, 1000)]);
        assert_eq!(servo.degree(Axis::Pan), 0);
        assert!(!servo.is_easing());
    }

    #[test]
    fn test_degree_to_pulsewidth() {
        let mut servo = controller(&ServoSettings::default());
        servo.set_target_degree(Axis::Pan, 90);
        assert_eq!(servo.target_pulsewidth(Axis::Pan), 1500);
        assert!(servo.is_easing());

        servo.set_target_degree(Axis::Pan, 200);
        assert_eq!(servo.degree(Axis::Pan), 180);
        assert_eq!(servo.target_pulsewidth(Axis::Pan), 2000);

        servo.set_target_degree(Axis::Tilt, 45);
        assert_eq!(servo.target_pulsewidth(Axis::Tilt), 1500);
        servo.set_target_degree(Axis::Tilt, 120);
        assert_eq!(servo.degree(Axis::Tilt), 90);
        assert_eq!(servo.target_pulsewidth(Axis::Tilt), 2000);
    }

    #[test]
    fn test_reversed_axis() {
        let settings = ServoSettings {
            pan: AxisConfig::new(AxisLimits::PAN).with_reverse(true),
            ..ServoSettings::default()
        };
        let mut servo = controller(&settings);
        assert_eq!(servo.pulsewidth(Axis::Pan), 2000);

        servo.set_target_degree(Axis::Pan, 0);
        assert_eq!(servo.target_pulsewidth(Axis::Pan), 2000);
        assert!(!servo.is_easing());

        servo.set_target_degree(Axis::Pan, 180);
        assert_eq!(servo.target_pulsewidth(Axis::Pan), 1000);
    }

    #[test]
    fn test_set_reverse_retargets() {
        let mut servo = controller(&ServoSettings {
            ease: linear(2),
            ..ServoSettings::default()
        });
        servo.set_reverse(Axis::Pan, true);
        assert!(servo.status(Axis::Pan).is_reverse);
        assert_eq!(servo.target_pulsewidth(Axis::Pan), 2000);

        servo.tick();
        servo.tick();
        assert_eq!(servo.pulsewidth(Axis::Pan), 2000);
    }

    #[test]
    fn test_out_clamps_raw_pulsewidth() {
        let mut servo = controller(&ServoSettings::default());
        servo.out(Axis::Pan, 2500);
        assert_eq!(servo.pulsewidth(Axis::Pan), 2000);
        assert_eq!(servo.driver().last_pulse(PAN_CHANNEL), Some(2000));
        assert_eq!(servo.degree(Axis::Pan), 180);

        servo.out(Axis::Tilt, 500);
        assert_eq!(servo.pulsewidth(Axis::Tilt), 1000);

        servo.out(Axis::Pan, 1500);
        assert_eq!(servo.pulsewidth(Axis::Pan), 1500);
        assert_eq!(servo.pulsewidth_percentage(Axis::Pan), 50);
        assert_eq!(servo.degree(Axis::Pan), 90);
    }

    #[test]
    fn test_out_cancels_transition() {
        let mut servo = controller(&ServoSettings::default());
        servo.set_target_degree(Axis::Pan, 180);
        servo.tick();
        servo.out(Axis::Pan, 1200);
        assert!(!servo.is_easing());

        servo.tick();
        assert_eq!(servo.pulsewidth(Axis::Pan), 1200);
    }

    #[test]
    fn test_linear_ease_steps() {
        let mut servo = controller(&ServoSettings {
            ease: linear(4),
            ..ServoSettings::default()
        });
        servo.set_target_degree(Axis::Pan, 90);

        let mut emitted = Vec::new();
        for _ in 0..4 {
            servo.tick();
            emitted.push(servo.pulsewidth(Axis::Pan));
        }
        assert_eq!(emitted, [1125, 1250, 1375, 1500]);
        assert!(!servo.is_easing());
        assert_eq!(servo.status(Axis::Pan).last_pulsewidth, 1500);

        servo.tick();
        assert_eq!(servo.driver().last_pulse(PAN_CHANNEL), Some(1500));
    }

    #[test]
    fn test_eased_motion_is_monotonic_and_bounded() {
        let mut servo = controller(&ServoSettings::default());
        servo.set_target_degree(Axis::Tilt, 90);

        let steps = servo.ease().steps;
        let mut previous = servo.pulsewidth(Axis::Tilt);
        for _ in 0..steps {
            servo.tick();
            let current = servo.pulsewidth(Axis::Tilt);
            assert!(current >= previous);
            assert!((1000..=2000).contains(&current));
            previous = current;
        }
        assert_eq!(previous, 2000);
        assert!(!servo.is_easing());
    }

    #[test]
    fn test_retarget_mid_transition_starts_from_current() {
        let mut servo = controller(&ServoSettings {
            ease: linear(4),
            ..ServoSettings::default()
        });
        servo.set_target_degree(Axis::Pan, 180);
        servo.tick();
        servo.tick();
        assert_eq!(servo.pulsewidth(Axis::Pan), 1500);

        servo.set_target_degree(Axis::Pan, 0);
        assert_eq!(servo.status(Axis::Pan).last_pulsewidth, 1500);
        assert_eq!(servo.status(Axis::Pan).step_position, 0);
        servo.tick();
        assert_eq!(servo.pulsewidth(Axis::Pan), 1375);
    }

    #[test]
    fn test_zero_steps_jumps() {
        let mut servo = controller(&ServoSettings {
            ease: linear(0),
            ..ServoSettings::default()
        });
        servo.set_target_degree(Axis::Pan, 90);
        assert_eq!(servo.pulsewidth(Axis::Pan), 1500);
        assert!(!servo.is_easing());
        assert_eq!(servo.driver().last_pulse(PAN_CHANNEL), Some(1500));
    }

    #[test]
    fn test_unbound_axis_emits_nothing() {
        let mut servo =
            ServoController::new(RecordingDriver::default(), &ServoSettings::default())
                .expect("valid settings");
        servo.initialize();
        servo.out(Axis::Pan, 1700);
        servo.set_target_degree(Axis::Tilt, 10);
        servo.tick();

        assert_eq!(servo.pulsewidth(Axis::Pan), 1700);
        assert!(servo.driver().pulses.is_empty());
        assert!(servo.driver().opened.is_empty());
    }

    #[test]
    fn test_initialize_zeroes_status() {
        let mut servo = controller(&ServoSettings::default());
        servo.out(Axis::Pan, 1800);
        servo.set_target_degree(Axis::Tilt, 60);
        servo.initialize();

        assert_eq!(servo.pulsewidth(Axis::Pan), 1000);
        assert_eq!(servo.degree(Axis::Tilt), 0);
        assert!(!servo.is_easing());
        assert_eq!(servo.driver().last_pulse(PAN_CHANNEL), Some(1000));
    }

    #[test]
    fn test_malformed_limits_are_rejected() {
        let settings = ServoSettings {
            pan: AxisConfig::new(AxisLimits {
                min_pulsewidth: 2000,
                max_pulsewidth: 1000,
                ..AxisLimits::PAN
            }),
            ..ServoSettings::default()
        };
        let result = ServoController::new(RecordingDriver::default(), &settings);
        assert_eq!(
            result.err(),
            Some(ConfigError::PulseWidthRange {
                axis: Axis::Pan,
                min: 2000,
                max: 1000
            })
        );

        let settings = ServoSettings {
            tilt: AxisConfig::new(AxisLimits {
                min_degree: 90,
                ..AxisLimits::TILT
            }),
            ..ServoSettings::default()
        };
        let result = ServoController::new(RecordingDriver::default(), &settings);
        assert_eq!(
            result.err(),
            Some(ConfigError::DegreeRange {
                axis: Axis::Tilt,
                min: 90,
                max: 90
            })
        );
    }

    fn stepped_curve(limits: &AxisLimits, degree: u16, _reverse: bool) -> u16 {
        // Coarse 10 degree detents, overshooting on purpose
        linear_curve(limits, degree / 10 * 10, false) + 100
    }

    #[test]
    fn test_custom_curve_is_clamped() {
        let settings = ServoSettings {
            pan: AxisConfig::new(AxisLimits::PAN).with_curve(stepped_curve),
            ..ServoSettings::default()
        };
        let mut servo = controller(&settings);
        servo.set_target_degree(Axis::Pan, 95);
        assert_eq!(servo.target_pulsewidth(Axis::Pan), 1600);

        servo.set_target_degree(Axis::Pan, 180);
        assert_eq!(servo.target_pulsewidth(Axis::Pan), 2000);
    }

    #[test]
    fn test_limits_helpers() {
        let limits = AxisLimits::PAN;
        assert_eq!(linear_curve(&limits, 0, false), 1000);
        assert_eq!(linear_curve(&limits, 45, false), 1250);
        assert_eq!(linear_curve(&limits, 45, true), 1750);
        assert_eq!(limits.degree_from_pulsewidth(1500, false), 90);
        assert_eq!(limits.degree_from_pulsewidth(1000, true), 180);
        assert_eq!(limits.pulsewidth_percentage(2000), 100);
        assert_eq!(limits.pulsewidth_percentage(900), 0);

        let status = AxisStatus::new(&AxisConfig::new(AxisLimits::TILT));
        assert_eq!(status.pulsewidth_for(30), 1333);
    }

    #[test]
    fn test_reversed_mapping_on_high_degree_range() {
        let limits = AxisLimits {
            min_pulsewidth: 1000,
            max_pulsewidth: 2000,
            min_degree: 40_000,
            max_degree: 40_180,
        };
        assert_eq!(limits.mirror_degree(40_000), 40_180);
        assert_eq!(limits.mirror_degree(40_045), 40_135);
        assert_eq!(linear_curve(&limits, 40_000, true), 2000);
        assert_eq!(linear_curve(&limits, 40_180, true), 1000);
        assert_eq!(limits.degree_from_pulsewidth(1000, true), 40_180);
        assert_eq!(limits.degree_from_pulsewidth(1500, true), 40_090);
    }

    #[test]
    fn test_empty_ranges_do_not_divide_by_zero() {
        let flat_degrees = AxisLimits {
            min_degree: 90,
            max_degree: 90,
            ..AxisLimits::PAN
        };
        assert_eq!(linear_curve(&flat_degrees, 90, false), 1000);
        assert_eq!(linear_curve(&flat_degrees, 10, true), 1000);

        let flat_pulses = AxisLimits {
            min_pulsewidth: 1500,
            max_pulsewidth: 1500,
            ..AxisLimits::PAN
        };
        assert_eq!(flat_pulses.degree_from_pulsewidth(1500, false), 0);
        assert_eq!(flat_pulses.degree_from_pulsewidth(1500, true), 180);
        assert_eq!(flat_pulses.pulsewidth_percentage(1500), 0);

        let inverted = AxisLimits {
            min_pulsewidth: 2000,
            max_pulsewidth: 1000,
            min_degree: 180,
            max_degree: 0,
        };
        assert_eq!(linear_curve(&inverted, 45, true), 2000);
        assert_eq!(inverted.degree_from_pulsewidth(1200, true), 0);
        assert_eq!(inverted.pulsewidth_percentage(1200), 0);
    }
}
