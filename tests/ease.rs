mod tests {
    use tracker_ui_core::{EaseConfig, Easing};

    const ALL: [Easing; 10] = [
        Easing::Linear,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::InSine,
        Easing::OutSine,
        Easing::InOutSine,
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_monotonic() {
        for easing in ALL {
            let mut previous = 0.0;
            for i in 0..=100u8 {
                let value = easing.apply(f32::from(i) / 100.0);
                assert!(value + 1e-6 >= previous, "{easing:?} decreases at {i}");
                previous = value;
            }
        }
    }

    #[test]
    fn test_clamps_input() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::InQuad.apply(3.0), 1.0);
    }

    #[test]
    fn test_in_out_quad_midpoint() {
        assert!((Easing::InOutQuad.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::InOutQuad.apply(0.25) - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_config_progress() {
        let config = EaseConfig {
            easing: Easing::Linear,
            steps: 4,
        };
        assert_eq!(config.progress(1), 0.25);
        assert_eq!(config.progress(4), 1.0);
        assert_eq!(config.progress(9), 1.0);

        let jump = EaseConfig {
            easing: Easing::Linear,
            steps: 0,
        };
        assert_eq!(jump.progress(0), 1.0);
    }
}
