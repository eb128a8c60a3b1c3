use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn pre_start_frames_rest_at_zero() {
    for preset in SpringPreset::ALL {
        let rest = spring(-1_000_000.0, fps30(), preset);
        assert_eq!(rest, 0.0);
        for f in [-1.0, -0.5, -7.0, -300.25] {
            assert_eq!(spring(f, fps30(), preset).to_bits(), rest.to_bits());
        }
        assert_eq!(spring(0.0, fps30(), preset), 0.0);
    }
}

#[test]
fn smooth_converges_within_three_seconds() {
    for f in 91..200 {
        let v = spring(f64::from(f), fps30(), SpringPreset::Smooth);
        assert!((v - 1.0).abs() < 0.01, "frame {f} -> {v}");
    }
}

#[test]
fn smooth_rises_without_overshoot() {
    let mut prev = 0.0;
    for f in 0..120 {
        let v = spring(f64::from(f), fps30(), SpringPreset::Smooth);
        assert!(v <= 1.0, "overshoot at {f}: {v}");
        assert!(v + 1e-12 >= prev, "decreased at {f}");
        prev = v;
    }
}

#[test]
fn bouncy_overshoots_then_settles() {
    let samples: Vec<f64> = (0..240)
        .map(|f| spring(f64::from(f), fps30(), SpringPreset::Bouncy))
        .collect();
    let peak = samples.iter().copied().fold(f64::MIN, f64::max);
    assert!(peak > 1.1, "peak {peak}");
    assert!((samples[239] - 1.0).abs() < 1e-3);
}

#[test]
fn snappy_overshoots_slightly() {
    let peak = (0..60)
        .map(|f| spring(f64::from(f), fps30(), SpringPreset::Snappy))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0 && peak < 1.1, "peak {peak}");
}

#[test]
fn heavy_settles_slower_than_smooth() {
    let smooth = measure_spring(fps30(), SpringPreset::Smooth, DEFAULT_REST_THRESHOLD).unwrap();
    let heavy = measure_spring(fps30(), SpringPreset::Heavy, DEFAULT_REST_THRESHOLD).unwrap();
    let bouncy = measure_spring(fps30(), SpringPreset::Bouncy, DEFAULT_REST_THRESHOLD).unwrap();
    assert!((15..40).contains(&smooth), "smooth {smooth}");
    assert!(heavy > smooth);
    assert!(bouncy > smooth);
}

#[test]
fn outputs_are_bit_identical_across_calls() {
    for preset in SpringPreset::ALL {
        for f in 0..90 {
            let frame = f64::from(f) * 0.75;
            let a = spring(frame, fps30(), preset);
            let b = spring(frame, fps30(), preset);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}

#[test]
fn fractional_frames_sit_between_neighbours() {
    let a = spring(10.0, fps30(), SpringPreset::Smooth);
    let mid = spring(10.5, fps30(), SpringPreset::Smooth);
    let b = spring(11.0, fps30(), SpringPreset::Smooth);
    assert!(a < mid && mid < b);
}

#[test]
fn degenerate_config_falls_back_to_default() {
    let broken = SpringConfig::default().with_damping(0.0);
    let negative = SpringConfig::default().with_damping(-4.0);
    for f in [5.0, 20.0, 45.0] {
        let expected = spring(f, fps30(), SpringConfig::default());
        assert_eq!(spring(f, fps30(), broken), expected);
        assert_eq!(spring(f, fps30(), negative), expected);
        assert!(expected.is_finite());
    }
}

#[test]
fn config_constructor_rejects_non_positive_parameters() {
    assert!(SpringConfig::new(10.0, 100.0, 1.0).is_ok());
    for (d, k, m) in [
        (0.0, 100.0, 1.0),
        (10.0, -1.0, 1.0),
        (10.0, 100.0, 0.0),
        (f64::NAN, 100.0, 1.0),
    ] {
        let err = SpringConfig::new(d, k, m).unwrap_err();
        assert!(matches!(err, CurveError::Spring(_)));
    }
}

#[test]
fn preset_parameters_and_damping_regimes() {
    assert_eq!(SpringPreset::Smooth.config().damping, 200.0);
    assert_eq!(SpringPreset::Heavy.config().mass, 2.0);
    assert!(SpringPreset::Smooth.config().damping_ratio() >= 1.0);
    assert!(SpringPreset::Bouncy.config().damping_ratio() < 1.0);
    assert!(SpringPreset::Snappy.config().damping_ratio() < 1.0);
    for p in SpringPreset::ALL {
        p.config().validate().unwrap();
    }
}

#[test]
fn preset_names_parse_and_unknown_names_are_rejected() {
    assert_eq!("smooth".parse::<SpringPreset>().unwrap(), SpringPreset::Smooth);
    assert_eq!(" Bouncy ".parse::<SpringPreset>().unwrap(), SpringPreset::Bouncy);
    let err = "wobbly".parse::<SpringPreset>().unwrap_err();
    assert!(err.to_string().contains("unknown spring preset 'wobbly'"));

    let p: SpringPreset = serde_json::from_str("\"heavy\"").unwrap();
    assert_eq!(p, SpringPreset::Heavy);
    assert!(serde_json::from_str::<SpringPreset>("\"elastic\"").is_err());
    assert_eq!(SpringPreset::Snappy.to_string(), "snappy");
}

#[test]
fn config_deserializes_partial_records_over_defaults() {
    let cfg: SpringConfig = serde_json::from_str(r#"{ "damping": 200 }"#).unwrap();
    assert_eq!(cfg, SpringPreset::Smooth.config());
}

#[test]
fn overshoot_clamping_caps_progress() {
    let cfg = SpringPreset::Bouncy.config().with_overshoot_clamping(true);
    for f in 0..120 {
        assert!(spring(f64::from(f), fps30(), cfg) <= 1.0);
    }
}

#[test]
fn delay_shifts_the_curve() {
    let p = SpringParams::new(20.0, fps30(), SpringPreset::Smooth).delay(5.0);
    assert_eq!(
        spring_with(&p).unwrap(),
        spring(15.0, fps30(), SpringPreset::Smooth)
    );
    let early = SpringParams::new(3.0, fps30(), SpringPreset::Smooth).delay(5.0);
    assert_eq!(spring_with(&early).unwrap(), 0.0);
}

#[test]
fn range_maps_progress_onto_from_to() {
    let p = SpringParams::new(12.0, fps30(), SpringPreset::Smooth).range(100.0, 0.0);
    let progress = spring(12.0, fps30(), SpringPreset::Smooth);
    let v = spring_with(&p).unwrap();
    assert!((v - (100.0 - 100.0 * progress)).abs() < 1e-9);
    let start = SpringParams::new(-3.0, fps30(), SpringPreset::Smooth).range(100.0, 0.0);
    assert_eq!(spring_with(&start).unwrap(), 100.0);
}

#[test]
fn duration_stretches_to_requested_length() {
    let natural = measure_spring(fps30(), SpringPreset::Smooth, DEFAULT_REST_THRESHOLD).unwrap();
    let requested = 2.0 * natural as f64;
    let p = SpringParams::new(20.0, fps30(), SpringPreset::Smooth).duration(requested);
    assert_eq!(
        spring_with(&p).unwrap(),
        spring(10.0, fps30(), SpringPreset::Smooth)
    );

    let past = SpringParams::new(requested + 1.0, fps30(), SpringPreset::Smooth).duration(requested);
    assert_eq!(spring_with(&past).unwrap(), 1.0);
}

#[test]
fn reverse_plays_from_settled_back_to_rest() {
    let natural = measure_spring(fps30(), SpringPreset::Smooth, DEFAULT_REST_THRESHOLD).unwrap();
    let start = SpringParams::new(0.0, fps30(), SpringPreset::Smooth).reversed();
    assert!(spring_with(&start).unwrap() > 0.99);
    let end = SpringParams::new(natural as f64, fps30(), SpringPreset::Smooth).reversed();
    assert_eq!(spring_with(&end).unwrap(), 0.0);
}

#[test]
fn spring_with_rejects_bad_knobs() {
    let bad_duration = SpringParams::new(1.0, fps30(), SpringPreset::Smooth).duration(0.0);
    assert!(spring_with(&bad_duration).is_err());
    let bad_range = SpringParams::new(1.0, fps30(), SpringPreset::Smooth).range(0.0, f64::NAN);
    assert!(spring_with(&bad_range).is_err());
}

#[test]
fn measure_threshold_edges() {
    assert_eq!(measure_spring(fps30(), SpringPreset::Bouncy, 1.0).unwrap(), 0);
    assert!(measure_spring(fps30(), SpringPreset::Bouncy, 0.0).is_err());
    assert!(measure_spring(fps30(), SpringPreset::Bouncy, 1.5).is_err());
    assert!(measure_spring(fps30(), SpringPreset::Bouncy, f64::NAN).is_err());
}

#[test]
fn measured_frame_is_within_threshold_for_the_window() {
    let n = measure_spring(fps30(), SpringPreset::Bouncy, DEFAULT_REST_THRESHOLD).unwrap();
    for f in n..n + 19 {
        let v = spring(f as f64, fps30(), SpringPreset::Bouncy);
        assert!((v - 1.0).abs() < DEFAULT_REST_THRESHOLD, "frame {f} -> {v}");
    }
}

#[test]
fn matches_reference_recurrence_values() {
    let fps = fps30();
    let cases = [
        (SpringPreset::Smooth, 17.0, 0.9769374844235683),
        (SpringPreset::Bouncy, 10.5, 1.2531772428073555),
        (SpringPreset::Heavy, 60.0, 1.0006813712381661),
        (SpringPreset::Snappy, 33.0, 1.0000166276205393),
    ];
    for (preset, frame, expected) in cases {
        let got = spring(frame, fps, preset);
        assert!(
            (got - expected).abs() < 1e-12,
            "{preset} at {frame}: got {got}, expected {expected}"
        );
    }
}

#[test]
fn natural_durations_match_reference_at_30fps() {
    let fps = fps30();
    let measured: Vec<(SpringPreset, u64)> = SpringPreset::ALL
        .into_iter()
        .map(|p| (p, measure_spring(fps, p, DEFAULT_REST_THRESHOLD).unwrap()))
        .collect();
    assert_eq!(
        measured,
        vec![
            (SpringPreset::Smooth, 23),
            (SpringPreset::Snappy, 15),
            (SpringPreset::Bouncy, 36),
            (SpringPreset::Heavy, 44),
        ]
    );
}
