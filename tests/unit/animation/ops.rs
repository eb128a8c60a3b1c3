use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn fade_in_ramps_over_duration_after_delay() {
    let fps = fps30();
    assert_eq!(fade_in(0.0, fps, DEFAULT_FADE_SECS, 10.0).unwrap(), 0.0);
    assert_eq!(fade_in(10.0, fps, DEFAULT_FADE_SECS, 10.0).unwrap(), 0.0);
    assert_eq!(fade_in(17.5, fps, DEFAULT_FADE_SECS, 10.0).unwrap(), 0.5);
    assert_eq!(fade_in(25.0, fps, DEFAULT_FADE_SECS, 10.0).unwrap(), 1.0);
    assert_eq!(fade_in(400.0, fps, DEFAULT_FADE_SECS, 10.0).unwrap(), 1.0);
}

#[test]
fn fade_in_with_zero_duration_is_a_contract_violation() {
    assert!(fade_in(3.0, fps30(), 0.0, 0.0).is_err());
}

#[test]
fn fade_out_ends_at_total() {
    let fps = fps30();
    assert_eq!(fade_out(0.0, 150.0, fps, 0.5).unwrap(), 1.0);
    assert_eq!(fade_out(135.0, 150.0, fps, 0.5).unwrap(), 1.0);
    assert_eq!(fade_out(142.5, 150.0, fps, 0.5).unwrap(), 0.5);
    assert_eq!(fade_out(150.0, 150.0, fps, 0.5).unwrap(), 0.0);
    assert_eq!(fade_out(180.0, 150.0, fps, 0.5).unwrap(), 0.0);
}

#[test]
fn slide_in_sign_follows_direction() {
    let fps = fps30();
    assert_eq!(slide_in(0.0, fps, SlideDirection::Left, 100.0).unwrap(), -100.0);
    assert_eq!(slide_in(0.0, fps, SlideDirection::Top, 100.0).unwrap(), -100.0);
    assert_eq!(slide_in(0.0, fps, SlideDirection::Right, 100.0).unwrap(), 100.0);
    assert_eq!(slide_in(0.0, fps, SlideDirection::Bottom, 100.0).unwrap(), 100.0);

    let settled = slide_in(120.0, fps, SlideDirection::Left, 100.0).unwrap();
    assert!(settled.abs() < 1e-3, "settled {settled}");
}

#[test]
fn scale_in_waits_for_delay() {
    let fps = fps30();
    assert_eq!(scale_in(4.0, fps, 5.0), 0.0);
    assert!(scale_in(30.0, fps, 5.0) > 0.9);
}

#[test]
fn staggered_delay_multiplies_index() {
    assert_eq!(staggered_delay(0, DEFAULT_STAGGER_FRAMES), 0);
    assert_eq!(staggered_delay(3, DEFAULT_STAGGER_FRAMES), 15);
    assert_eq!(staggered_delay(u64::MAX, 2), u64::MAX);
}

#[test]
fn draw_progress_matches_half_second_ramp() {
    let fps = fps30();
    assert_eq!(draw_progress(20.0, fps, 20.0, DEFAULT_DRAW_SECS).unwrap(), 0.0);
    assert_eq!(draw_progress(35.0, fps, 20.0, DEFAULT_DRAW_SECS).unwrap(), 1.0);
}

#[test]
fn marching_dash_offset_wraps_every_twenty_frames() {
    assert_eq!(marching_dash_offset(0), 0);
    assert_eq!(marching_dash_offset(7), 14);
    assert_eq!(marching_dash_offset(20), 0);
    assert_eq!(marching_dash_offset(27), 14);
}

#[test]
fn pulse_stays_in_band() {
    let fps = fps30();
    assert_eq!(pulse(0.0, fps, DEFAULT_PULSE_SPEED), 0.85);
    for f in 0..300 {
        let v = pulse(f64::from(f), fps, DEFAULT_PULSE_SPEED);
        assert!((0.7 - 1e-12..=1.0 + 1e-12).contains(&v));
    }
}

#[test]
fn reveal_from_rest_and_settled() {
    let start = reveal(0.0, 0.3, 20.0).unwrap();
    assert_eq!(
        start,
        Reveal {
            opacity: 0.0,
            translate_y: 20.0,
            scale: 0.8
        }
    );
    let end = reveal(1.0, 0.3, 20.0).unwrap();
    assert_eq!(
        end,
        Reveal {
            opacity: 1.0,
            translate_y: 0.0,
            scale: 1.0
        }
    );
    // Bouncy overshoot keeps opacity pinned while the rest extends.
    let over = reveal(1.2, 0.3, 20.0).unwrap();
    assert_eq!(over.opacity, 1.0);
    assert!(over.translate_y < 0.0);
    assert!(over.scale > 1.0);
}

#[test]
fn count_up_keeps_suffix_and_floors() {
    assert_eq!(count_up("120%", 0.0, 0.0, 30.0).unwrap(), "0%");
    assert_eq!(count_up("120%", 15.0, 0.0, 30.0).unwrap(), "60%");
    assert_eq!(count_up("120%", 100.0, 0.0, 30.0).unwrap(), "120%");
    assert_eq!(count_up("x4", 15.0, 0.0, 30.0).unwrap(), "2x");
    assert_eq!(count_up("0 leaks", 50.0, 0.0, 30.0).unwrap(), "0");
    assert_eq!(count_up("none", 50.0, 0.0, 30.0).unwrap(), "0");
}

#[test]
fn count_up_rejects_targets_past_u64() {
    let err = count_up("123456789012345678901%", 10.0, 0.0, 30.0).unwrap_err();
    assert!(matches!(err, CurveError::Validation(_)));
    assert_eq!(
        count_up("18446744073709551615", 30.0, 0.0, 30.0).unwrap(),
        "18446744073709551615"
    );
}
