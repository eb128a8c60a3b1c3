use crate::{
    animation::interpolate::{InterpolateOptions, interpolate},
    animation::spring::{SpringPreset, spring},
    foundation::core::Fps,
    foundation::error::{CurveError, CurveResult},
};

/// Default per-item stagger in frames.
pub const DEFAULT_STAGGER_FRAMES: u64 = 5;
/// Default fade length in seconds.
pub const DEFAULT_FADE_SECS: f64 = 0.5;
/// Default connection-line draw length in seconds.
pub const DEFAULT_DRAW_SECS: f64 = 0.5;
/// Default pulse speed in cycles per second.
pub const DEFAULT_PULSE_SPEED: f64 = 1.5;

/// Edge an element slides in from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideDirection {
    /// Enters from the left (negative x offset).
    Left,
    /// Enters from the right (positive x offset).
    Right,
    /// Enters from above (negative y offset).
    Top,
    /// Enters from below (positive y offset).
    Bottom,
}

/// Opacity ramp 0 → 1 over `duration_secs`, starting `delay` frames in.
pub fn fade_in(frame: f64, fps: Fps, duration_secs: f64, delay: f64) -> CurveResult<f64> {
    interpolate(
        frame - delay,
        &[0.0, duration_secs * fps.as_f64()],
        &[0.0, 1.0],
        InterpolateOptions::clamped(),
    )
}

/// Opacity ramp 1 → 0 ending at `total_frames`.
pub fn fade_out(frame: f64, total_frames: f64, fps: Fps, duration_secs: f64) -> CurveResult<f64> {
    let start = total_frames - duration_secs * fps.as_f64();
    interpolate(
        frame,
        &[start, total_frames],
        &[1.0, 0.0],
        InterpolateOptions::clamped(),
    )
}

/// Offset along one axis for an element sliding in by `distance` pixels.
///
/// Left and top entrances return negative offsets.
pub fn slide_in(
    frame: f64,
    fps: Fps,
    direction: SlideDirection,
    distance: f64,
) -> CurveResult<f64> {
    let progress = spring(frame, fps, SpringPreset::Smooth);
    let offset = interpolate(
        progress,
        &[0.0, 1.0],
        &[distance, 0.0],
        InterpolateOptions::default(),
    )?;
    Ok(match direction {
        SlideDirection::Left | SlideDirection::Top => -offset,
        SlideDirection::Right | SlideDirection::Bottom => offset,
    })
}

/// Scale factor growing from 0 toward 1 after `delay` frames.
pub fn scale_in(frame: f64, fps: Fps, delay: f64) -> f64 {
    spring(frame - delay, fps, SpringPreset::Smooth)
}

/// Entrance delay for the `index`-th item of a staggered group.
pub fn staggered_delay(index: u64, per_item: u64) -> u64 {
    index.saturating_mul(per_item)
}

/// Stroke reveal 0 → 1 for connection lines.
pub fn draw_progress(frame: f64, fps: Fps, delay: f64, duration_secs: f64) -> CurveResult<f64> {
    fade_in(frame, fps, duration_secs, delay)
}

/// Dash offset for "marching ants" flow along a connection line.
pub fn marching_dash_offset(frame: u64) -> u64 {
    frame.wrapping_mul(2) % 40
}

/// Breathing highlight factor oscillating in `[0.7, 1.0]`.
pub fn pulse(frame: f64, fps: Fps, speed: f64) -> f64 {
    let cycle = fps.frames_to_secs(frame) * speed * std::f64::consts::TAU;
    0.85 + cycle.sin() * 0.15
}

/// Entrance state shared by cards, badges and text blocks.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Reveal {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Vertical offset in pixels, settling at 0.
    pub translate_y: f64,
    /// Uniform scale, settling at 1.
    pub scale: f64,
}

/// Map spring `progress` onto the usual entrance: fade in over the first `fade_span` of the
/// progress, rise from `rise` pixels below, and grow from 0.8 scale.
pub fn reveal(progress: f64, fade_span: f64, rise: f64) -> CurveResult<Reveal> {
    Ok(Reveal {
        opacity: interpolate(
            progress,
            &[0.0, fade_span],
            &[0.0, 1.0],
            InterpolateOptions::clamp_right(),
        )?,
        translate_y: interpolate(
            progress,
            &[0.0, 1.0],
            &[rise, 0.0],
            InterpolateOptions::default(),
        )?,
        scale: interpolate(
            progress,
            &[0.0, 1.0],
            &[0.8, 1.0],
            InterpolateOptions::default(),
        )?,
    })
}

/// Count a metric label like `"120%"` up from zero.
///
/// Digits in `label` form the target, everything else is kept as the suffix. The count ramps
/// linearly over `count_frames` after `delay`. A target too large for `u64` is a validation error.
pub fn count_up(label: &str, frame: f64, delay: f64, count_frames: f64) -> CurveResult<String> {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    let suffix: String = label.chars().filter(|c| !c.is_ascii_digit()).collect();
    let target = if digits.is_empty() {
        0
    } else {
        digits.parse::<u64>().map_err(|e| {
            CurveError::validation(format!("count-up target in '{label}' is not a u64: {e}"))
        })?
    };
    if target == 0 {
        return Ok("0".to_string());
    }
    let ramp = interpolate(
        frame - delay,
        &[0.0, count_frames],
        &[0.0, 1.0],
        InterpolateOptions::clamped(),
    )?;
    let shown = (target as f64 * ramp).floor() as u64;
    Ok(format!("{shown}{suffix}"))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
