//! Damped-oscillator progress curves.
//!
//! A spring starts at rest at 0 and is pulled toward 1. The curve is produced by stepping the
//! closed-form oscillator solution from one frame's sample time to the next (Δt capped at 64 ms).
//! Under-damped configs (ζ < 1) overshoot and settle; everything else follows the critically
//! damped solution.

use std::str::FromStr;

use crate::{
    animation::interpolate::{InterpolateOptions, interpolate},
    foundation::core::Fps,
    foundation::error::{CurveError, CurveResult},
};

/// Default rest threshold used when measuring a spring's natural duration.
pub const DEFAULT_REST_THRESHOLD: f64 = 0.005;

const MAX_STEP_MS: f64 = 64.0;
const SETTLE_WINDOW_FRAMES: u32 = 20;
const MAX_MEASURE_SECS: f64 = 3600.0;

/// Physical parameters of a spring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Damping coefficient, must be > 0.
    pub damping: f64,
    /// Spring stiffness, must be > 0.
    pub stiffness: f64,
    /// Oscillating mass, must be > 0.
    pub mass: f64,
    /// Pin the progress at 1 instead of overshooting.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            stiffness: 100.0,
            mass: 1.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Build a validated config.
    pub fn new(damping: f64, stiffness: f64, mass: f64) -> CurveResult<Self> {
        let cfg = Self {
            damping,
            stiffness,
            mass,
            overshoot_clamping: false,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that every physical parameter is finite and positive.
    pub fn validate(&self) -> CurveResult<()> {
        for (name, v) in [
            ("damping", self.damping),
            ("stiffness", self.stiffness),
            ("mass", self.mass),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(CurveError::spring(format!(
                    "spring {name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Replace the damping coefficient.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Toggle overshoot clamping.
    pub fn with_overshoot_clamping(mut self, on: bool) -> Self {
        self.overshoot_clamping = on;
        self
    }

    /// Damping ratio ζ = c / (2√(km)).
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Undamped angular frequency ω0 = √(k/m), in rad/s.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    fn sanitized(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(err) => {
                tracing::warn!(%err, "degenerate spring config, using default");
                Self {
                    overshoot_clamping: self.overshoot_clamping,
                    ..Self::default()
                }
            }
        }
    }
}

/// Named spring profiles used by scenes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpringPreset {
    /// Heavily damped: approaches 1 without overshoot.
    Smooth,
    /// Stiff with a small overshoot.
    Snappy,
    /// Lightly damped: overshoots past 1 and settles back.
    Bouncy,
    /// Large mass, slow to settle.
    Heavy,
}

impl SpringPreset {
    /// Every preset, in declaration order.
    pub const ALL: [Self; 4] = [Self::Smooth, Self::Snappy, Self::Bouncy, Self::Heavy];

    /// Physical parameters for this preset.
    pub fn config(self) -> SpringConfig {
        let base = SpringConfig::default();
        match self {
            Self::Smooth => SpringConfig {
                damping: 200.0,
                ..base
            },
            Self::Snappy => SpringConfig {
                damping: 20.0,
                stiffness: 200.0,
                ..base
            },
            Self::Bouncy => SpringConfig {
                damping: 8.0,
                ..base
            },
            Self::Heavy => SpringConfig {
                damping: 15.0,
                stiffness: 80.0,
                mass: 2.0,
                ..base
            },
        }
    }

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Snappy => "snappy",
            Self::Bouncy => "bouncy",
            Self::Heavy => "heavy",
        }
    }
}

impl From<SpringPreset> for SpringConfig {
    fn from(p: SpringPreset) -> Self {
        p.config()
    }
}

impl FromStr for SpringPreset {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| CurveError::validation(format!("unknown spring preset '{}'", s.trim())))
    }
}

impl std::fmt::Display for SpringPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Full set of knobs for [`spring_with`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    /// Current frame; negative values mean "before start".
    pub frame: f64,
    /// Timeline frame rate.
    pub fps: Fps,
    /// Physical parameters.
    pub config: SpringConfig,
    /// Output value at rest before the start.
    pub from: f64,
    /// Output value the spring settles at.
    pub to: f64,
    /// Frames subtracted from `frame` before evaluation.
    pub delay: f64,
    /// Play the curve backwards from its end.
    pub reverse: bool,
    /// Stretch or squash the curve so it settles after this many frames.
    pub duration_in_frames: Option<f64>,
    /// Settling threshold used to measure the natural duration.
    pub rest_threshold: f64,
}

impl SpringParams {
    /// Plain 0 → 1 spring with no delay.
    pub fn new(frame: f64, fps: Fps, config: impl Into<SpringConfig>) -> Self {
        Self {
            frame,
            fps,
            config: config.into(),
            from: 0.0,
            to: 1.0,
            delay: 0.0,
            reverse: false,
            duration_in_frames: None,
            rest_threshold: DEFAULT_REST_THRESHOLD,
        }
    }

    /// Set the start delay in frames.
    pub fn delay(mut self, frames: f64) -> Self {
        self.delay = frames;
        self
    }

    /// Map the progress onto `[from, to]`.
    pub fn range(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Play backwards.
    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Fit the curve into `frames`.
    pub fn duration(mut self, frames: f64) -> Self {
        self.duration_in_frames = Some(frames);
        self
    }
}

/// Spring progress at `frame`, starting from rest at 0 and settling at 1.
///
/// Frames before 0 return the resting value 0. Degenerate configs fall back to
/// [`SpringConfig::default`].
pub fn spring(frame: f64, fps: Fps, config: impl Into<SpringConfig>) -> f64 {
    let cfg = config.into().sanitized();
    clamp_overshoot(simulate(frame, fps.as_f64(), &cfg).current, &cfg)
}

/// Spring with delay, output range, reversal and duration fitting.
///
/// Evaluation order: reverse, then delay, then duration stretch, then simulation, then the
/// optional overshoot clamp and the `[from, to]` mapping.
pub fn spring_with(params: &SpringParams) -> CurveResult<f64> {
    let cfg = params.config.sanitized();
    for (name, v) in [
        ("from", params.from),
        ("to", params.to),
        ("delay", params.delay),
    ] {
        if !v.is_finite() {
            return Err(CurveError::spring(format!(
                "spring {name} must be finite, got {v}"
            )));
        }
    }
    if let Some(d) = params.duration_in_frames
        && !(d.is_finite() && d > 0.0)
    {
        return Err(CurveError::spring(format!(
            "spring duration_in_frames must be finite and > 0, got {d}"
        )));
    }

    let natural = if params.reverse || params.duration_in_frames.is_some() {
        Some(measure_spring(params.fps, cfg, params.rest_threshold)? as f64)
    } else {
        None
    };

    let reversed = if params.reverse {
        params.duration_in_frames.or(natural).unwrap_or(0.0) - params.frame
    } else {
        params.frame
    };
    let delayed = if params.reverse {
        reversed + params.delay
    } else {
        reversed - params.delay
    };
    let stretched = match (params.duration_in_frames, natural) {
        (Some(d), Some(n)) => delayed / (d / n),
        _ => delayed,
    };

    if let Some(d) = params.duration_in_frames
        && delayed > d
    {
        return Ok(params.to);
    }

    let progress = clamp_overshoot(simulate(stretched, params.fps.as_f64(), &cfg).current, &cfg);
    if params.from == 0.0 && params.to == 1.0 {
        return Ok(progress);
    }
    interpolate(
        progress,
        &[0.0, 1.0],
        &[params.from, params.to],
        InterpolateOptions::default(),
    )
}

/// Number of frames until the spring stays within `threshold` of its target.
///
/// "Stays" means for 20 consecutive frames, so a bouncy spring that
/// passes through the target isn't reported as settled. A threshold of 1 settles immediately;
/// 0 never settles and is rejected.
pub fn measure_spring(fps: Fps, config: impl Into<SpringConfig>, threshold: f64) -> CurveResult<u64> {
    if !(threshold.is_finite() && (0.0..=1.0).contains(&threshold)) {
        return Err(CurveError::spring(format!(
            "rest threshold must be in [0, 1], got {threshold}"
        )));
    }
    if threshold == 0.0 {
        return Err(CurveError::spring(
            "rest threshold 0 never settles; use a positive threshold",
        ));
    }
    if threshold == 1.0 {
        return Ok(0);
    }

    let cfg = config.into().sanitized();
    let fps_f = fps.as_f64();
    let max_frames = fps.secs_to_frames_floor(MAX_MEASURE_SECS);

    let mut sim = Simulation::new(fps_f, cfg);
    sim.advance_to(0.0);
    let distance = |s: &Simulation| (s.state.current - 1.0).abs();

    let unsettled = || {
        CurveError::spring(format!(
            "spring did not settle within {MAX_MEASURE_SECS} seconds"
        ))
    };

    let mut frame: u64 = 0;
    while distance(&sim) >= threshold {
        frame += 1;
        if frame > max_frames {
            return Err(unsettled());
        }
        sim.advance_to(frame as f64);
    }

    let mut finished = frame;
    let mut quiet: u32 = 0;
    while quiet < SETTLE_WINDOW_FRAMES {
        frame += 1;
        if frame > max_frames {
            return Err(unsettled());
        }
        sim.advance_to(frame as f64);
        if distance(&sim) >= threshold {
            quiet = 0;
            finished = frame + 1;
        }
        quiet += 1;
    }
    Ok(finished)
}

fn clamp_overshoot(progress: f64, cfg: &SpringConfig) -> f64 {
    if cfg.overshoot_clamping {
        progress.min(1.0)
    } else {
        progress
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SpringState {
    current: f64,
    velocity: f64,
    last_ms: f64,
}

impl SpringState {
    const REST_START: Self = Self {
        current: 0.0,
        velocity: 0.0,
        last_ms: 0.0,
    };

    fn is_settled(&self) -> bool {
        self.current == 1.0 && self.velocity == 0.0
    }
}

struct Simulation {
    fps: f64,
    config: SpringConfig,
    state: SpringState,
}

impl Simulation {
    fn new(fps: f64, config: SpringConfig) -> Self {
        Self {
            fps,
            config,
            state: SpringState::REST_START,
        }
    }

    fn advance_to(&mut self, frame: f64) {
        let now_ms = frame / self.fps * 1000.0;
        self.state = step(self.state, now_ms, &self.config);
    }
}

fn simulate(frame: f64, fps: f64, cfg: &SpringConfig) -> SpringState {
    if frame == f64::INFINITY {
        return SpringState {
            current: 1.0,
            velocity: 0.0,
            last_ms: f64::INFINITY,
        };
    }
    // NaN and negative frames both land on the resting start.
    let frame = frame.max(0.0);
    let whole = frame.floor();
    let rest = frame - whole;

    let mut sim = Simulation::new(fps, *cfg);
    let mut f = 0.0;
    loop {
        if f >= whole {
            sim.advance_to(whole + rest);
            break;
        }
        sim.advance_to(f);
        // A settled state maps onto itself exactly, so the remaining steps are no-ops.
        if sim.state.is_settled() {
            break;
        }
        f += 1.0;
    }
    sim.state
}

fn step(state: SpringState, now_ms: f64, cfg: &SpringConfig) -> SpringState {
    const TO: f64 = 1.0;

    let delta_ms = (now_ms - state.last_ms).min(MAX_STEP_MS);
    let t = delta_ms / 1000.0;
    let v0 = -state.velocity;
    let x0 = TO - state.current;
    let zeta = cfg.damping_ratio();
    let omega0 = cfg.natural_frequency();

    let (current, velocity) = if zeta < 1.0 {
        let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
        let sin1 = (omega1 * t).sin();
        let cos1 = (omega1 * t).cos();
        let envelope = (-zeta * omega0 * t).exp();
        let frag = envelope * (sin1 * ((v0 + zeta * omega0 * x0) / omega1) + x0 * cos1);
        let position = TO - frag;
        let velocity =
            zeta * omega0 * frag - envelope * (cos1 * (v0 + zeta * omega0 * x0) - omega1 * x0 * sin1);
        (position, velocity)
    } else {
        let envelope = (-omega0 * t).exp();
        let position = TO - envelope * (x0 + (v0 + omega0 * x0) * t);
        let velocity = envelope * (v0 * (t * omega0 - 1.0) + t * x0 * omega0 * omega0);
        (position, velocity)
    };

    SpringState {
        current,
        velocity,
        last_ms: now_ms,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
