//! Stable "random" layout helpers.
//!
//! These are a visual-variety generator, not a source of real randomness: the same seed always
//! produces the same value, so re-rendering a frame reproduces the exact same scattered layout.

use crate::foundation::core::Vec2;

/// Default rotation bound (degrees) for [`random_rotation`] call sites that don't pick one.
pub const DEFAULT_MAX_ROTATION_DEG: f64 = 30.0;

/// Map `seed` to a reproducible value in `[0, 1)` by sine hashing.
///
/// Non-finite seeds yield `0.0`. Very large seeds lose precision in `sin` and produce
/// visibly banded values; that's acceptable for layout jitter.
pub fn pseudo_random(seed: f64) -> f64 {
    if !seed.is_finite() {
        return 0.0;
    }
    let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
    let v = x - x.floor();
    // `x - floor(x)` rounds up to 1.0 for tiny negative `x`.
    if v >= 1.0 { 0.0 } else { v }
}

/// Scatter a point into `[0, max_x) x [0, max_y)`.
///
/// The axes draw from `seed` and `seed + 1` so x and y aren't correlated.
pub fn random_position(seed: f64, max_x: f64, max_y: f64) -> Vec2 {
    Vec2::new(
        pseudo_random(seed) * max_x,
        pseudo_random(seed + 1.0) * max_y,
    )
}

/// Pick a rotation in `[-max_deg, max_deg)` degrees.
pub fn random_rotation(seed: f64, max_deg: f64) -> f64 {
    (pseudo_random(seed) - 0.5) * 2.0 * max_deg
}

#[cfg(test)]
#[path = "../../tests/unit/animation/chaos.rs"]
mod tests;
