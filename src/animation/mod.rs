//! Frame-driven animation primitives.
//!
//! Everything here is a pure function of its arguments: the same frame always produces the same
//! value, so frames can be evaluated in any order.

/// Deterministic pseudo-random layout helpers.
pub mod chaos;
/// Easing curves.
pub mod ease;
/// Piecewise-linear range mapping.
pub mod interpolate;
/// Derived entrance and loop helpers built on springs and interpolation.
pub mod ops;
/// Damped spring progress curves.
pub mod spring;
