//! Frame, rate and canvas primitives plus the crate error type.

pub mod core;
pub mod error;
