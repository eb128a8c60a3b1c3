//! JSON-facing composition definitions and the builtin registry.

pub mod model;
