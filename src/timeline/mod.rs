/// Per-element entrance delays.
pub mod delay;
/// Scene sequencing with fade transitions.
pub mod series;
