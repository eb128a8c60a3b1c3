/// Seeded document scatter.
pub mod chaos_field;
/// Scene header and title entrance.
pub mod chrome;
