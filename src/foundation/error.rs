/// Convenience result type used across framecurve.
pub type CurveResult<T> = Result<T, CurveError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum CurveError {
    /// Invalid user-provided configuration or composition data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Contract violations in range interpolation (bad breakpoints, NaN input).
    #[error("interpolation error: {0}")]
    Interpolation(String),

    /// Invalid spring parameters.
    #[error("spring error: {0}")]
    Spring(String),

    /// Errors while evaluating timeline state for a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CurveError {
    /// Build a [`CurveError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CurveError::Interpolation`] value.
    pub fn interpolation(msg: impl Into<String>) -> Self {
        Self::Interpolation(msg.into())
    }

    /// Build a [`CurveError::Spring`] value.
    pub fn spring(msg: impl Into<String>) -> Self {
        Self::Spring(msg.into())
    }

    /// Build a [`CurveError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`CurveError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
