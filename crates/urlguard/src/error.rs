//! Failures surfaced by `PredictionService`.
//!
//! Display strings are safe to hand to callers; diagnostic detail stays in
//! the logs.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    /// Missing or empty URL.
    #[error("No URL provided")]
    InvalidInput,
    /// The classifier failed to load at startup.
    #[error("Model is not available")]
    ServiceUnavailable,
    /// Inference or decoding failed.
    #[error("Internal Server Error")]
    PredictionFailure,
}

impl PredictionError {
    /// True for failures the caller caused.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput)
    }
}
