//! Animation error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Celebration failure with location tracking.
///
/// Raised when the presentation surface rejects a step.
#[derive(Debug, Clone, Display, Error)]
#[display("Animation error: {} at {}:{}", message, file, line)]
pub struct AnimationError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl AnimationError {
    /// Creates a new animation error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Wraps a surface failure for the named step.
    #[track_caller]
    pub fn surface(step: &str, err: anyhow::Error) -> Self {
        Self::new(format!("Surface failed to {}: {:#}", step, err))
    }
}
