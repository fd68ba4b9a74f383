use thiserror::Error;

use crate::adapter::AdapterError;
use crate::review::ReviewError;

fn describe_failures(failures: &[AdapterError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors surfaced to the caller of [`ReviewAnalyzer::analyze`](super::ReviewAnalyzer::analyze).
///
/// Single-adapter failures are not errors: they degrade the verdict instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Missing or oversized submission fields. Not retryable.
    #[error("invalid input: {0}")]
    InvalidInput(ReviewError),

    /// The review image is present but unreadable.
    #[error("image could not be decoded: {reason}")]
    Decode { reason: String },

    /// Every adapter that was invoked failed; there is nothing to base a verdict on.
    #[error("analysis unavailable: {}", describe_failures(.failures))]
    AnalysisUnavailable { failures: Vec<AdapterError> },
}

impl AnalysisError {
    /// Only a total adapter outage is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AnalysisError::AnalysisUnavailable { .. })
    }
}

impl From<ReviewError> for AnalysisError {
    fn from(err: ReviewError) -> Self {
        if err.is_decode() {
            AnalysisError::Decode {
                reason: err.to_string(),
            }
        } else {
            AnalysisError::InvalidInput(err)
        }
    }
}
