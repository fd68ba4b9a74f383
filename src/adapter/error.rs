use std::time::Duration;
use thiserror::Error;

/// Failures at an adapter boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdapterError {
    #[error("{service} service unavailable: {reason}")]
    ServiceUnavailable {
        service: &'static str,
        reason: String,
    },

    #[error("{service} service timed out after {timeout:?}")]
    Timeout {
        service: &'static str,
        timeout: Duration,
    },

    #[error("{service} service could not decode the image: {reason}")]
    Decode {
        service: &'static str,
        reason: String,
    },

    #[error("malformed response from {service} service: {reason}")]
    MalformedResponse {
        service: &'static str,
        reason: String,
    },

    #[error("{field} must be a finite value in [0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("{service} service is not configured")]
    NotConfigured { service: &'static str },
}

impl AdapterError {
    /// Transport-level failures that may succeed on another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AdapterError::ServiceUnavailable { .. } | AdapterError::Timeout { .. }
        )
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, AdapterError::Decode { .. })
    }
}
