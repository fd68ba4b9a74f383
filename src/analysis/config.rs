use std::time::Duration;

use crate::constants::{
    ADAPTER_RETRY_BACKOFF, DEFAULT_ADAPTER_RETRIES, DEFAULT_SENTIMENT_TIMEOUT_MS,
    DEFAULT_VISION_TIMEOUT_MS,
};
use crate::review::SubmissionLimits;

/// Per-request policy applied by the [`ReviewAnalyzer`](super::ReviewAnalyzer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub limits: SubmissionLimits,

    /// Budget for one vision adapter attempt.
    pub vision_timeout: Duration,

    /// Budget for one sentiment adapter attempt.
    pub sentiment_timeout: Duration,

    /// Extra attempts after a transport failure or timeout. `0` disables retries.
    pub retries: u32,

    pub retry_backoff: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            limits: SubmissionLimits::default(),
            vision_timeout: Duration::from_millis(DEFAULT_VISION_TIMEOUT_MS),
            sentiment_timeout: Duration::from_millis(DEFAULT_SENTIMENT_TIMEOUT_MS),
            retries: DEFAULT_ADAPTER_RETRIES,
            retry_backoff: ADAPTER_RETRY_BACKOFF,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_limits(mut self, limits: SubmissionLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_timeouts(mut self, vision: Duration, sentiment: Duration) -> Self {
        self.vision_timeout = vision;
        self.sentiment_timeout = sentiment;
        self
    }

    pub fn with_retries(mut self, retries: u32, backoff: Duration) -> Self {
        self.retries = retries;
        self.retry_backoff = backoff;
        self
    }
}
