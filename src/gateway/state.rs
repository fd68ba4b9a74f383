use std::sync::Arc;

use crate::adapter::{ImageMatcher, SentimentScorer};
use crate::analysis::ReviewAnalyzer;

/// Shared state handed to every handler.
pub struct HandlerState<M, S> {
    pub analyzer: Arc<ReviewAnalyzer<M, S>>,

    /// Upper bound on request bodies, applied through `DefaultBodyLimit`.
    pub body_limit: usize,
}

impl<M, S> Clone for HandlerState<M, S> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
            body_limit: self.body_limit,
        }
    }
}

impl<M, S> HandlerState<M, S>
where
    M: ImageMatcher + 'static,
    S: SentimentScorer + 'static,
{
    pub fn new(analyzer: ReviewAnalyzer<M, S>, body_limit: usize) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            body_limit,
        }
    }
}
