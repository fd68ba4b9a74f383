//! Typed contracts around the external scoring services.
//!
//! - [`ImageMatcher`]: review image + product reference -> [`MatchSignal`]
//! - [`SentimentScorer`]: review text -> [`SentimentSignal`]
//!
//! Implementations never retry and never apply timeouts themselves; the
//! [`ReviewAnalyzer`](crate::analysis::ReviewAnalyzer) owns both policies so that test
//! doubles are subject to the same rules as the HTTP clients.

pub mod error;
pub mod lexicon;
pub mod sentiment;
pub mod types;
pub mod vision;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::AdapterError;
pub use lexicon::LexiconSentimentScorer;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockImageMatcher, MockSentimentScorer};
pub use sentiment::{HttpSentimentScorer, SentimentBackend};
pub use types::{LabelScheme, MatchSignal, Polarity, SentimentSignal};
pub use vision::{HttpImageMatcher, VisionBackend};

use serde::Serialize;
use std::future::Future;

use crate::review::{ProductReference, ReviewImage};

pub const VISION_SERVICE: &str = "vision";
pub const SENTIMENT_SERVICE: &str = "sentiment";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// How an adapter produces its signal.
pub enum AdapterMode {
    /// Calls a remote scoring service.
    Remote,
    /// Local keyword heuristics.
    Lexicon,
    /// No backend; every call fails with [`AdapterError::NotConfigured`].
    Unconfigured,
    /// Scripted test double.
    Mock,
}

impl AdapterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterMode::Remote => "remote",
            AdapterMode::Lexicon => "lexicon",
            AdapterMode::Unconfigured => "unconfigured",
            AdapterMode::Mock => "mock",
        }
    }

    /// `false` only when calls are guaranteed to fail.
    pub fn is_usable(&self) -> bool {
        !matches!(self, AdapterMode::Unconfigured)
    }
}

/// Scores how well a review image depicts the claimed product.
pub trait ImageMatcher: Send + Sync {
    fn match_product(
        &self,
        product: &ProductReference,
        image: &ReviewImage,
    ) -> impl Future<Output = Result<MatchSignal, AdapterError>> + Send;

    fn mode(&self) -> AdapterMode;
}

/// Scores the sentiment of review text.
pub trait SentimentScorer: Send + Sync {
    /// Scores text known to contain something other than whitespace.
    fn score_text(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<SentimentSignal, AdapterError>> + Send;

    fn mode(&self) -> AdapterMode;

    /// Contract entry point: blank text yields neutral/0 without reaching the backend.
    fn score_sentiment(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<SentimentSignal, AdapterError>> + Send {
        async move {
            if text.trim().is_empty() {
                return Ok(SentimentSignal::empty_text());
            }
            self.score_text(text).await
        }
    }
}
