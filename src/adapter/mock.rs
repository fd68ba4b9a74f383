//! Scripted adapter doubles for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::review::{ProductReference, ReviewImage};

use super::error::AdapterError;
use super::types::{MatchSignal, Polarity, SentimentSignal};
use super::{AdapterMode, ImageMatcher, SENTIMENT_SERVICE, SentimentScorer, VISION_SERVICE};

#[derive(Debug)]
struct Script<T> {
    queued: Mutex<VecDeque<Result<T, AdapterError>>>,
    fallback: Result<T, AdapterError>,
    delay: Duration,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    fn new(fallback: Result<T, AdapterError>) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    async fn next(&self) -> Result<T, AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let queued = self
            .queued
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front());
        queued.unwrap_or_else(|| self.fallback.clone())
    }
}

/// Image matcher returning scripted results.
///
/// Queued results (see [`then`](Self::then)) are consumed first, then the fallback repeats.
#[derive(Debug, Clone)]
pub struct MockImageMatcher {
    script: Arc<Script<MatchSignal>>,
}

impl MockImageMatcher {
    /// Always returns `similarity`.
    ///
    /// # Panics
    /// If `similarity` is outside `[0, 1]`.
    pub fn returning(similarity: f64) -> Self {
        let signal = MatchSignal::new(similarity).expect("mock similarity must be in [0, 1]");
        Self {
            script: Arc::new(Script::new(Ok(signal))),
        }
    }

    /// Always fails with `error`.
    pub fn failing(error: AdapterError) -> Self {
        Self {
            script: Arc::new(Script::new(Err(error))),
        }
    }

    /// Always fails as an unreachable service.
    pub fn unavailable() -> Self {
        Self::failing(AdapterError::ServiceUnavailable {
            service: VISION_SERVICE,
            reason: "connection refused".to_string(),
        })
    }

    /// Queues a one-off result ahead of the fallback.
    pub fn then(self, result: Result<MatchSignal, AdapterError>) -> Self {
        if let Ok(mut queue) = self.script.queued.lock() {
            queue.push_back(result);
        }
        self
    }

    /// Sleeps for `delay` before answering.
    ///
    /// # Panics
    ///
    /// If the mock has already been cloned, since clones share one script.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        let Some(script) = Arc::get_mut(&mut self.script) else {
            panic!("with_delay must be called before the mock is cloned");
        };
        script.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.script.calls.load(Ordering::SeqCst)
    }
}

impl ImageMatcher for MockImageMatcher {
    async fn match_product(
        &self,
        _product: &ProductReference,
        _image: &ReviewImage,
    ) -> Result<MatchSignal, AdapterError> {
        self.script.next().await
    }

    fn mode(&self) -> AdapterMode {
        AdapterMode::Mock
    }
}

/// Sentiment scorer returning scripted results.
#[derive(Debug, Clone)]
pub struct MockSentimentScorer {
    script: Arc<Script<SentimentSignal>>,
}

impl MockSentimentScorer {
    /// Always returns `polarity` with `probability`.
    ///
    /// # Panics
    /// If `probability` is outside `[0, 1]`.
    pub fn returning(polarity: Polarity, probability: f64) -> Self {
        let signal =
            SentimentSignal::new(polarity, probability).expect("mock probability must be in [0, 1]");
        Self {
            script: Arc::new(Script::new(Ok(signal))),
        }
    }

    pub fn failing(error: AdapterError) -> Self {
        Self {
            script: Arc::new(Script::new(Err(error))),
        }
    }

    pub fn unavailable() -> Self {
        Self::failing(AdapterError::ServiceUnavailable {
            service: SENTIMENT_SERVICE,
            reason: "connection refused".to_string(),
        })
    }

    pub fn then(self, result: Result<SentimentSignal, AdapterError>) -> Self {
        if let Ok(mut queue) = self.script.queued.lock() {
            queue.push_back(result);
        }
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        let Some(script) = Arc::get_mut(&mut self.script) else {
            panic!("with_delay must be called before the mock is cloned");
        };
        script.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.script.calls.load(Ordering::SeqCst)
    }
}

impl SentimentScorer for MockSentimentScorer {
    async fn score_text(&self, _text: &str) -> Result<SentimentSignal, AdapterError> {
        self.script.next().await
    }

    fn mode(&self) -> AdapterMode {
        AdapterMode::Mock
    }
}
