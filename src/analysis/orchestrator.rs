use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::adapter::{
    AdapterError, AdapterMode, ImageMatcher, MatchSignal, SENTIMENT_SERVICE, SentimentScorer,
    SentimentSignal, VISION_SERVICE,
};
use crate::constants::AUDIT_TARGET;
use crate::review::ReviewSubmission;
use crate::scoring::{EvidenceSource, ExplanationEntry, FusionEngine};

use super::config::AnalyzerConfig;
use super::error::AnalysisError;
use super::types::ReviewVerdict;

/// Entry point of the engine: validate, fan out to both adapters, fuse, explain.
///
/// Adapters are injected so tests can substitute doubles. The analyzer holds no mutable
/// state; share it behind an `Arc` across requests.
pub struct ReviewAnalyzer<M, S> {
    matcher: M,
    scorer: S,
    engine: FusionEngine,
    config: AnalyzerConfig,
}

impl<M, S> std::fmt::Debug for ReviewAnalyzer<M, S>
where
    M: ImageMatcher,
    S: SentimentScorer,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewAnalyzer")
            .field("matcher", &self.matcher.mode())
            .field("scorer", &self.scorer.mode())
            .field("engine", &self.engine)
            .field("config", &self.config)
            .finish()
    }
}

impl<M, S> ReviewAnalyzer<M, S>
where
    M: ImageMatcher,
    S: SentimentScorer,
{
    pub fn new(matcher: M, scorer: S, engine: FusionEngine, config: AnalyzerConfig) -> Self {
        Self {
            matcher,
            scorer,
            engine,
            config,
        }
    }

    pub fn engine(&self) -> &FusionEngine {
        &self.engine
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn matcher_mode(&self) -> AdapterMode {
        self.matcher.mode()
    }

    pub fn scorer_mode(&self) -> AdapterMode {
        self.scorer.mode()
    }

    /// Analyzes one submission under a fresh request id.
    pub async fn analyze(
        &self,
        submission: ReviewSubmission,
    ) -> Result<ReviewVerdict, AnalysisError> {
        self.analyze_with_id(Uuid::new_v4(), submission).await
    }

    /// Analyzes one submission; `request_id` only tags the audit log.
    ///
    /// Dropping the returned future cancels both in-flight adapter calls.
    #[instrument(skip_all, fields(request_id = %request_id))]
    pub async fn analyze_with_id(
        &self,
        request_id: Uuid,
        submission: ReviewSubmission,
    ) -> Result<ReviewVerdict, AnalysisError> {
        let started = Instant::now();

        let submission = submission.validate(&self.config.limits).map_err(|e| {
            let err = AnalysisError::from(e);
            warn!(target: AUDIT_TARGET, %request_id, error = %err, "Review rejected");
            err
        })?;

        debug!(
            has_image = submission.image.is_some(),
            has_text = submission.text.is_some(),
            "Submission validated"
        );

        let product = &submission.product;
        let image_call = async {
            match &submission.image {
                Some(image) => Some(
                    self.call_with_policy(VISION_SERVICE, self.config.vision_timeout, || {
                        self.matcher.match_product(product, image)
                    })
                    .await,
                ),
                None => None,
            }
        };
        let text_call = async {
            match &submission.text {
                Some(text) => Some(
                    self.call_with_policy(SENTIMENT_SERVICE, self.config.sentiment_timeout, || {
                        self.scorer.score_sentiment(text)
                    })
                    .await,
                ),
                None => None,
            }
        };

        let (image_result, text_result) = tokio::join!(image_call, text_call);

        let attempted = usize::from(image_result.is_some()) + usize::from(text_result.is_some());
        let mut failures: Vec<AdapterError> = Vec::new();
        let mut notes: Vec<ExplanationEntry> = Vec::new();

        let image_signal: Option<MatchSignal> = match image_result {
            Some(Ok(signal)) => Some(signal),
            Some(Err(err)) if err.is_decode() => {
                let err = AnalysisError::Decode {
                    reason: err.to_string(),
                };
                warn!(target: AUDIT_TARGET, %request_id, error = %err, "Review rejected");
                return Err(err);
            }
            Some(Err(err)) => {
                warn!(error = %err, "Image adapter failed; continuing without image evidence");
                notes.push(ExplanationEntry::note(
                    EvidenceSource::Image,
                    format!("image evidence unavailable: {}", err),
                ));
                failures.push(err);
                None
            }
            None => None,
        };

        let text_signal: Option<SentimentSignal> = match text_result {
            Some(Ok(signal)) => Some(signal),
            Some(Err(err)) => {
                warn!(error = %err, "Sentiment adapter failed; continuing without text evidence");
                notes.push(ExplanationEntry::note(
                    EvidenceSource::Text,
                    format!("text evidence unavailable: {}", err),
                ));
                failures.push(err);
                None
            }
            None => None,
        };

        if attempted > 0 && failures.len() == attempted {
            let err = AnalysisError::AnalysisUnavailable { failures };
            warn!(target: AUDIT_TARGET, %request_id, error = %err, "Review analysis unavailable");
            return Err(err);
        }

        let outcome = self.engine.fuse(image_signal.as_ref(), text_signal.as_ref());
        let verdict = ReviewVerdict::from_outcome(
            outcome,
            image_signal.map(|s| s.similarity()),
            text_signal,
            notes,
        );

        let image_fingerprint = submission
            .image
            .as_ref()
            .map(|image| image.fingerprint())
            .unwrap_or_default();

        info!(
            target: AUDIT_TARGET,
            %request_id,
            product = %product.name,
            image_fingerprint = %image_fingerprint,
            text_chars = submission.text.as_ref().map_or(0, |t| t.chars().count()),
            is_product_match = verdict.is_product_match,
            confidence_score = verdict.confidence_score,
            polarity = verdict.sentiment.map_or("none", |s| s.polarity().as_str()),
            degraded = verdict.degraded.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Review analyzed"
        );

        Ok(verdict)
    }

    /// Runs one adapter call under its timeout, retrying transport failures.
    async fn call_with_policy<T, F, Fut>(
        &self,
        service: &'static str,
        timeout: Duration,
        mut call: F,
    ) -> Result<T, AdapterError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AdapterError>>,
    {
        let mut attempt = 0u32;
        loop {
            attempt += 1;

            let result = match tokio::time::timeout(timeout, call()).await {
                Ok(result) => result,
                Err(_) => Err(AdapterError::Timeout { service, timeout }),
            };

            match result {
                Err(err) if err.is_retryable() && attempt <= self.config.retries => {
                    debug!(
                        service,
                        attempt,
                        error = %err,
                        "Adapter call failed, retrying"
                    );
                    tokio::time::sleep(self.config.retry_backoff).await;
                }
                other => return other,
            }
        }
    }
}
