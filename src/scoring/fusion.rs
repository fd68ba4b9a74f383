use tracing::debug;

use crate::adapter::{MatchSignal, SentimentSignal};
use crate::config::ConfigError;

use super::config::FusionConfig;
use super::types::{ConfidenceLevel, EvidenceSource, ExplanationEntry, FusionOutcome, MatchTier};

/// Turns adapter signals into a match verdict, a confidence percentage and the reasons
/// behind both.
///
/// `fuse` is a pure function of its inputs and the configuration: no I/O, no shared state.
#[derive(Debug, Clone)]
pub struct FusionEngine {
    config: FusionConfig,
}

impl Default for FusionEngine {
    fn default() -> Self {
        Self {
            config: FusionConfig::default(),
        }
    }
}

impl FusionEngine {
    pub fn new(config: FusionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    pub fn threshold(&self) -> f64 {
        self.config.match_threshold
    }

    /// Returns `true` if `similarity` meets the (inclusive) match threshold.
    pub fn is_match(&self, similarity: f64) -> bool {
        similarity >= self.config.match_threshold
    }

    pub fn fuse(
        &self,
        image: Option<&MatchSignal>,
        text: Option<&SentimentSignal>,
    ) -> FusionOutcome {
        if image.is_none() && text.is_none() {
            debug!("No signals to fuse");
            return FusionOutcome {
                is_product_match: false,
                confidence_score: 0,
                confidence_level: ConfidenceLevel::Low,
                explanation: vec![ExplanationEntry::note(
                    EvidenceSource::System,
                    "insufficient evidence: neither an image nor a text signal was available",
                )],
            };
        }

        let mut explanation = Vec::with_capacity(2);

        let is_product_match = match image {
            Some(signal) => {
                let entry = self.image_entry(signal);
                explanation.push(entry);
                self.is_match(signal.similarity())
            }
            None => {
                explanation.push(ExplanationEntry::note(
                    EvidenceSource::Image,
                    "no image evidence available; product match cannot be confirmed",
                ));
                false
            }
        };

        match text {
            Some(signal) => explanation.push(self.text_entry(signal)),
            None => explanation.push(ExplanationEntry::note(
                EvidenceSource::Text,
                "no text evidence available",
            )),
        }

        let raw: f64 = explanation.iter().map(|e| e.contribution).sum();
        let confidence_score = raw.clamp(0.0, 100.0).round() as u8;

        debug!(
            raw_score = raw,
            confidence_score,
            is_product_match,
            "Fused review signals"
        );

        FusionOutcome {
            is_product_match,
            confidence_score,
            confidence_level: ConfidenceLevel::from_score(confidence_score),
            explanation,
        }
    }

    fn image_entry(&self, signal: &MatchSignal) -> ExplanationEntry {
        let similarity = signal.similarity();
        let outcome = if self.is_match(similarity) {
            "meets"
        } else {
            "is below"
        };
        let contribution = similarity * self.config.match_weight * 100.0;

        ExplanationEntry::new(
            EvidenceSource::Image,
            format!(
                "image similarity {:.2} {} match threshold {:.2}; {}",
                similarity,
                outcome,
                self.config.match_threshold,
                MatchTier::from_similarity(similarity).description()
            ),
            contribution,
        )
    }

    fn text_entry(&self, signal: &SentimentSignal) -> ExplanationEntry {
        let contribution = signal.probability() * self.config.sentiment_weight * 100.0;

        ExplanationEntry::new(
            EvidenceSource::Text,
            format!(
                "review sentiment is {} with probability {:.2}",
                signal.polarity(),
                signal.probability()
            ),
            contribution,
        )
    }
}
