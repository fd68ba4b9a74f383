use serde::Serialize;

use crate::adapter::SentimentSignal;
use crate::constants::SIMILARITY_WEAK_MIN;
use crate::scoring::{ConfidenceLevel, EvidenceSource, ExplanationEntry, FusionOutcome};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Final, explainable judgment on one review.
///
/// Contains nothing request-specific (ids, timestamps) so identical inputs and identical
/// adapter answers always produce equal verdicts.
pub struct ReviewVerdict {
    pub is_product_match: bool,

    /// Integer percentage in `[0, 100]`.
    pub confidence_score: u8,

    pub confidence_level: ConfidenceLevel,

    /// Image similarity, `None` when no image signal was available.
    pub similarity: Option<f64>,

    /// Sentiment of the review text, `None` when no text signal was available.
    pub sentiment: Option<SentimentSignal>,

    /// Ordered reasons behind the score, including adapter failures.
    pub explanation: Vec<ExplanationEntry>,

    /// One-line summary for moderators.
    pub assessment: String,

    /// Evidence whose adapter failed during this analysis.
    pub degraded: Vec<EvidenceSource>,
}

impl ReviewVerdict {
    /// Assembles the verdict from a fusion outcome plus adapter-failure notes.
    pub fn from_outcome(
        outcome: FusionOutcome,
        similarity: Option<f64>,
        sentiment: Option<SentimentSignal>,
        failures: Vec<ExplanationEntry>,
    ) -> Self {
        let degraded = failures.iter().map(|entry| entry.source).collect();
        let assessment = assess(
            similarity,
            outcome.is_product_match,
            outcome.confidence_score,
            outcome.confidence_level,
            sentiment.as_ref(),
        );

        let mut explanation = outcome.explanation;
        explanation.extend(failures);

        Self {
            is_product_match: outcome.is_product_match,
            confidence_score: outcome.confidence_score,
            confidence_level: outcome.confidence_level,
            similarity,
            sentiment,
            explanation,
            assessment,
            degraded,
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

fn assess(
    similarity: Option<f64>,
    is_product_match: bool,
    confidence_score: u8,
    confidence_level: ConfidenceLevel,
    sentiment: Option<&SentimentSignal>,
) -> String {
    let headline = match similarity {
        None if sentiment.is_some() => "no image evidence; verdict rests on the review text only",
        None => "insufficient evidence to assess this review",
        Some(s) if s < SIMILARITY_WEAK_MIN => {
            "image does not match the product; review needs manual verification"
        }
        Some(_) if is_product_match => "image matches the product",
        Some(_) => "image partially resembles the product",
    };

    let mut summary = format!(
        "{} | confidence {}% ({})",
        headline, confidence_score, confidence_level
    );
    if let Some(signal) = sentiment {
        summary.push_str(&format!(" | {} review", signal.polarity()));
    }
    summary
}
