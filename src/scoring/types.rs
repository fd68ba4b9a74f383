use serde::Serialize;

use crate::constants::{
    CONFIDENCE_HIGH_MIN, CONFIDENCE_MEDIUM_MIN, CONFIDENCE_VERY_HIGH_MIN, SIMILARITY_GENERAL_MIN,
    SIMILARITY_STRONG_MIN, SIMILARITY_WEAK_MIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Which piece of evidence an explanation entry is about.
pub enum EvidenceSource {
    /// Review image vs. product reference.
    Image,
    /// Review text sentiment.
    Text,
    /// Verdict-level notes (e.g. insufficient evidence).
    System,
}

impl EvidenceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceSource::Image => "image",
            EvidenceSource::Text => "text",
            EvidenceSource::System => "system",
        }
    }
}

impl std::fmt::Display for EvidenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One human-readable reason behind a verdict.
pub struct ExplanationEntry {
    /// Evidence the entry refers to.
    pub source: EvidenceSource,
    /// Reason text.
    pub message: String,
    /// Percentage points this entry added to the confidence score.
    pub contribution: f64,
}

impl ExplanationEntry {
    pub fn new(source: EvidenceSource, message: impl Into<String>, contribution: f64) -> Self {
        Self {
            source,
            message: message.into(),
            contribution,
        }
    }

    /// Entry that records a fact without moving the score.
    pub fn note(source: EvidenceSource, message: impl Into<String>) -> Self {
        Self::new(source, message, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
/// Coarse bucket of the confidence score.
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= CONFIDENCE_VERY_HIGH_MIN => ConfidenceLevel::VeryHigh,
            s if s >= CONFIDENCE_HIGH_MIN => ConfidenceLevel::High,
            s if s >= CONFIDENCE_MEDIUM_MIN => ConfidenceLevel::Medium,
            _ => ConfidenceLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryHigh => "very_high",
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How closely the review image resembles the product, independent of the threshold.
pub enum MatchTier {
    Strong,
    General,
    Weak,
    None,
}

impl MatchTier {
    pub fn from_similarity(similarity: f64) -> Self {
        if similarity >= SIMILARITY_STRONG_MIN {
            MatchTier::Strong
        } else if similarity >= SIMILARITY_GENERAL_MIN {
            MatchTier::General
        } else if similarity >= SIMILARITY_WEAK_MIN {
            MatchTier::Weak
        } else {
            MatchTier::None
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MatchTier::Strong => "image closely matches the product",
            MatchTier::General => "image broadly matches the product",
            MatchTier::Weak => "image only weakly resembles the product",
            MatchTier::None => "image does not match the product or cannot be confirmed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Result of a single fusion call.
pub struct FusionOutcome {
    pub is_product_match: bool,
    /// Integer percentage in `[0, 100]`.
    pub confidence_score: u8,
    pub confidence_level: ConfidenceLevel,
    /// Ordered reasons; the contributions sum to the unrounded score.
    pub explanation: Vec<ExplanationEntry>,
}

impl FusionOutcome {
    /// Sum of all entry contributions before clamping and rounding.
    pub fn raw_score(&self) -> f64 {
        self.explanation.iter().map(|e| e.contribution).sum()
    }
}
