//! Keyword sentiment scorer used when no sentiment service is configured.
//!
//! Cues are matched as token prefixes so inflected forms count (`loved`, `만족스러운`).
//! Negation is not handled.

use tracing::debug;

use super::error::AdapterError;
use super::types::{Polarity, SentimentSignal};
use super::{AdapterMode, SentimentScorer};

const POSITIVE_CUES: &[&str] = &[
    "good", "great", "excellent", "love", "amazing", "wonderful", "happy", "fantastic", "awesome",
    "best", "perfect", "satisf", "recommend", "nice", "comfortable", "beautiful", "만족", "좋",
    "최고", "추천", "훌륭", "예쁘", "편하", "편안", "마음에",
];

const NEGATIVE_CUES: &[&str] = &[
    "bad", "terrible", "awful", "hate", "horrible", "worst", "sad", "angry", "disappoint", "poor",
    "broken", "defect", "refund", "scratch", "실망", "최악", "별로", "불만", "흠집", "고장", "환불",
    "느리", "늦", "불편",
];

#[derive(Debug, Clone, Default)]
pub struct LexiconSentimentScorer;

impl LexiconSentimentScorer {
    pub fn new() -> Self {
        Self
    }

    /// Returns `(positive_hits, negative_hits)`.
    pub fn count_cues(&self, text: &str) -> (usize, usize) {
        let lower = text.to_lowercase();
        let mut positive = 0;
        let mut negative = 0;

        for token in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            if POSITIVE_CUES.iter().any(|cue| token.starts_with(cue)) {
                positive += 1;
            }
            if NEGATIVE_CUES.iter().any(|cue| token.starts_with(cue)) {
                negative += 1;
            }
        }

        (positive, negative)
    }

    /// Majority polarity with Laplace-smoothed probability `(winner + 1) / (total + 2)`.
    pub fn classify(&self, text: &str) -> SentimentSignal {
        let (positive, negative) = self.count_cues(text);
        let total = positive + negative;

        let (polarity, probability) = if total == 0 {
            (Polarity::Neutral, 0.0)
        } else if positive == negative {
            (Polarity::Neutral, 0.5)
        } else {
            let (polarity, winner) = if positive > negative {
                (Polarity::Positive, positive)
            } else {
                (Polarity::Negative, negative)
            };
            (polarity, (winner + 1) as f64 / (total + 2) as f64)
        };

        debug!(positive, negative, %polarity, probability, "Lexicon sentiment");

        // Both branches above stay inside [0, 1].
        SentimentSignal::new(polarity, probability).unwrap_or_else(|_| SentimentSignal::empty_text())
    }
}

impl SentimentScorer for LexiconSentimentScorer {
    async fn score_text(&self, text: &str) -> Result<SentimentSignal, AdapterError> {
        Ok(self.classify(text))
    }

    fn mode(&self) -> AdapterMode {
        AdapterMode::Lexicon
    }
}
