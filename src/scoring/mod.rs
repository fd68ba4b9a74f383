//! Confidence fusion.
//!
//! Given the (possibly absent) image and text signals of one review, produce:
//!
//! - `is_product_match`: image similarity against the inclusive match threshold
//! - `confidence_score`: `round(clamp(similarity * w_match + probability * w_sentiment))`
//!   expressed in percentage points
//! - an ordered explanation whose contributions add up to the unrounded score
//!
//! A missing signal contributes nothing and is recorded as such. When both are missing
//! the outcome is "insufficient evidence" with a zero score; that is a valid verdict,
//! not an error.

pub mod config;
pub mod fusion;
pub mod types;


pub use config::FusionConfig;
pub use fusion::FusionEngine;
pub use types::{ConfidenceLevel, EvidenceSource, ExplanationEntry, FusionOutcome, MatchTier};
