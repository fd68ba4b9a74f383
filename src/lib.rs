//! ReviewLens library crate (used by the server and integration tests).
//!
//! Judges whether a product review is consistent: does the review photo show the product
//! it claims to, and how strongly does the text express an opinion? The answer is a
//! [`ReviewVerdict`] carrying a match decision, a 0-100 confidence score and an ordered
//! explanation.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`ReviewSubmission`], [`ProductReference`] - Input
//! - [`ReviewAnalyzer`], [`ReviewVerdict`], [`AnalysisError`] - Orchestration
//!
//! ## Adapters
//! - [`ImageMatcher`], [`SentimentScorer`] - Typed contracts around the scoring services
//! - [`VisionBackend`], [`SentimentBackend`] - Startup-selected implementations
//!
//! ## Scoring
//! - [`FusionEngine`], [`FusionConfig`] - Deterministic confidence fusion
//!
//! ## Test/Mock Support
//! Mock adapters are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod adapter;
pub mod analysis;
pub mod config;
pub mod constants;
pub mod gateway;
pub mod review;
pub mod scoring;

pub use adapter::{
    AdapterError, AdapterMode, HttpImageMatcher, HttpSentimentScorer, ImageMatcher, LabelScheme,
    LexiconSentimentScorer, MatchSignal, Polarity, SentimentBackend, SentimentScorer,
    SentimentSignal, VisionBackend,
};
#[cfg(any(test, feature = "mock"))]
pub use adapter::{MockImageMatcher, MockSentimentScorer};
pub use analysis::{AnalysisError, AnalyzerConfig, ReviewAnalyzer, ReviewVerdict};
pub use config::{Config, ConfigError};
pub use review::{ImageFormat, ProductReference, ReviewError, ReviewImage, ReviewSubmission};
pub use scoring::{
    ConfidenceLevel, EvidenceSource, ExplanationEntry, FusionConfig, FusionEngine, FusionOutcome,
};
