//! Review analysis orchestration.
//!
//! [`ReviewAnalyzer::analyze`] validates a [`ReviewSubmission`](crate::review::ReviewSubmission),
//! calls the image and sentiment adapters concurrently (each under its own timeout), and
//! hands whatever came back to the [`FusionEngine`](crate::scoring::FusionEngine).
//!
//! # Partial failure
//!
//! | Image adapter | Text adapter | Result |
//! |---------------|--------------|--------|
//! | ok / absent   | ok / absent  | verdict |
//! | failed        | ok           | verdict, image marked degraded |
//! | ok            | failed       | verdict, text marked degraded |
//! | failed        | failed       | [`AnalysisError::AnalysisUnavailable`] |
//! | decode error  | any          | [`AnalysisError::Decode`] |
//!
//! "Failed" includes timeouts and an unconfigured backend. If only one adapter was called
//! and it failed, that is also a total failure.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod types;


pub use config::AnalyzerConfig;
pub use error::AnalysisError;
pub use orchestrator::ReviewAnalyzer;
pub use types::ReviewVerdict;
