//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
///
/// Every variant is fatal: the server refuses to start rather than score reviews with
/// a configuration it cannot vouch for.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A numeric environment variable could not be parsed.
    #[error("failed to parse {name}='{value}': {reason}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Sentiment label scheme is neither `three_class` nor `binary`.
    #[error("invalid sentiment label scheme '{value}': expected 'three_class' or 'binary'")]
    InvalidLabelScheme { value: String },

    /// Match threshold must lie strictly between 0 and 1.
    #[error("match threshold must be in (0, 1), got {value}")]
    ThresholdOutOfRange { value: f64 },

    /// A fusion weight is negative, above 1, or not finite.
    #[error("{name} must be in [0, 1], got {value}")]
    WeightOutOfRange { name: &'static str, value: f64 },

    /// Fusion weights do not sum to 1.0.
    #[error(
        "match weight ({match_weight}) + sentiment weight ({sentiment_weight}) must equal 1.0, got {sum}"
    )]
    WeightSumMismatch {
        match_weight: f64,
        sentiment_weight: f64,
        sum: f64,
    },

    /// An adapter timeout was configured as zero.
    #[error("{name} must be greater than zero")]
    ZeroTimeout { name: &'static str },

    /// A submission size limit was configured as zero.
    #[error("{name} must be greater than zero")]
    ZeroLimit { name: &'static str },

    /// An adapter endpoint is not an absolute http(s) URL.
    #[error("{name} must be an http:// or https:// URL, got '{value}'")]
    InvalidEndpoint { name: &'static str, value: String },
}
