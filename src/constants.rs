//! Cross-cutting, shared constants.
//!
//! Defaults here seed [`Config`](crate::config::Config) and
//! [`FusionConfig`](crate::scoring::FusionConfig). Anything operators may want to tune is
//! overridable through `REVIEWLENS_*` environment variables.

use std::time::Duration;

/// Similarity at or above which the review image counts as the claimed product.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.70;

/// Share of the confidence score contributed by image similarity.
pub const DEFAULT_MATCH_WEIGHT: f64 = 0.60;

/// Share of the confidence score contributed by sentiment probability.
pub const DEFAULT_SENTIMENT_WEIGHT: f64 = 0.40;

/// Allowed drift when checking that the two weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

pub const DEFAULT_VISION_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_SENTIMENT_TIMEOUT_MS: u64 = 3_000;

/// How long `--health-check` waits for `/health` before reporting failure.
pub const LIVENESS_CHECK_TIMEOUT: Duration = Duration::from_secs(1);

pub const DEFAULT_ADAPTER_RETRIES: u32 = 0;
pub const ADAPTER_RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Maximum review text length, counted in characters (not bytes).
pub const DEFAULT_MAX_TEXT_LEN: usize = 5_000;

pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Extra room on top of the image limit for base64 inflation and the JSON envelope.
pub const BODY_LIMIT_OVERHEAD_BYTES: usize = 64 * 1024;

/// Response header carrying a short machine-readable status.
pub const REVIEWLENS_STATUS_HEADER: &str = "x-reviewlens-status";
pub const REVIEWLENS_STATUS_HEALTHY: &str = "healthy";
pub const REVIEWLENS_STATUS_READY: &str = "ready";
pub const REVIEWLENS_STATUS_ANALYZED: &str = "analyzed";
pub const REVIEWLENS_STATUS_DEGRADED: &str = "degraded";

/// Tracing target used for per-request moderation audit events.
pub const AUDIT_TARGET: &str = "reviewlens::audit";

/// Score tiers (percentage points) for [`ConfidenceLevel`](crate::scoring::ConfidenceLevel).
pub const CONFIDENCE_VERY_HIGH_MIN: u8 = 80;
pub const CONFIDENCE_HIGH_MIN: u8 = 60;
pub const CONFIDENCE_MEDIUM_MIN: u8 = 40;

/// Similarity tiers used to describe how well the image matches.
pub const SIMILARITY_STRONG_MIN: f64 = 0.8;
pub const SIMILARITY_GENERAL_MIN: f64 = 0.6;
pub const SIMILARITY_WEAK_MIN: f64 = 0.4;
