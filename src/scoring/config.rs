use serde::Serialize;

use crate::config::ConfigError;
use crate::constants::{
    DEFAULT_MATCH_THRESHOLD, DEFAULT_MATCH_WEIGHT, DEFAULT_SENTIMENT_WEIGHT, WEIGHT_SUM_TOLERANCE,
};

/// Tunable parameters of the confidence fusion.
///
/// Read-only once the process has started; shared by every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionConfig {
    /// Inclusive similarity threshold for a product match. Must be in (0, 1).
    pub match_threshold: f64,

    /// Weight of image similarity in the confidence score.
    pub match_weight: f64,

    /// Weight of sentiment probability in the confidence score.
    pub sentiment_weight: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            match_weight: DEFAULT_MATCH_WEIGHT,
            sentiment_weight: DEFAULT_SENTIMENT_WEIGHT,
        }
    }
}

impl FusionConfig {
    /// Builds a validated configuration.
    pub fn new(
        match_threshold: f64,
        match_weight: f64,
        sentiment_weight: f64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            match_threshold,
            match_weight,
            sentiment_weight,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.match_threshold.is_finite()
            || self.match_threshold <= 0.0
            || self.match_threshold >= 1.0
        {
            return Err(ConfigError::ThresholdOutOfRange {
                value: self.match_threshold,
            });
        }

        for (name, value) in [
            ("match weight", self.match_weight),
            ("sentiment weight", self.sentiment_weight),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::WeightOutOfRange { name, value });
            }
        }

        let sum = self.match_weight + self.sentiment_weight;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSumMismatch {
                match_weight: self.match_weight,
                sentiment_weight: self.sentiment_weight,
                sum,
            });
        }

        Ok(())
    }
}
