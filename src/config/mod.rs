//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `REVIEWLENS_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::adapter::LabelScheme;
use crate::analysis::AnalyzerConfig;
use crate::constants::{
    ADAPTER_RETRY_BACKOFF, BODY_LIMIT_OVERHEAD_BYTES, DEFAULT_ADAPTER_RETRIES,
    DEFAULT_MAX_IMAGE_BYTES, DEFAULT_MAX_TEXT_LEN, DEFAULT_SENTIMENT_TIMEOUT_MS,
    DEFAULT_VISION_TIMEOUT_MS,
};
use crate::review::SubmissionLimits;
use crate::scoring::FusionConfig;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `REVIEWLENS_*` overrides on top of defaults, then
/// [`Config::validate`] before building anything from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Match threshold and fusion weights.
    pub fusion: FusionConfig,

    /// Vision-language similarity endpoint. Unset: image evidence is never available.
    pub vision_url: Option<String>,

    /// Sentiment endpoint. Unset: the local lexicon scorer is used.
    pub sentiment_url: Option<String>,

    /// How the sentiment endpoint's `LABEL_n` ids map to polarity. Default: three-class.
    /// Set `binary` for two-way heads where `LABEL_1` is positive.
    pub sentiment_labels: LabelScheme,

    /// Per-attempt vision timeout. Default: 5s.
    pub vision_timeout: Duration,

    /// Per-attempt sentiment timeout. Default: 3s.
    pub sentiment_timeout: Duration,

    /// Extra attempts on adapter transport failure. Default: `0`.
    pub adapter_retries: u32,

    /// Maximum review text length in characters. Default: `5000`.
    pub max_text_len: usize,

    /// Maximum review image size in bytes. Default: 10 MiB.
    pub max_image_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            fusion: FusionConfig::default(),
            vision_url: None,
            sentiment_url: None,
            sentiment_labels: LabelScheme::default(),
            vision_timeout: Duration::from_millis(DEFAULT_VISION_TIMEOUT_MS),
            sentiment_timeout: Duration::from_millis(DEFAULT_SENTIMENT_TIMEOUT_MS),
            adapter_retries: DEFAULT_ADAPTER_RETRIES,
            max_text_len: DEFAULT_MAX_TEXT_LEN,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

impl Config {
    pub const ENV_PORT: &'static str = "REVIEWLENS_PORT";
    pub const ENV_BIND_ADDR: &'static str = "REVIEWLENS_BIND_ADDR";
    pub const ENV_MATCH_THRESHOLD: &'static str = "REVIEWLENS_MATCH_THRESHOLD";
    pub const ENV_MATCH_WEIGHT: &'static str = "REVIEWLENS_MATCH_WEIGHT";
    pub const ENV_SENTIMENT_WEIGHT: &'static str = "REVIEWLENS_SENTIMENT_WEIGHT";
    pub const ENV_VISION_URL: &'static str = "REVIEWLENS_VISION_URL";
    pub const ENV_SENTIMENT_URL: &'static str = "REVIEWLENS_SENTIMENT_URL";
    pub const ENV_SENTIMENT_LABELS: &'static str = "REVIEWLENS_SENTIMENT_LABELS";
    pub const ENV_VISION_TIMEOUT_MS: &'static str = "REVIEWLENS_VISION_TIMEOUT_MS";
    pub const ENV_SENTIMENT_TIMEOUT_MS: &'static str = "REVIEWLENS_SENTIMENT_TIMEOUT_MS";
    pub const ENV_ADAPTER_RETRIES: &'static str = "REVIEWLENS_ADAPTER_RETRIES";
    pub const ENV_MAX_TEXT_LEN: &'static str = "REVIEWLENS_MAX_TEXT_LEN";
    pub const ENV_MAX_IMAGE_BYTES: &'static str = "REVIEWLENS_MAX_IMAGE_BYTES";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// Malformed values are errors, never silently replaced by defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;

        let fusion = FusionConfig {
            match_threshold: Self::parse_number_from_env(
                Self::ENV_MATCH_THRESHOLD,
                defaults.fusion.match_threshold,
            )?,
            match_weight: Self::parse_number_from_env(
                Self::ENV_MATCH_WEIGHT,
                defaults.fusion.match_weight,
            )?,
            sentiment_weight: Self::parse_number_from_env(
                Self::ENV_SENTIMENT_WEIGHT,
                defaults.fusion.sentiment_weight,
            )?,
        };

        let vision_url = Self::parse_optional_string_from_env(Self::ENV_VISION_URL);
        let sentiment_url = Self::parse_optional_string_from_env(Self::ENV_SENTIMENT_URL);
        let sentiment_labels = Self::parse_label_scheme_from_env(defaults.sentiment_labels)?;

        let vision_timeout = Duration::from_millis(Self::parse_number_from_env(
            Self::ENV_VISION_TIMEOUT_MS,
            defaults.vision_timeout.as_millis() as u64,
        )?);
        let sentiment_timeout = Duration::from_millis(Self::parse_number_from_env(
            Self::ENV_SENTIMENT_TIMEOUT_MS,
            defaults.sentiment_timeout.as_millis() as u64,
        )?);

        let adapter_retries =
            Self::parse_number_from_env(Self::ENV_ADAPTER_RETRIES, defaults.adapter_retries)?;
        let max_text_len =
            Self::parse_number_from_env(Self::ENV_MAX_TEXT_LEN, defaults.max_text_len)?;
        let max_image_bytes =
            Self::parse_number_from_env(Self::ENV_MAX_IMAGE_BYTES, defaults.max_image_bytes)?;

        Ok(Self {
            port,
            bind_addr,
            fusion,
            vision_url,
            sentiment_url,
            sentiment_labels,
            vision_timeout,
            sentiment_timeout,
            adapter_retries,
            max_text_len,
            max_image_bytes,
        })
    }

    /// Checks fusion parameters, timeouts, limits and endpoint URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fusion.validate()?;

        if self.vision_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout {
                name: Self::ENV_VISION_TIMEOUT_MS,
            });
        }
        if self.sentiment_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout {
                name: Self::ENV_SENTIMENT_TIMEOUT_MS,
            });
        }

        if self.max_text_len == 0 {
            return Err(ConfigError::ZeroLimit {
                name: Self::ENV_MAX_TEXT_LEN,
            });
        }
        if self.max_image_bytes == 0 {
            return Err(ConfigError::ZeroLimit {
                name: Self::ENV_MAX_IMAGE_BYTES,
            });
        }

        for (name, url) in [
            (Self::ENV_VISION_URL, &self.vision_url),
            (Self::ENV_SENTIMENT_URL, &self.sentiment_url),
        ] {
            if let Some(url) = url
                && !(url.starts_with("http://") || url.starts_with("https://"))
            {
                return Err(ConfigError::InvalidEndpoint {
                    name,
                    value: url.clone(),
                });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        match self.bind_addr {
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
        }
    }

    pub fn submission_limits(&self) -> SubmissionLimits {
        SubmissionLimits {
            max_text_len: self.max_text_len,
            max_image_bytes: self.max_image_bytes,
        }
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig::default()
            .with_limits(self.submission_limits())
            .with_timeouts(self.vision_timeout, self.sentiment_timeout)
            .with_retries(self.adapter_retries, ADAPTER_RETRY_BACKOFF)
    }

    /// Request body cap: a base64-encoded maximum-size image, the text and the envelope.
    pub fn body_limit(&self) -> usize {
        self.max_image_bytes
            .div_ceil(3)
            .saturating_mul(4)
            .saturating_add(self.max_text_len.saturating_mul(4))
            .saturating_add(BODY_LIMIT_OVERHEAD_BYTES)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_label_scheme_from_env(default: LabelScheme) -> Result<LabelScheme, ConfigError> {
        match env::var(Self::ENV_SENTIMENT_LABELS) {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidLabelScheme { value }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidNumber {
                    name: var_name,
                    value: value.clone(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    }
}
