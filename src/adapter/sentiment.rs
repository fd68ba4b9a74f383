use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::AdapterError;
use super::lexicon::LexiconSentimentScorer;
use super::types::{LabelScheme, Polarity, SentimentSignal};
use super::{AdapterMode, SENTIMENT_SERVICE, SentimentScorer};

#[derive(Debug, Serialize)]
struct SentimentRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    label: String,
    score: f64,
}

/// Client for a text-sentiment classification service.
///
/// `POST {endpoint}` with `{"text": "..."}`, expecting `{"label": "...", "score": <0..1>}`.
/// Labels are normalised with [`Polarity::from_label_with`]. Generic `LABEL_n` ids are read
/// as a three-class head (`LABEL_1` neutral) unless a binary [`LabelScheme`] is set, in which
/// case `LABEL_1` is positive.
#[derive(Debug, Clone)]
pub struct HttpSentimentScorer {
    http: HttpClient,
    endpoint: String,
    labels: LabelScheme,
}

impl HttpSentimentScorer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(HttpClient::new(), endpoint)
    }

    pub fn with_client(http: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            labels: LabelScheme::default(),
        }
    }

    pub fn with_label_scheme(mut self, labels: LabelScheme) -> Self {
        self.labels = labels;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn label_scheme(&self) -> LabelScheme {
        self.labels
    }
}

impl SentimentScorer for HttpSentimentScorer {
    async fn score_text(&self, text: &str) -> Result<SentimentSignal, AdapterError> {
        debug!(
            endpoint = %self.endpoint,
            text_len = text.len(),
            "Requesting sentiment score"
        );

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&SentimentRequest { text })
            .send()
            .await
            .map_err(|e| AdapterError::ServiceUnavailable {
                service: SENTIMENT_SERVICE,
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AdapterError::ServiceUnavailable {
                service: SENTIMENT_SERVICE,
                reason: format!("HTTP {}", status),
            });
        }

        let parsed: SentimentResponse =
            resp.json()
                .await
                .map_err(|e| AdapterError::MalformedResponse {
                    service: SENTIMENT_SERVICE,
                    reason: e.to_string(),
                })?;

        let polarity = Polarity::from_label_with(&parsed.label, self.labels).ok_or_else(|| {
            AdapterError::MalformedResponse {
                service: SENTIMENT_SERVICE,
                reason: format!("unknown sentiment label '{}'", parsed.label),
            }
        })?;

        SentimentSignal::new(polarity, parsed.score).map_err(|e| {
            AdapterError::MalformedResponse {
                service: SENTIMENT_SERVICE,
                reason: e.to_string(),
            }
        })
    }

    fn mode(&self) -> AdapterMode {
        AdapterMode::Remote
    }
}

/// Sentiment scorer selected at startup from configuration.
#[derive(Debug, Clone)]
pub enum SentimentBackend {
    Remote(HttpSentimentScorer),
    Lexicon(LexiconSentimentScorer),
}

impl SentimentBackend {
    /// `Remote` when an endpoint is given, the local lexicon otherwise.
    pub fn from_endpoint(endpoint: Option<&str>) -> Self {
        match endpoint {
            Some(url) => SentimentBackend::Remote(HttpSentimentScorer::new(url)),
            None => SentimentBackend::Lexicon(LexiconSentimentScorer::new()),
        }
    }

    /// Sets how a remote head's `LABEL_n` ids are read; no effect on the lexicon.
    pub fn with_label_scheme(self, labels: LabelScheme) -> Self {
        match self {
            SentimentBackend::Remote(client) => {
                SentimentBackend::Remote(client.with_label_scheme(labels))
            }
            lexicon => lexicon,
        }
    }
}

impl SentimentScorer for SentimentBackend {
    async fn score_text(&self, text: &str) -> Result<SentimentSignal, AdapterError> {
        match self {
            SentimentBackend::Remote(client) => client.score_text(text).await,
            SentimentBackend::Lexicon(lexicon) => lexicon.score_text(text).await,
        }
    }

    fn mode(&self) -> AdapterMode {
        match self {
            SentimentBackend::Remote(_) => AdapterMode::Remote,
            SentimentBackend::Lexicon(_) => AdapterMode::Lexicon,
        }
    }
}
