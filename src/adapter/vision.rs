use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::review::{ProductReference, ReviewImage};

use super::error::AdapterError;
use super::types::MatchSignal;
use super::{AdapterMode, ImageMatcher, VISION_SERVICE};

#[derive(Debug, Serialize)]
struct SimilarityRequest<'a> {
    image: String,
    format: &'a str,
    product: String,
}

#[derive(Debug, Deserialize)]
struct SimilarityResponse {
    similarity: f64,
}

/// Client for a vision-language similarity service.
///
/// `POST {endpoint}` with `{"image": <base64>, "format": "png", "product": "<descriptor>"}`,
/// expecting `{"similarity": <0..1>}` back. A `422` means the service could not read the image.
#[derive(Debug, Clone)]
pub struct HttpImageMatcher {
    http: HttpClient,
    endpoint: String,
}

impl HttpImageMatcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(HttpClient::new(), endpoint)
    }

    pub fn with_client(http: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ImageMatcher for HttpImageMatcher {
    async fn match_product(
        &self,
        product: &ProductReference,
        image: &ReviewImage,
    ) -> Result<MatchSignal, AdapterError> {
        let body = SimilarityRequest {
            image: image.to_base64(),
            format: image.format().as_str(),
            product: product.descriptor(),
        };

        debug!(
            endpoint = %self.endpoint,
            image_bytes = image.len(),
            "Requesting image similarity"
        );

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdapterError::ServiceUnavailable {
                service: VISION_SERVICE,
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let reason = resp.text().await.unwrap_or_default();
            return Err(AdapterError::Decode {
                service: VISION_SERVICE,
                reason: if reason.is_empty() {
                    status.to_string()
                } else {
                    reason
                },
            });
        }
        if !status.is_success() {
            return Err(AdapterError::ServiceUnavailable {
                service: VISION_SERVICE,
                reason: format!("HTTP {}", status),
            });
        }

        let parsed: SimilarityResponse =
            resp.json()
                .await
                .map_err(|e| AdapterError::MalformedResponse {
                    service: VISION_SERVICE,
                    reason: e.to_string(),
                })?;

        MatchSignal::new(parsed.similarity).map_err(|e| AdapterError::MalformedResponse {
            service: VISION_SERVICE,
            reason: e.to_string(),
        })
    }

    fn mode(&self) -> AdapterMode {
        AdapterMode::Remote
    }
}

/// Image matcher selected at startup from configuration.
#[derive(Debug, Clone)]
pub enum VisionBackend {
    Remote(HttpImageMatcher),
    Unconfigured,
}

impl VisionBackend {
    /// `Remote` when an endpoint is given, `Unconfigured` otherwise.
    pub fn from_endpoint(endpoint: Option<&str>) -> Self {
        match endpoint {
            Some(url) => VisionBackend::Remote(HttpImageMatcher::new(url)),
            None => VisionBackend::Unconfigured,
        }
    }
}

impl ImageMatcher for VisionBackend {
    async fn match_product(
        &self,
        product: &ProductReference,
        image: &ReviewImage,
    ) -> Result<MatchSignal, AdapterError> {
        match self {
            VisionBackend::Remote(client) => client.match_product(product, image).await,
            VisionBackend::Unconfigured => Err(AdapterError::NotConfigured {
                service: VISION_SERVICE,
            }),
        }
    }

    fn mode(&self) -> AdapterMode {
        match self {
            VisionBackend::Remote(_) => AdapterMode::Remote,
            VisionBackend::Unconfigured => AdapterMode::Unconfigured,
        }
    }
}
