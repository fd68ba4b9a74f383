use serde::{Deserialize, Serialize};

use crate::adapter::AdapterMode;
use crate::review::{ProductReference, ReviewSubmission, decode_base64_image};
use crate::scoring::FusionConfig;

use super::error::GatewayError;

/// Either a bare product name or a full reference object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProductField {
    Name(String),
    Reference(ProductReference),
}

impl From<ProductField> for ProductReference {
    fn from(field: ProductField) -> Self {
        match field {
            ProductField::Name(name) => ProductReference::new(name),
            ProductField::Reference(reference) => reference,
        }
    }
}

/// JSON body of `POST /analyze_review`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub product_reference: ProductField,

    /// Base64 image, optionally as a `data:` URL.
    #[serde(default)]
    pub review_image: Option<String>,

    #[serde(default)]
    pub review_text: Option<String>,
}

impl AnalyzeRequest {
    /// Decodes the image; an empty image string counts as no image.
    pub fn into_submission(self) -> Result<ReviewSubmission, GatewayError> {
        let mut submission = ReviewSubmission::new(self.product_reference.into());

        if let Some(encoded) = self.review_image.filter(|s| !s.trim().is_empty()) {
            let bytes = decode_base64_image(&encoded)
                .map_err(|e| GatewayError::Decode(format!("invalid base64 image: {}", e)))?;
            submission = submission.with_image(bytes);
        }

        if let Some(text) = self.review_text {
            submission = submission.with_text(text);
        }

        Ok(submission)
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub vision: AdapterMode,
    pub sentiment: AdapterMode,
}

#[derive(Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub features: Vec<&'static str>,
    pub fusion: FusionConfig,
    pub vision: AdapterMode,
    pub sentiment: AdapterMode,
    pub max_text_len: usize,
    pub max_image_bytes: usize,
}
