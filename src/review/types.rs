use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_IMAGE_BYTES, DEFAULT_MAX_TEXT_LEN};

use super::error::ReviewError;
use super::image::ReviewImage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// The product the reviewer claims to have bought.
pub struct ProductReference {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Text handed to the vision service: the name, followed by the description if any.
    pub fn descriptor(&self) -> String {
        match self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
        {
            Some(description) => format!("{}. {}", self.name.trim(), description),
            None => self.name.trim().to_string(),
        }
    }
}

/// One review as received from the caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSubmission {
    pub product: ProductReference,
    pub image: Option<Vec<u8>>,
    pub text: Option<String>,
}

impl ReviewSubmission {
    pub fn new(product: ProductReference) -> Self {
        Self {
            product,
            image: None,
            text: None,
        }
    }

    pub fn with_image(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.image = Some(bytes.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Checks the submission against `limits` and sniffs the image format.
    ///
    /// An empty text string counts as absent. Whitespace-only text is kept: it is present
    /// evidence, and the sentiment contract turns it into a neutral, zero-probability signal.
    pub fn validate(self, limits: &SubmissionLimits) -> Result<ValidatedSubmission, ReviewError> {
        if self.product.name.trim().is_empty() {
            return Err(ReviewError::EmptyProductReference);
        }

        let text = self.text.filter(|t| !t.is_empty());

        if self.image.is_none() && text.is_none() {
            return Err(ReviewError::MissingEvidence);
        }

        if let Some(ref text) = text {
            let len = text.chars().count();
            if len > limits.max_text_len {
                return Err(ReviewError::TextTooLong {
                    len,
                    max: limits.max_text_len,
                });
            }
        }

        let image = match self.image {
            Some(bytes) => {
                if bytes.is_empty() {
                    return Err(ReviewError::EmptyImage);
                }
                if bytes.len() > limits.max_image_bytes {
                    return Err(ReviewError::ImageTooLarge {
                        size: bytes.len(),
                        max: limits.max_image_bytes,
                    });
                }
                let image =
                    ReviewImage::from_bytes(bytes).ok_or_else(|| ReviewError::UndecodableImage {
                        reason: "unrecognised image signature".to_string(),
                    })?;
                Some(image)
            }
            None => None,
        };

        Ok(ValidatedSubmission {
            product: self.product,
            image,
            text,
        })
    }
}

/// A submission that passed validation; at least one of `image`/`text` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub product: ProductReference,
    pub image: Option<ReviewImage>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Size limits applied during validation.
pub struct SubmissionLimits {
    /// Maximum review text length in characters.
    pub max_text_len: usize,
    /// Maximum image payload in bytes.
    pub max_image_bytes: usize,
}

impl Default for SubmissionLimits {
    fn default() -> Self {
        Self {
            max_text_len: DEFAULT_MAX_TEXT_LEN,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}
