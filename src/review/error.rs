use thiserror::Error;

/// Reasons a submission is rejected before any adapter is called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("submission must include a review image or review text")]
    MissingEvidence,

    #[error("product reference must include a product name")]
    EmptyProductReference,

    #[error("review text is {len} characters, maximum is {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("review image is {size} bytes, maximum is {max}")]
    ImageTooLarge { size: usize, max: usize },

    #[error("review image payload is empty")]
    EmptyImage,

    #[error("review image could not be decoded: {reason}")]
    UndecodableImage { reason: String },
}

impl ReviewError {
    /// `true` for payloads that are present but unreadable, as opposed to missing or oversized.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            ReviewError::EmptyImage | ReviewError::UndecodableImage { .. }
        )
    }
}
