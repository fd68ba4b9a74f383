use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::constants::REVIEWLENS_STATUS_HEADER;
use crate::review::ReviewError;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request body could not be read as an analysis request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid input: {0}")]
    InvalidInput(ReviewError),

    #[error("image could not be decoded: {0}")]
    Decode(String),

    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    AnalysisUnavailable(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<AnalysisError> for GatewayError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidInput(ReviewError::ImageTooLarge { size, max }) => {
                GatewayError::PayloadTooLarge(
                    ReviewError::ImageTooLarge { size, max }.to_string(),
                )
            }
            AnalysisError::InvalidInput(review) => GatewayError::InvalidInput(review),
            AnalysisError::Decode { reason } => GatewayError::Decode(reason),
            unavailable @ AnalysisError::AnalysisUnavailable { .. } => {
                GatewayError::AnalysisUnavailable(unavailable.to_string())
            }
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) | GatewayError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::AnalysisUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn reviewlens_status(&self) -> &'static str {
        match self {
            GatewayError::InvalidRequest(_) => "invalid_request",
            GatewayError::InvalidInput(_) => "invalid_input",
            GatewayError::Decode(_) => "decode_error",
            GatewayError::PayloadTooLarge(_) => "payload_too_large",
            GatewayError::AnalysisUnavailable(_) => "unavailable",
            GatewayError::InternalError(_) => "internal_error",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let mut headers = HeaderMap::new();
        headers.insert(
            REVIEWLENS_STATUS_HEADER,
            HeaderValue::from_static(self.reviewlens_status()),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
