use axum::{
    Json,
    extract::{
        Multipart, State,
        rejection::JsonRejection,
        multipart::MultipartError,
    },
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::adapter::{ImageMatcher, SentimentScorer};
use crate::analysis::ReviewVerdict;
use crate::constants::{
    REVIEWLENS_STATUS_ANALYZED, REVIEWLENS_STATUS_DEGRADED, REVIEWLENS_STATUS_HEADER,
};
use crate::review::{ProductReference, ReviewSubmission};

use super::error::GatewayError;
use super::payload::AnalyzeRequest;
use super::state::HandlerState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `POST /analyze_review` with a JSON body.
#[instrument(skip_all)]
pub async fn analyze_review_handler<M, S>(
    State(state): State<HandlerState<M, S>>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Response, GatewayError>
where
    M: ImageMatcher + 'static,
    S: SentimentScorer + 'static,
{
    let Json(request) = body.map_err(json_rejection)?;
    let submission = request.into_submission()?;

    analyze(&state, submission).await
}

/// `POST /analyze_review/form` with a multipart body.
///
/// Fields: `product_name`, `product_description`, `review_text`, `image`.
#[instrument(skip_all)]
pub async fn analyze_review_form_handler<M, S>(
    State(state): State<HandlerState<M, S>>,
    multipart: Multipart,
) -> Result<Response, GatewayError>
where
    M: ImageMatcher + 'static,
    S: SentimentScorer + 'static,
{
    let submission = read_form(multipart).await?;

    analyze(&state, submission).await
}

async fn analyze<M, S>(
    state: &HandlerState<M, S>,
    submission: ReviewSubmission,
) -> Result<Response, GatewayError>
where
    M: ImageMatcher + 'static,
    S: SentimentScorer + 'static,
{
    let request_id = Uuid::new_v4();
    let verdict = state
        .analyzer
        .analyze_with_id(request_id, submission)
        .await?;

    Ok(verdict_response(request_id, verdict))
}

pub fn verdict_response(request_id: Uuid, verdict: ReviewVerdict) -> Response {
    let status = if verdict.is_degraded() {
        REVIEWLENS_STATUS_DEGRADED
    } else {
        REVIEWLENS_STATUS_ANALYZED
    };

    let mut headers = HeaderMap::new();
    headers.insert(REVIEWLENS_STATUS_HEADER, HeaderValue::from_static(status));
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        headers.insert(REQUEST_ID_HEADER, value);
    }

    (StatusCode::OK, headers, Json(verdict)).into_response()
}

fn json_rejection(rejection: JsonRejection) -> GatewayError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge(rejection.body_text())
    } else {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

fn multipart_error(err: MultipartError) -> GatewayError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge(err.body_text())
    } else {
        GatewayError::InvalidRequest(err.body_text())
    }
}

async fn read_form(mut multipart: Multipart) -> Result<ReviewSubmission, GatewayError> {
    let mut product_name: Option<String> = None;
    let mut product_description: Option<String> = None;
    let mut review_text: Option<String> = None;
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "product_name" => product_name = Some(field.text().await.map_err(multipart_error)?),
            "product_description" => {
                product_description = Some(field.text().await.map_err(multipart_error)?)
            }
            "review_text" => review_text = Some(field.text().await.map_err(multipart_error)?),
            "image" => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                // Browsers send an empty part when no file was chosen.
                if bytes.is_empty() && field_is_placeholder(&content_type) {
                    continue;
                }
                if !content_type.starts_with("image/") {
                    return Err(GatewayError::InvalidRequest(format!(
                        "image field must have an image/* content type, got '{}'",
                        content_type
                    )));
                }
                image = Some(bytes.to_vec());
            }
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    let name = product_name
        .ok_or_else(|| GatewayError::InvalidRequest("missing form field 'product_name'".into()))?;

    let mut product = ProductReference::new(name);
    if let Some(description) = product_description.filter(|d| !d.trim().is_empty()) {
        product = product.with_description(description);
    }

    let mut submission = ReviewSubmission::new(product);
    if let Some(bytes) = image {
        submission = submission.with_image(bytes);
    }
    if let Some(text) = review_text {
        submission = submission.with_text(text);
    }

    Ok(submission)
}

fn field_is_placeholder(content_type: &str) -> bool {
    content_type.is_empty() || content_type == "application/octet-stream"
}
