use axum::{Router, body::Body, http::Request, http::StatusCode, response::IntoResponse};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::adapter::{
    AdapterError, ImageMatcher, MockImageMatcher, MockSentimentScorer, Polarity,
    SENTIMENT_SERVICE, SentimentBackend, SentimentScorer, VISION_SERVICE, VisionBackend,
};
use crate::analysis::{AnalyzerConfig, ReviewAnalyzer};
use crate::constants::REVIEWLENS_STATUS_HEADER;
use crate::gateway::create_router_with_state;
use crate::gateway::error::GatewayError;
use crate::gateway::handler::REQUEST_ID_HEADER;
use crate::gateway::state::HandlerState;
use crate::review::ReviewError;
use crate::scoring::FusionEngine;

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];
const TEST_BODY_LIMIT: usize = 64 * 1024;

fn router<M, S>(matcher: M, scorer: S) -> Router
where
    M: ImageMatcher + 'static,
    S: SentimentScorer + 'static,
{
    router_with_limit(matcher, scorer, TEST_BODY_LIMIT)
}

fn router_with_limit<M, S>(matcher: M, scorer: S, body_limit: usize) -> Router
where
    M: ImageMatcher + 'static,
    S: SentimentScorer + 'static,
{
    let analyzer = ReviewAnalyzer::new(
        matcher,
        scorer,
        FusionEngine::default(),
        AnalyzerConfig::default(),
    );
    create_router_with_state(HandlerState::new(analyzer, body_limit))
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn full_review_json() -> serde_json::Value {
    serde_json::json!({
        "productReference": {"name": "Galaxy S23", "description": "Phantom Black, 256GB"},
        "reviewImage": BASE64.encode(PNG_BYTES),
        "reviewText": "Camera quality is great and the battery lasts long."
    })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn status_header(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(REVIEWLENS_STATUS_HEADER)
        .unwrap()
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn test_health_does_not_touch_adapters() {
    let matcher = MockImageMatcher::returning(0.9);
    let scorer = MockSentimentScorer::returning(Polarity::Positive, 0.9);
    let app = router(matcher.clone(), scorer.clone());

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(status_header(&response), "healthy");
    assert_eq!(body_json(response).await, serde_json::json!({"status": "ok"}));
    assert_eq!(matcher.calls(), 0);
    assert_eq!(scorer.calls(), 0);
}

#[tokio::test]
async fn test_ready_reports_adapter_modes() {
    let app = router(
        VisionBackend::Unconfigured,
        SentimentBackend::from_endpoint(None),
    );

    let response = app.oneshot(get_request("/ready")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["components"]["vision"], "unconfigured");
    assert_eq!(body["components"]["sentiment"], "lexicon");
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let app = router(
        MockImageMatcher::returning(0.5),
        MockSentimentScorer::returning(Polarity::Neutral, 0.5),
    );

    let response = app.oneshot(get_request("/")).await.unwrap();

    let body = body_json(response).await;
    assert_eq!(body["service"], "reviewlens");
    let endpoints = body["endpoints"].as_array().unwrap();
    assert!(endpoints.iter().any(|e| e == "POST /analyze_review"));
}

#[tokio::test]
async fn test_model_info_exposes_fusion_config() {
    let app = router(
        MockImageMatcher::returning(0.5),
        MockSentimentScorer::returning(Polarity::Neutral, 0.5),
    );

    let response = app.oneshot(get_request("/model_info")).await.unwrap();

    let body = body_json(response).await;
    assert_eq!(body["fusion"]["matchThreshold"], 0.7);
    assert_eq!(body["fusion"]["matchWeight"], 0.6);
    assert_eq!(body["fusion"]["sentimentWeight"], 0.4);
    assert_eq!(body["vision"], "mock");
    assert_eq!(body["maxTextLen"], 5000);
}

#[tokio::test]
async fn test_analyze_review_consistent_positive() {
    let app = router(
        MockImageMatcher::returning(0.85),
        MockSentimentScorer::returning(Polarity::Positive, 0.9),
    );

    let response = app
        .oneshot(json_request("/analyze_review", full_review_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(status_header(&response), "analyzed");
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));

    let body = body_json(response).await;
    assert_eq!(body["isProductMatch"], true);
    assert_eq!(body["confidenceScore"], 87);
    assert_eq!(body["confidenceLevel"], "very_high");
    assert_eq!(body["sentiment"]["polarity"], "positive");
    assert_eq!(body["sentiment"]["probability"], 0.9);
    assert_eq!(body["explanation"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_analyze_review_accepts_bare_product_name() {
    let app = router(
        MockImageMatcher::returning(0.85),
        MockSentimentScorer::returning(Polarity::Positive, 0.9),
    );

    let response = app
        .oneshot(json_request(
            "/analyze_review",
            serde_json::json!({"productReference": "Galaxy S23", "reviewText": "great"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["isProductMatch"], false);
    assert_eq!(body["confidenceScore"], 36);
}

#[tokio::test]
async fn test_analyze_review_data_url_image() {
    let matcher = MockImageMatcher::returning(0.3);
    let app = router(
        matcher.clone(),
        MockSentimentScorer::returning(Polarity::Positive, 0.9),
    );

    let response = app
        .oneshot(json_request(
            "/analyze_review",
            serde_json::json!({
                "productReference": {"name": "Galaxy S23"},
                "reviewImage": format!("data:image/png;base64,{}", BASE64.encode(PNG_BYTES)),
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(matcher.calls(), 1);
    let body = body_json(response).await;
    assert_eq!(body["isProductMatch"], false);
    assert_eq!(body["confidenceScore"], 18);
}

#[tokio::test]
async fn test_analyze_review_missing_evidence_is_bad_request() {
    let app = router(
        MockImageMatcher::returning(0.85),
        MockSentimentScorer::returning(Polarity::Positive, 0.9),
    );

    let response = app
        .oneshot(json_request(
            "/analyze_review",
            serde_json::json!({"productReference": {"name": "Galaxy S23"}, "reviewText": ""}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(status_header(&response), "invalid_input");
    let body = body_json(response).await;
    assert_eq!(body["code"], 400);
    assert!(body["error"].as_str().unwrap().contains("review image or review text"));
}

#[tokio::test]
async fn test_analyze_review_malformed_json_is_bad_request() {
    let app = router(
        MockImageMatcher::returning(0.85),
        MockSentimentScorer::returning(Polarity::Positive, 0.9),
    );

    let request = Request::builder()
        .method("POST")
        .uri("/analyze_review")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(status_header(&response), "invalid_request");
}

#[tokio::test]
async fn test_analyze_review_bad_base64_is_unprocessable() {
    let app = router(
        MockImageMatcher::returning(0.85),
        MockSentimentScorer::returning(Polarity::Positive, 0.9),
    );

    let response = app
        .oneshot(json_request(
            "/analyze_review",
            serde_json::json!({"productReference": {"name": "Galaxy S23"}, "reviewImage": "%%%"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(status_header(&response), "decode_error");
}

#[tokio::test]
async fn test_analyze_review_unrecognised_image_is_unprocessable() {
    let app = router(
        MockImageMatcher::returning(0.85),
        MockSentimentScorer::returning(Polarity::Positive, 0.9),
    );

    let response = app
        .oneshot(json_request(
            "/analyze_review",
            serde_json::json!({
                "productReference": {"name": "Galaxy S23"},
                "reviewImage": BASE64.encode(b"plain text, not a picture"),
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_analyze_review_all_adapters_down_is_unavailable() {
    let app = router(
        MockImageMatcher::unavailable(),
        MockSentimentScorer::unavailable(),
    );

    let response = app
        .oneshot(json_request("/analyze_review", full_review_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(status_header(&response), "unavailable");
    let body = body_json(response).await;
    assert_eq!(body["code"], 503);
}

#[tokio::test]
async fn test_analyze_review_partial_failure_is_degraded() {
    let app = router(
        MockImageMatcher::returning(0.85),
        MockSentimentScorer::failing(AdapterError::Timeout {
            service: SENTIMENT_SERVICE,
            timeout: std::time::Duration::from_secs(3),
        }),
    );

    let response = app
        .oneshot(json_request("/analyze_review", full_review_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(status_header(&response), "degraded");
    let body = body_json(response).await;
    assert_eq!(body["confidenceScore"], 51);
    assert_eq!(body["degraded"], serde_json::json!(["text"]));
    assert!(body["sentiment"].is_null());
}

#[tokio::test]
async fn test_analyze_review_body_limit() {
    let app = router_with_limit(
        MockImageMatcher::returning(0.85),
        MockSentimentScorer::returning(Polarity::Positive, 0.9),
        1024,
    );

    let response = app
        .oneshot(json_request(
            "/analyze_review",
            serde_json::json!({
                "productReference": {"name": "Galaxy S23"},
                "reviewText": "a".repeat(4096),
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(status_header(&response), "payload_too_large");
}

fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    let boundary = "reviewlens-test-boundary";
    let mut body: Vec<u8> = Vec::new();
    for (name, content_type, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        match content_type {
            Some(ct) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"upload\"\r\nContent-Type: {}\r\n\r\n",
                    name, ct
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/analyze_review/form")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_analyze_review_form() {
    let matcher = MockImageMatcher::returning(0.85);
    let app = router(
        matcher.clone(),
        MockSentimentScorer::returning(Polarity::Positive, 0.9),
    );

    let response = app
        .oneshot(multipart_request(&[
            ("product_name", None, b"Galaxy S23"),
            ("product_description", None, b"Phantom Black"),
            ("review_text", None, b"Love it"),
            ("image", Some("image/png"), PNG_BYTES),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(matcher.calls(), 1);
    let body = body_json(response).await;
    assert_eq!(body["confidenceScore"], 87);
}

#[tokio::test]
async fn test_analyze_review_form_rejects_non_image_upload() {
    let app = router(
        MockImageMatcher::returning(0.85),
        MockSentimentScorer::returning(Polarity::Positive, 0.9),
    );

    let response = app
        .oneshot(multipart_request(&[
            ("product_name", None, b"Galaxy S23"),
            ("image", Some("text/plain"), b"hello"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("image/*"));
}

#[tokio::test]
async fn test_analyze_review_form_requires_product_name() {
    let app = router(
        MockImageMatcher::returning(0.85),
        MockSentimentScorer::returning(Polarity::Positive, 0.9),
    );

    let response = app
        .oneshot(multipart_request(&[("review_text", None, b"Love it")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(status_header(&response), "invalid_request");
}

#[tokio::test]
async fn test_unconfigured_vision_with_text_is_degraded() {
    let app = router(
        VisionBackend::Unconfigured,
        MockSentimentScorer::returning(Polarity::Negative, 0.7),
    );

    let response = app
        .oneshot(json_request("/analyze_review", full_review_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(status_header(&response), "degraded");
    let body = body_json(response).await;
    assert_eq!(body["confidenceScore"], 28);
    assert_eq!(body["isProductMatch"], false);
}

#[test]
fn test_gateway_error_status_mapping() {
    let cases = [
        (
            GatewayError::InvalidRequest("x".into()),
            StatusCode::BAD_REQUEST,
        ),
        (
            GatewayError::InvalidInput(ReviewError::MissingEvidence),
            StatusCode::BAD_REQUEST,
        ),
        (GatewayError::Decode("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
        (
            GatewayError::PayloadTooLarge("x".into()),
            StatusCode::PAYLOAD_TOO_LARGE,
        ),
        (
            GatewayError::AnalysisUnavailable("x".into()),
            StatusCode::SERVICE_UNAVAILABLE,
        ),
        (
            GatewayError::InternalError("x".into()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(err.into_response().status(), expected);
    }
}

#[test]
fn test_oversized_image_maps_to_payload_too_large() {
    let err = GatewayError::from(crate::analysis::AnalysisError::InvalidInput(
        ReviewError::ImageTooLarge { size: 20, max: 10 },
    ));
    assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

    let err = GatewayError::from(crate::analysis::AnalysisError::AnalysisUnavailable {
        failures: vec![AdapterError::NotConfigured {
            service: VISION_SERVICE,
        }],
    });
    assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(err.to_string().contains("analysis unavailable"));
}
