//! HTTP gateway (Axum) in front of the [`ReviewAnalyzer`](crate::analysis::ReviewAnalyzer).
//!
//! Primarily used by the `reviewlens` server binary.

pub mod error;
pub mod handler;
pub mod liveness;
pub mod payload;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{REQUEST_ID_HEADER, analyze_review_form_handler, analyze_review_handler};
pub use liveness::check_liveness;
pub use state::HandlerState;

use crate::adapter::{ImageMatcher, SentimentScorer};
use crate::constants::{
    REVIEWLENS_STATUS_HEADER, REVIEWLENS_STATUS_HEALTHY, REVIEWLENS_STATUS_READY,
};
use payload::{ComponentStatus, HealthResponse, ModelInfo, ReadyResponse, ServiceInfo};

pub const SERVICE_NAME: &str = "reviewlens";

const ENDPOINTS: [&str; 6] = [
    "POST /analyze_review",
    "POST /analyze_review/form",
    "GET /health",
    "GET /ready",
    "GET /model_info",
    "GET /",
];

pub fn create_router_with_state<M, S>(state: HandlerState<M, S>) -> Router
where
    M: ImageMatcher + 'static,
    S: SentimentScorer + 'static,
{
    let body_limit = state.body_limit;

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/model_info", get(model_info_handler))
        .route("/analyze_review", post(analyze_review_handler))
        .route("/analyze_review/form", post(analyze_review_form_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness only; never touches the analyzer.
#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        REVIEWLENS_STATUS_HEADER,
        HeaderValue::from_static(REVIEWLENS_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<M, S>(State(state): State<HandlerState<M, S>>) -> Response
where
    M: ImageMatcher + 'static,
    S: SentimentScorer + 'static,
{
    let components = ComponentStatus {
        http: REVIEWLENS_STATUS_READY,
        vision: state.analyzer.matcher_mode(),
        sentiment: state.analyzer.scorer_mode(),
    };

    let is_ready = components.vision.is_usable() || components.sentiment.is_usable();

    let (status_code, status_msg) = if is_ready {
        (StatusCode::OK, REVIEWLENS_STATUS_READY)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    let mut headers = HeaderMap::new();
    headers.insert(REVIEWLENS_STATUS_HEADER, HeaderValue::from_static(status_msg));

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}

pub async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS.to_vec(),
    })
}

pub async fn model_info_handler<M, S>(State(state): State<HandlerState<M, S>>) -> Json<ModelInfo>
where
    M: ImageMatcher + 'static,
    S: SentimentScorer + 'static,
{
    let analyzer = &state.analyzer;
    let limits = analyzer.config().limits;

    Json(ModelInfo {
        features: vec![
            "image-product similarity",
            "review sentiment",
            "confidence fusion",
            "explanations",
        ],
        fusion: *analyzer.engine().config(),
        vision: analyzer.matcher_mode(),
        sentiment: analyzer.scorer_mode(),
        max_text_len: limits.max_text_len,
        max_image_bytes: limits.max_image_bytes,
    })
}
