//! ReviewLens HTTP server entrypoint.

use std::net::SocketAddr;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use reviewlens::adapter::{SentimentBackend, VisionBackend};
use reviewlens::analysis::ReviewAnalyzer;
use reviewlens::config::Config;
use reviewlens::constants::LIVENESS_CHECK_TIMEOUT;
use reviewlens::gateway::{HandlerState, check_liveness, create_router_with_state};
use reviewlens::scoring::FusionEngine;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    println!(
        r#"
  reviewlens {}
  does the picture match the words?
"#,
        env!("CARGO_PKG_VERSION")
    );

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        match_threshold = config.fusion.match_threshold,
        match_weight = config.fusion.match_weight,
        sentiment_weight = config.fusion.sentiment_weight,
        sentiment_labels = config.sentiment_labels.as_str(),
        "ReviewLens starting"
    );

    let matcher = VisionBackend::from_endpoint(config.vision_url.as_deref());
    if config.vision_url.is_none() {
        tracing::warn!(
            "No {} configured; image evidence will be unavailable",
            Config::ENV_VISION_URL
        );
    }

    let scorer = SentimentBackend::from_endpoint(config.sentiment_url.as_deref())
        .with_label_scheme(config.sentiment_labels);
    if config.sentiment_url.is_none() {
        tracing::warn!(
            "No {} configured; scoring sentiment with the built-in lexicon",
            Config::ENV_SENTIMENT_URL
        );
    }

    let engine = FusionEngine::new(config.fusion)?;
    let analyzer = ReviewAnalyzer::new(matcher, scorer, engine, config.analyzer_config());
    tracing::debug!(?analyzer, "Analyzer ready");

    let state = HandlerState::new(analyzer, config.body_limit());
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("ReviewLens shutdown complete");
    Ok(())
}

async fn run_health_check() -> i32 {
    let port = std::env::var(Config::ENV_PORT)
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(Config::default().port);

    check_liveness(&format!("http://127.0.0.1:{}", port), LIVENESS_CHECK_TIMEOUT).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
