//! Test server harness.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use reviewlens::analysis::{AnalyzerConfig, ReviewAnalyzer};
use reviewlens::gateway::{HandlerState, create_router_with_state};
use reviewlens::scoring::{FusionConfig, FusionEngine};
use reviewlens::{ImageMatcher, SentimentScorer};

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;
const TEST_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub fusion: FusionConfig,
    pub analyzer: AnalyzerConfig,
    pub body_limit: usize,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            fusion: FusionConfig::default(),
            analyzer: AnalyzerConfig::default(),
            body_limit: TEST_BODY_LIMIT,
        }
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns the full HTTP stack on an ephemeral port around the given adapters.
///
/// Pass mock adapters for scripted behaviour, or HTTP adapters pointed at a stub
/// upstream from [`spawn_upstream`] to exercise the wire contracts end to end.
pub async fn spawn_test_server<M, S>(
    matcher: M,
    scorer: S,
    config: TestServerConfig,
) -> Result<TestServer, ServerStartupError>
where
    M: ImageMatcher + 'static,
    S: SentimentScorer + 'static,
{
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let local_addr = listener.local_addr()?;

    let engine = FusionEngine::new(config.fusion)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    let analyzer = ReviewAnalyzer::new(matcher, scorer, engine, config.analyzer);
    let app = create_router_with_state(HandlerState::new(analyzer, config.body_limit));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}

/// Serves `router` on an ephemeral port and returns its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}
