//! Client side of `GET /health`, used by the binary's `--health-check` flag.

use std::time::Duration;

/// Process exit code for a server that answered `/health` with a 2xx.
pub const LIVENESS_OK: i32 = 0;

/// Process exit code for an unreachable, slow or unhealthy server.
pub const LIVENESS_FAILED: i32 = 1;

/// Calls `{base_url}/health` and maps the outcome to a process exit code.
///
/// Runs on the caller's runtime, so it can be awaited straight from `#[tokio::main]`.
pub async fn check_liveness(base_url: &str, timeout: Duration) -> i32 {
    let url = format!("{}/health", base_url.trim_end_matches('/'));

    let client = match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::debug!(error = %e, "Failed to build liveness client");
            return LIVENESS_FAILED;
        }
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => LIVENESS_OK,
        Ok(res) => {
            tracing::debug!(%url, status = %res.status(), "Liveness check failed");
            LIVENESS_FAILED
        }
        Err(e) => {
            tracing::debug!(%url, error = %e, "Liveness check failed");
            LIVENESS_FAILED
        }
    }
}
