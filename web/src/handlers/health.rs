//! Health check endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use axum::{Json, extract::State, http::StatusCode};
use marketplace_core::repository::HealthProbe;
use serde::Serialize;
use std::sync::Arc;

/// Simple health check endpoint (for basic liveness).
///
/// Returns 200 OK to indicate the service is running.
/// This endpoint does NOT check dependencies (database, etc.).
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Readiness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readiness {
    /// `"ready"` or `"unavailable"`
    pub status: &'static str,
    /// Component that was probed
    pub component: &'static str,
    /// Failure detail when unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Readiness check against the backing store.
///
/// # Status Codes
///
/// - 200 OK: the store answered
/// - 503 Service Unavailable: the probe failed
///
/// # Endpoint
///
/// ```text
/// GET /ready
/// ```
pub async fn readiness(
    State(probe): State<Arc<dyn HealthProbe>>,
) -> (StatusCode, Json<Readiness>) {
    let component = probe.component();
    match probe.check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(Readiness {
                status: "ready",
                component,
                message: None,
            }),
        ),
        Err(e) => {
            tracing::warn!(component, error = %e, "Readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Readiness {
                    status: "unavailable",
                    component,
                    message: Some(e.to_string()),
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketplace_testing::InMemoryMarketplace;

    #[tokio::test]
    async fn test_simple_health_check() {
        let (status, body) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_readiness_follows_probe() {
        let store = InMemoryMarketplace::new();
        let probe: Arc<dyn HealthProbe> = Arc::new(store.clone());

        let (status, Json(report)) = readiness(State(Arc::clone(&probe))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report.status, "ready");

        store.set_unavailable(true);
        let (status, Json(report)) = readiness(State(probe)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(report.status, "unavailable");
        assert!(report.message.is_some());
    }
}
