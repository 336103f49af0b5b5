//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the Axum router: service routes, every lesson, fallbacks
//! - Wire up middleware (request ID, tracing, limits, timeout, metrics)
//! - Serve on a listener until the shutdown future resolves

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{DefaultBodyLimit, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Json, Router, ServiceExt};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::Layer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::catalog::Catalog;
use crate::config::ServiceConfig;
use crate::http::request::{request_span, MakeRequestUuid};
use crate::lessons;
use crate::observability::metrics::track_metrics;

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: ServiceConfig) -> Self {
        let router = Self::build_router(&config, AppState::default());
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers listed last run first: the request ID is set before the trace
    /// span opens, and the concurrency permit is taken before the timeout
    /// starts counting.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(root))
            .route("/health", get(health))
            .merge(lessons::router())
            .route_layer(middleware::from_fn(track_metrics))
            .method_not_allowed_fallback(method_not_allowed)
            .fallback(not_found)
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(GlobalConcurrencyLimitLayer::new(
                config.listener.max_connections,
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Serve on `listener` until `shutdown` resolves, then drain in-flight
    /// requests and return.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            lessons = lessons::LESSONS.len(),
            "HTTP server starting"
        );

        // Path normalization has to happen before routing, so it wraps the
        // router instead of being one of its layers.
        let app = NormalizePathLayer::trim_trailing_slash().layer(self.router);

        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello World" }))
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "operational",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response()
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "detail": "Method Not Allowed" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};
    use tokio::runtime::Runtime;
    use tower::ServiceExt as _;

    use crate::observability::metrics::{REQUESTS_TOTAL, REQUEST_DURATION};

    fn send(runtime: &Runtime, router: &Router, uri: &str) -> StatusCode {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = runtime.block_on(router.clone().oneshot(request)).unwrap();
        response.status()
    }

    fn labels(key: &metrics::Key) -> Vec<(String, String)> {
        let mut labels: Vec<_> = key
            .labels()
            .map(|l| (l.key().to_string(), l.value().to_string()))
            .collect();
        labels.sort();
        labels
    }

    fn item_labels(status: Option<&str>) -> Vec<(String, String)> {
        let mut labels = vec![
            ("method".to_string(), "GET".to_string()),
            (
                "route".to_string(),
                "/path-params/items/{item_id}".to_string(),
            ),
        ];
        labels.extend(status.map(|s| ("status".to_string(), s.to_string())));
        labels
    }

    #[test]
    fn test_requests_recorded_by_route_template() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let router = HttpServer::new(ServiceConfig::default()).router;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        metrics::with_local_recorder(&recorder, || {
            assert_eq!(send(&runtime, &router, "/path-params/items/5"), StatusCode::OK);
            assert_eq!(send(&runtime, &router, "/path-params/items/7"), StatusCode::OK);
            assert_eq!(
                send(&runtime, &router, "/path-params/items/foo"),
                StatusCode::UNPROCESSABLE_ENTITY
            );
            assert_eq!(send(&runtime, &router, "/nowhere"), StatusCode::NOT_FOUND);
        });

        let entries = snapshotter.snapshot().into_vec();

        let mut counters: Vec<_> = entries
            .iter()
            .filter(|(key, ..)| key.key().name() == REQUESTS_TOTAL)
            .map(|(key, _, _, value)| (labels(key.key()), value.clone()))
            .collect();
        counters.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            counters,
            vec![
                (item_labels(Some("200")), &DebugValue::Counter(2)),
                (item_labels(Some("422")), &DebugValue::Counter(1)),
            ]
        );

        let histograms: Vec<_> = entries
            .iter()
            .filter(|(key, ..)| key.key().name() == REQUEST_DURATION)
            .collect();
        assert_eq!(histograms.len(), 1);
        let (key, _, _, value) = histograms[0];
        assert_eq!(labels(key.key()), item_labels(None));
        match value {
            DebugValue::Histogram(samples) => assert_eq!(samples.len(), 3),
            other => panic!("expected a histogram, got {:?}", other),
        }
    }
}
