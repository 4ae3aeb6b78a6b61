//! `DuyguServer`: Axum HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use duygu_classifier::SentimentAnalyzer;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::handlers::{form, predict};
use crate::health::{self, HealthResponse};
use crate::metrics;
use crate::shutdown::ShutdownCoordinator;

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Routes text to the per-language classifiers.
    pub analyzer: Arc<SentimentAnalyzer>,
    /// When the server started.
    pub start_time: Instant,
    /// Prometheus handle for `/metrics`.
    pub metrics_handle: PrometheusHandle,
}

/// The Duygu sentiment server.
pub struct DuyguServer {
    config: ServerConfig,
    analyzer: Arc<SentimentAnalyzer>,
    metrics_handle: PrometheusHandle,
    shutdown: Arc<ShutdownCoordinator>,
    start_time: Instant,
}

impl DuyguServer {
    /// Create a new server.
    pub fn new(
        config: ServerConfig,
        analyzer: SentimentAnalyzer,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self {
            config,
            analyzer: Arc::new(analyzer),
            metrics_handle,
            shutdown: Arc::new(ShutdownCoordinator::new()),
            start_time: Instant::now(),
        }
    }

    /// Build the Axum router with all routes.
    pub fn router(&self) -> Router {
        let state = AppState {
            analyzer: self.analyzer.clone(),
            start_time: self.start_time,
            metrics_handle: self.metrics_handle.clone(),
        };

        Router::new()
            .route("/", get(form::form_page).post(form::form_submit))
            .route("/api/predict", post(predict::predict_handler))
            .route("/health", get(health_handler))
            .route("/metrics", get(metrics_handler))
            .layer(RequestBodyLimitLayer::new(self.config.max_body_bytes))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Bind to the configured address.
    pub async fn bind(&self) -> std::io::Result<TcpListener> {
        TcpListener::bind(self.config.bind_addr()).await
    }

    /// Serve on `listener` until `token` is cancelled, then drain in-flight requests.
    pub async fn serve(&self, listener: TcpListener, token: CancellationToken) -> std::io::Result<()> {
        let addr: Option<SocketAddr> = listener.local_addr().ok();
        info!(addr = ?addr, "duygu server listening");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { token.cancelled().await })
            .await
    }

    /// Get the shutdown coordinator.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the analyzer.
    pub fn analyzer(&self) -> &Arc<SentimentAnalyzer> {
        &self.analyzer
    }
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health::health_check(
        state.start_time,
        state.analyzer.describe(),
    ))
}

/// GET /metrics
async fn metrics_handler(State(state): State<AppState>) -> String {
    metrics::render(&state.metrics_handle)
}
