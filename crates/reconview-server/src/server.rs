use std::net::SocketAddr;

use axum::{Router, middleware, routing::get};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{config::AppConfig, handlers, middleware as app_middleware, page::ReconciliationPage};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub page: ReconciliationPage,
}

pub struct ReconviewServer {
    addr: SocketAddr,
    app: Router,
}

/// Builds the router with the HTTP source and renderer described by `cfg`.
pub fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let page = ReconciliationPage::from_config(cfg)?;
    Ok(build_router(AppState { page }))
}

/// Builds the router around an existing page, e.g. one backed by a test source.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::reconciliation_page))
        .route("/api/reconciliation", get(handlers::reconciliation_json))
        // Health endpoints
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        // Browser favicon shortcut
        .route("/favicon.ico", get(handlers::favicon))
        .with_state(state)
        // Middleware stack, innermost first: compression -> trace -> request id
        .layer(CompressionLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    use tracing::field::Empty;
                    // Skip creating a span for browser favicon requests to avoid noisy logs
                    if req.uri().path() == "/favicon.ico" {
                        return tracing::span!(tracing::Level::TRACE, "noop");
                    }
                    let req_id = req
                        .headers()
                        .get(app_middleware::REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri(),
                        http.status_code = Empty,
                        request_id = %req_id
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>, latency: std::time::Duration, span: &tracing::Span| {
                        span.record("http.status_code", tracing::field::display(res.status().as_u16()));
                        // Only the real request span gets an access log line.
                        if let Some(meta) = span.metadata()
                            && meta.name() != "noop"
                        {
                            tracing::info!(
                                http.status = %res.status().as_u16(),
                                elapsed_ms = %latency.as_millis(),
                                "request handled"
                            );
                        }
                    },
                ),
        )
        .layer(middleware::from_fn(app_middleware::request_id))
}

pub struct ServerBuilder {
    config: AppConfig,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.config = cfg;
        self
    }

    pub fn build(self) -> anyhow::Result<ReconviewServer> {
        let addr = self.config.addr().map_err(anyhow::Error::msg)?;
        let app = build_app(&self.config)?;

        Ok(ReconviewServer { addr, app })
    }
}

impl ReconviewServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
