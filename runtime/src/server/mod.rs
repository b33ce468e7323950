//! HTTP boundary around `PredictionService`.

pub mod api;

use crate::config::RuntimeConfig;
use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use urlguard::{ClassifierAdapter, PredictionService};

/// Immutable state shared by every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub service: Arc<PredictionService>,
}

impl AppContext {
    pub fn new(service: PredictionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Compile patterns and load artifacts once, before any request.
    pub fn load(config: &RuntimeConfig) -> Self {
        urlguard::warm_up();
        let adapter = ClassifierAdapter::load(&config.artifact_paths());
        if !adapter.is_available() {
            warn!(
                model_dir = %config.model_dir.display(),
                "serving without a classifier; /predict will fail until artifacts are fixed and the server restarted"
            );
        }
        Self::new(PredictionService::new(adapter))
    }
}

/// Build the application router.
pub fn router(ctx: AppContext, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/predict", post(api::predict))
        .route("/features", post(api::features))
        .route("/health", get(api::health))
        .with_state(ctx)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!("ignoring invalid CORS origin {origin:?}");
                    None
                }
            })
            .collect();
        info!("CORS: allowing origins {allowed:?}");

        CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    cors.max_age(Duration::from_secs(3600))
}

/// Bind and serve until Ctrl+C.
pub async fn run(config: &RuntimeConfig, ctx: AppContext) -> Result<()> {
    let app = router(ctx, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    let local = listener.local_addr().context("reading bound address")?;
    info!("listening on http://{local}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received shutdown signal");
    }
}
