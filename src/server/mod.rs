//! HTTP service exposing the voice analyzer
//!
//! Routes (all under `/api`):
//! - `GET  /api/`                - service banner
//! - `GET  /api/health`          - liveness probe
//! - `POST /api/voice-detection` - classify base64-encoded audio

mod audit;
mod error;
mod models;
mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use log::{info, warn};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::core::VoiceAnalyzer;

pub use audit::{open_sink, AnalysisRecord, AuditError, AuditSink, JsonLinesSink, MemorySink};
pub use error::ApiError;
pub use models::{
    ErrorBody, Language, UnknownLanguage, VoiceDetectionRequest, VoiceDetectionResponse,
    SUPPORTED_FORMAT,
};
pub use routes::API_KEY_HEADER;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub analyzer: VoiceAnalyzer,
    pub api_key: Arc<str>,
    pub audit: Arc<dyn AuditSink>,
}

/// Voice detection HTTP server
pub struct VoiceServer {
    config: ServerConfig,
    state: AppState,
}

impl VoiceServer {
    /// Create a server with the audit sink described by the configuration
    pub fn new(config: ServerConfig) -> Result<Self> {
        let audit = open_sink(&config.audit).context("Failed to open audit log")?;
        Ok(Self::with_sink(config, audit))
    }

    /// Create a server writing records to `audit`
    pub fn with_sink(config: ServerConfig, audit: Arc<dyn AuditSink>) -> Self {
        let state = AppState {
            analyzer: VoiceAnalyzer::builder().config(config.analysis.clone()).build(),
            api_key: Arc::from(config.api_key.as_str()),
            audit,
        };
        Self { config, state }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the Axum router
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api", get(routes::root))
            .route("/api/", get(routes::root))
            .route("/api/health", get(routes::health))
            .route("/api/voice-detection", post(routes::voice_detection))
            .layer(DefaultBodyLimit::max(self.config.max_body_bytes))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(self.cors_layer())
    }

    /// Credentialed CORS; a `*` origin list echoes the caller's origin
    fn cors_layer(&self) -> CorsLayer {
        let origin = if self.config.allows_any_origin() {
            AllowOrigin::mirror_request()
        } else {
            let origins: Vec<HeaderValue> = self
                .config
                .cors_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin {:?}", origin);
                        None
                    }
                })
                .collect();
            AllowOrigin::list(origins)
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
    }

    /// Bind the configured address and serve until the process exits
    pub async fn run(self) -> Result<()> {
        let addr = self
            .config
            .socket_addr()
            .with_context(|| format!("Invalid bind address: {}", self.config.bind_address))?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let local = listener.local_addr()?;
        info!("Voice detection API listening on http://{}", local);
        info!("  POST /api/voice-detection");
        info!("  GET  /api/health");

        axum::serve(listener, self.router())
            .await
            .context("HTTP server failed")?;
        Ok(())
    }
}
