//! Web layer module
//!
//! This module provides the HTTP interface for the image annotator. Handlers
//! are thin and delegate to [`LabelService`] for the labelling flow.
//!
//! # Routes
//!
//! - `GET /` embedded landing page with an upload form
//! - `POST /label` multipart upload, answered with labels and a timing trace
//! - `GET /health` liveness and cache backend

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::Config, errors::AppError, services::LabelService};

pub mod handlers;
pub mod responses;

pub use responses::{handle_error, ErrorResponse};

/// Web server configuration and setup
#[derive(Debug)]
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: &Config, label_service: LabelService) -> Result<Self> {
        let app = Self::create_router(AppState {
            label_service,
            max_upload_bytes: config.web.max_upload_bytes,
        });

        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port)
            .parse::<SocketAddr>()
            .map_err(|e| {
                AppError::configuration(format!(
                    "invalid listen address {}:{}: {}",
                    config.web.host, config.web.port, e
                ))
            })?;

        Ok(Self { app, addr })
    }

    /// Create the router with all routes and middleware
    pub fn create_router(state: AppState) -> Router {
        let max_upload_bytes = state.max_upload_bytes;

        Router::new()
            .route("/", get(handlers::index::index))
            .route("/label", post(handlers::label::label_image))
            .route("/health", get(handlers::health::health_check))
            // Middleware (applied in reverse order)
            .layer(DefaultBodyLimit::max(max_upload_bytes))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Start the web server
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub label_service: LabelService,
    pub max_upload_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::LabelAnnotator;
    use crate::cache::MemoryCacheStore;
    use crate::errors::UpstreamResult;
    use crate::models::Label;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NoLabels;

    #[async_trait]
    impl LabelAnnotator for NoLabels {
        async fn annotate(&self, _image_base64: &str) -> UpstreamResult<Vec<Label>> {
            Ok(Vec::new())
        }
    }

    fn label_service() -> LabelService {
        LabelService::new(Arc::new(MemoryCacheStore::new()), Arc::new(NoLabels))
    }

    #[test]
    fn test_new_uses_configured_address() {
        let mut config = Config::default();
        config.web.host = "127.0.0.1".to_string();
        config.web.port = 9191;

        let server = WebServer::new(&config, label_service()).unwrap();
        assert_eq!(server.host(), "127.0.0.1");
        assert_eq!(server.port(), 9191);
    }

    #[test]
    fn test_invalid_host_is_a_configuration_error() {
        let mut config = Config::default();
        config.web.host = "not an address".to_string();

        let error = WebServer::new(&config, label_service()).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<AppError>(),
            Some(AppError::Configuration { .. })
        ));
    }
}
