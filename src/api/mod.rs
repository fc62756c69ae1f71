//! HTTP API server for the voicepipe gateway

pub mod audio;
pub mod health;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::pipeline::Pipeline;
use crate::{Error, Result};

/// Shared state for API handlers
pub struct ApiState {
    pub pipeline: Pipeline,
}

/// API server
pub struct ApiServer {
    state: Arc<ApiState>,
    port: u16,
    frontend_url: String,
}

impl ApiServer {
    /// Create a new API server
    #[must_use]
    pub fn new(pipeline: Pipeline, port: u16, frontend_url: String) -> Self {
        Self {
            state: Arc::new(ApiState { pipeline }),
            port,
            frontend_url,
        }
    }

    /// Build the router with all routes
    fn router(&self, frontend_origin: HeaderValue) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(frontend_origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true);

        Router::new()
            .nest("/audio", audio::router(self.state.clone()))
            .merge(health::router())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if the frontend origin is invalid or the server fails
    /// to bind or run.
    pub async fn run(self) -> Result<()> {
        let frontend_origin: HeaderValue = self.frontend_url.parse().map_err(|_| {
            Error::Config(format!("invalid frontend origin: {}", self.frontend_url))
        })?;

        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Config(format!("failed to bind API server: {e}")))?;

        tracing::info!(port = self.port, "API server listening");

        let router = self.router(frontend_origin);
        axum::serve(listener, router)
            .await
            .map_err(|e| Error::Config(format!("API server error: {e}")))?;

        Ok(())
    }
}
