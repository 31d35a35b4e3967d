//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - The presign route under `/api`
//! - The health probe
//! - CORS, body limit, tracing and security header layers
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use twynup_core::storage::StorageService;

/// Default maximum request body size: 200 KiB.
pub const DEFAULT_BODY_LIMIT: usize = 200 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Storage service for signing uploads (absent when not configured).
    pub storage: Option<Arc<StorageService>>,
    /// Deployment environment label reported by the health probe.
    pub environment: Arc<str>,
    /// Maximum accepted request body size in bytes.
    pub body_limit_bytes: usize,
}

impl AppState {
    /// Create application state with the default body limit.
    #[must_use]
    pub fn new(storage: Option<Arc<StorageService>>, environment: impl Into<Arc<str>>) -> Self {
        Self {
            storage,
            environment: environment.into(),
            body_limit_bytes: DEFAULT_BODY_LIMIT,
        }
    }

    /// Set the maximum accepted request body size.
    #[must_use]
    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit_bytes = bytes;
        self
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .merge(routes::health::routes())
        .nest("/api", routes::api_routes())
        .fallback(routes::not_found)
        .layer(RequestBodyLimitLayer::new(state.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        );

    // Outermost, so preflight and 413 responses carry the headers too
    middleware::with_security_headers(router).with_state(state)
}
