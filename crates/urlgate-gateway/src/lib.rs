//! urlgate HTTP Gateway
//!
//! Thin axum surface over the verification pipeline:
//! - URL verification for request handlers deciding forward vs. warn
//! - Blacklist/whitelist mutators for operator tooling
//! - Health, statistics, and metrics endpoints

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod handlers;
pub mod middleware;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use urlgate_verify::VerdictPipeline;

/// Application state shared across handlers
pub struct AppState {
    /// The verification pipeline
    pub pipeline: Arc<VerdictPipeline>,
}

impl AppState {
    /// Create application state with the built-in seed lists and an
    /// untrained model
    pub fn new() -> Self {
        Self {
            pipeline: Arc::new(VerdictPipeline::with_seed_lists()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the API router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Metrics
        .route("/metrics", get(handlers::metrics))
        // Verification API
        .route("/api/v1/verify", post(handlers::verify_url))
        .route("/api/v1/stats", get(handlers::stats))
        // Operator list management
        .route("/api/v1/lists/blacklist", post(handlers::add_to_blacklist))
        .route("/api/v1/lists/whitelist", post(handlers::add_to_whitelist))
        // Add state + request logging
        .layer(Extension(state))
        .layer(axum::middleware::from_fn(middleware::logging))
}

/// Start the gateway server
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> Result<(), std::io::Error> {
    let app = build_router(state);

    tracing::info!("urlgate gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
