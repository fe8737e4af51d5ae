//! HTTP adapter
//!
//! Depends only on core/. Exposes the section store and health
//! reporting via the Axum web framework.

pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::core::services::Services;

pub use handlers::*;

/// Build the application router
pub fn router(services: Arc<Services>) -> Router {
    Router::new()
        // Health endpoints
        .route("/__health", get(health_handler))
        .route("/__gtg", get(gtg_handler))
        // Section endpoints
        .route("/transformers/sections", get(sections_handler))
        .route("/transformers/sections/__count", get(count_handler))
        .route("/transformers/sections/__ids", get(ids_handler))
        .route("/transformers/sections/__reload", post(reload_handler))
        .route("/transformers/sections/:uuid", get(section_by_uuid_handler))
        // Add middleware
        .layer(axum_middleware::from_fn(middleware::log_request))
        .layer(CorsLayer::permissive())
        // Add shared state
        .with_state(services)
}
