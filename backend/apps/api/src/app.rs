//! Router construction

use axum::{
    Json, Router,
    http::{Method, Uri},
    routing::get,
};
use kernel::error::app_error::AppError;
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::harness;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("No route for {}", uri.path())).with_action("Try GET /health")
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::method_not_allowed(format!("{} is not supported on {}", method, uri.path()))
}

/// Routes owned by the service itself
pub fn build_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

/// Service routes plus test hooks, wrapped in request tracing
pub fn build_app() -> Router {
    harness::register(build_router()).layer(TraceLayer::new_for_http())
}
