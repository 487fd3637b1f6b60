//! Test hooks for external harnesses
//!
//! Registered exactly once, on the fully built application. Nothing here
//! touches the password pipeline.

use axum::{Json, Router, http::HeaderMap, routing::get};
use serde::Serialize;
use tower_http::cors::CorsLayer;

#[derive(Debug, Serialize)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
    /// Header names the harness sent, so it can confirm what reached us
    pub headers: Vec<String>,
}

async fn app_info(headers: HeaderMap) -> Json<AppInfo> {
    let mut names: Vec<String> = headers.keys().map(|k| k.as_str().to_string()).collect();
    names.sort();
    names.dedup();

    Json(AppInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        headers: names,
    })
}

/// Attach the harness routes and open CORS for cross-origin test runners
pub fn register(app: Router) -> Router {
    tracing::debug!("Registering test hooks");
    app.route("/_api/app-info", get(app_info))
        .layer(CorsLayer::permissive())
}
