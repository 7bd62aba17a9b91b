// src/handlers/mod.rs
pub mod api;
pub mod pages;
pub mod ui;

use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::AppState;

/// Every route plus request logging, CORS and shared state
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(ui::ui_routes())
        .merge(api::api_routes())
        .layer(axum::middleware::from_fn(
            crate::middleware::logging::request_logging_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}
