//! HTTP server module

mod api;
mod demo;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::AppState;
use crate::ws;

pub use api::HealthResponse;

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(demo::index))
        .route("/tag/:tag", get(demo::tag))
        .route("/number/:arg", get(demo::number))
        .route("/person/:name", get(demo::person))
        .route("/folder/:folder_id", get(demo::folder))
        .route("/post", post(demo::post_body))
        .route("/get", get(demo::query_args).post(demo::query_args))
        .route("/apppost", post(demo::post_body))
        .route("/appget", get(demo::query_args))
        .route("/api/health", get(api::health))
        .route("/echo", get(ws::echo_ws))
        .route("/ws", get(ws::presence_ws))
        .nest_service("/static", ServeDir::new("static"))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
