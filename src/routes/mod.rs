pub mod catalog;
pub mod debug;
pub mod gpx;
pub mod loop_route;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::error::AppError;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/templates", get(catalog::list_templates))
        .route("/bikes", get(catalog::list_bikes))
        .route("/routes/ring", post(loop_route::create_ring))
        .route("/routes/plan", post(loop_route::plan_route))
        .route("/routes/gpx", post(loop_route::download_gpx))
        .route("/gpx/track-points", post(gpx::track_points))
        .route("/gpx/metadata", post(gpx::inject_metadata))
        .route("/debug/health", get(debug::health_check))
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No endpoint at {}", uri.path()))
}
