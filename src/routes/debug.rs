use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Check if services are working
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let generator = &state.route_generator;
    let mut status = json!({
        "status": "ok",
        "checks": {
            "templates": generator.templates().len(),
            "bikes": generator.bikes().len(),
        }
    });

    if generator.templates().is_empty() || generator.bikes().is_empty() {
        status["status"] = json!("error");
    }

    match generator.cache() {
        Some(cache) => {
            let stats = cache.get_stats().await;
            status["checks"]["cache"] = json!({
                "backend": cache.backend_name(),
                "entries": stats.entries,
                "hit_rate": stats.hit_rate,
            });
        }
        None => {
            status["checks"]["cache"] = json!("disabled");
        }
    }

    Json(status)
}
