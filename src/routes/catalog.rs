use crate::models::{BikeProfile, RouteTemplate};
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<RouteTemplate>,
}

#[derive(Debug, Serialize)]
pub struct BikeSummary {
    #[serde(flatten)]
    pub profile: BikeProfile,
    pub range_km: f64,
}

#[derive(Debug, Serialize)]
pub struct BikesResponse {
    pub bikes: Vec<BikeSummary>,
}

/// GET /templates
pub async fn list_templates(State(state): State<Arc<AppState>>) -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: state.route_generator.templates().all().to_vec(),
    })
}

/// GET /bikes
/// Bike profiles with their full-tank range
pub async fn list_bikes(State(state): State<Arc<AppState>>) -> Json<BikesResponse> {
    let bikes = state
        .route_generator
        .bikes()
        .all()
        .iter()
        .map(|bike| BikeSummary {
            range_km: bike.range_km(),
            profile: bike.clone(),
        })
        .collect();

    Json(BikesResponse { bikes })
}
