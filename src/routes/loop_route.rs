use crate::error::{AppError, Result};
use crate::models::route::{PlanRouteRequest, RingRequest, RingResponse};
use crate::models::PlannedRoute;
use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// POST /routes/ring
/// Generate the waypoint loop only, without calling the directions service
pub async fn create_ring(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RingRequest>,
) -> Result<Json<RingResponse>> {
    request.validate().map_err(AppError::InvalidRequest)?;

    let generated = state.route_generator.generate_ring(
        request.start,
        &request.template,
        request.duration_hours,
    )?;

    Ok(Json(RingResponse {
        ring: generated.ring.to_lon_lat_pairs(),
        radius_km: generated.radius_km,
        waypoint_count: generated.ring.waypoint_count(),
        geojson: generated.ring.to_geojson(),
    }))
}

/// POST /routes/plan
/// Full loop plan: ring, road-snapped track, GPX with metadata, ride estimate
pub async fn plan_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanRouteRequest>,
) -> Result<Json<PlannedRoute>> {
    let planned = plan(&state, &request).await?;
    Ok(Json(planned))
}

/// POST /routes/gpx
/// Same as `/routes/plan` but answers with the GPX file itself
pub async fn download_gpx(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanRouteRequest>,
) -> Result<Response> {
    let planned = plan(&state, &request).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/gpx+xml".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", planned.file_name),
            ),
        ],
        planned.gpx,
    )
        .into_response())
}

async fn plan(state: &AppState, request: &PlanRouteRequest) -> Result<PlannedRoute> {
    request.validate().map_err(AppError::InvalidRequest)?;

    tracing::info!(
        lat = request.start.lat,
        lon = request.start.lon,
        template = %request.template,
        bike = %request.bike,
        duration_h = request.duration_hours,
        "Loop plan request: ({:.4}, {:.4}), template={}, bike={}, {:.1}h",
        request.start.lat,
        request.start.lon,
        request.template,
        request.bike,
        request.duration_hours
    );

    state.route_generator.plan_route(request).await
}
