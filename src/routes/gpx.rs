use crate::error::Result;
use crate::models::route::{InjectMetadataRequest, TrackPointsResponse};
use crate::services::gpx;
use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};

/// POST /gpx/track-points
/// Body is raw GPX text
pub async fn track_points(body: String) -> Result<Json<TrackPointsResponse>> {
    let points = gpx::extract_track_points(&body)?;
    tracing::debug!(count = points.len(), "Extracted {} track points", points.len());

    Ok(Json(TrackPointsResponse {
        count: points.len(),
        points,
    }))
}

/// POST /gpx/metadata
pub async fn inject_metadata(Json(request): Json<InjectMetadataRequest>) -> Result<Response> {
    let enhanced = gpx::inject_metadata(&request.gpx, &request.metadata)?;

    Ok(([(header::CONTENT_TYPE, "application/gpx+xml")], enhanced).into_response())
}
