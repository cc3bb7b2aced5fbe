use crate::models::{CoordinateRing, GeoPoint};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Upper bound on a single ride request
const MAX_DURATION_HOURS: f64 = 24.0;

/// Free-form ride details written into the GPX metadata block verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RideMetadata {
    pub ride_name: String,
    pub bike_model: String,
    #[serde(default)]
    pub emergency_contact: String,
    #[serde(default)]
    pub emergency_phone: String,
}

/// Pass-through flags for the directions service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct RoutingOptions {
    #[serde(default)]
    pub avoid_tolls: bool,
    #[serde(default)]
    pub avoid_highways: bool,
}

/// Fuel and rest estimate for one bike on one loop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RidePlan {
    pub estimated_distance_km: f64,
    pub estimated_fuel_l: f64,
    pub range_km: f64,
    pub fuel_stops: u32,
    pub comfort_stops: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedRoute {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub template: String,
    pub bike: String,
    /// Waypoint loop sent to the directions service
    pub ring: CoordinateRing,
    /// Road-snapped track points extracted from the GPX
    pub track: Vec<GeoPoint>,
    /// GPX text with ride metadata injected
    pub gpx: String,
    pub file_name: String,
    pub plan: RidePlan,
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct RingRequest {
    pub start: GeoPoint,
    pub template: String,
    pub duration_hours: f64,
}

impl RingRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_start(&self.start)?;
        validate_duration(self.duration_hours)
    }
}

#[derive(Debug, Serialize)]
pub struct RingResponse {
    /// `[lon, lat]` pairs, start point first and last
    pub ring: Vec<[f64; 2]>,
    pub radius_km: f64,
    pub waypoint_count: usize,
    pub geojson: geojson::Feature,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanRouteRequest {
    pub start: GeoPoint,
    pub template: String,
    pub bike: String,
    pub duration_hours: f64,
    #[serde(default = "default_ride_name")]
    pub ride_name: String,
    #[serde(default)]
    pub emergency_contact: String,
    #[serde(default)]
    pub emergency_phone: String,
    #[serde(flatten)]
    pub options: RoutingOptions,
}

fn default_ride_name() -> String {
    "My Route".to_string()
}

impl PlanRouteRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_start(&self.start)?;
        validate_duration(self.duration_hours)?;
        if self.ride_name.trim().is_empty() {
            return Err("ride_name must not be empty".to_string());
        }
        Ok(())
    }

    pub fn metadata(&self, bike_model: &str) -> RideMetadata {
        RideMetadata {
            ride_name: self.ride_name.clone(),
            bike_model: bike_model.to_string(),
            emergency_contact: self.emergency_contact.clone(),
            emergency_phone: self.emergency_phone.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InjectMetadataRequest {
    pub gpx: String,
    pub metadata: RideMetadata,
}

#[derive(Debug, Serialize)]
pub struct TrackPointsResponse {
    pub count: usize,
    pub points: Vec<GeoPoint>,
}

fn validate_start(start: &GeoPoint) -> Result<(), String> {
    GeoPoint::new(start.lat, start.lon)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn validate_duration(duration_hours: f64) -> Result<(), String> {
    if !duration_hours.is_finite() || duration_hours <= 0.0 || duration_hours > MAX_DURATION_HOURS
    {
        return Err(format!(
            "duration_hours must be greater than 0 and at most {}",
            MAX_DURATION_HOURS
        ));
    }
    Ok(())
}
