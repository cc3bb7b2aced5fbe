use crate::constants::{
    DEFAULT_DIRECTIONS_TIMEOUT_SECS, DEFAULT_ORS_PROFILE, MAX_DIRECTIONS_COORDINATES,
    ORS_DIRECTIONS_BASE_URL,
};
use crate::error::{AppError, Result};
use crate::models::{CoordinateRing, RoutingOptions};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Turns a waypoint loop into a road-snapped GPX document.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn fetch_gpx(&self, ring: &CoordinateRing, options: RoutingOptions) -> Result<String>;

    /// Routing profile, part of the track cache key
    fn profile(&self) -> &str;
}

/// How the client authenticates with the directions API.
#[derive(Clone, Debug)]
pub enum AuthMode {
    /// OpenRouteService default: raw key in the `Authorization` header.
    ApiKeyHeader,
    /// Proxy mode: send `Authorization: Bearer` header.
    BearerHeader,
}

#[derive(Clone)]
pub struct OpenRouteServiceClient {
    client: Client,
    api_key: String,
    base_url: String,
    profile: String,
    auth_mode: AuthMode,
}

impl OpenRouteServiceClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_config(
            api_key,
            ORS_DIRECTIONS_BASE_URL.to_string(),
            DEFAULT_ORS_PROFILE.to_string(),
            AuthMode::ApiKeyHeader,
            Duration::from_secs(DEFAULT_DIRECTIONS_TIMEOUT_SECS),
        )
    }

    pub fn with_config(
        api_key: String,
        base_url: String,
        profile: String,
        auth_mode: AuthMode,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(OpenRouteServiceClient {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            profile,
            auth_mode,
        })
    }

    fn gpx_url(&self) -> String {
        format!("{}/{}/gpx", self.base_url, self.profile)
    }
}

#[async_trait]
impl DirectionsProvider for OpenRouteServiceClient {
    /// POST the ring as `[lon, lat]` pairs and return the GPX body as text.
    async fn fetch_gpx(&self, ring: &CoordinateRing, options: RoutingOptions) -> Result<String> {
        if ring.len() > MAX_DIRECTIONS_COORDINATES {
            return Err(AppError::InvalidRequest(format!(
                "Maximum {} coordinates allowed, ring has {}",
                MAX_DIRECTIONS_COORDINATES,
                ring.len()
            )));
        }

        let body = GpxRequestBody::new(ring, options);

        tracing::debug!(
            coordinates = ring.len(),
            profile = %self.profile,
            avoid_tolls = options.avoid_tolls,
            avoid_highways = options.avoid_highways,
            "Directions API request: {} coordinates, profile {}",
            ring.len(),
            self.profile
        );

        let auth_value = match self.auth_mode {
            AuthMode::ApiKeyHeader => self.api_key.clone(),
            AuthMode::BearerHeader => format!("Bearer {}", self.api_key),
        };

        let response = self
            .client
            .post(self.gpx_url())
            .header(AUTHORIZATION, auth_value)
            .header(ACCEPT, "application/gpx+xml")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::DirectionsApi(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::DirectionsApi(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                coordinates = ring.len(),
                "Directions API HTTP error {}: {}",
                status,
                text
            );
            return Err(AppError::DirectionsApi(format!("HTTP {}: {}", status, text)));
        }

        if !text.contains("<gpx") {
            tracing::warn!(
                bytes = text.len(),
                "Directions API returned a non-GPX body ({} bytes)",
                text.len()
            );
            return Err(AppError::DirectionsApi(
                "Response is not a GPX document".to_string(),
            ));
        }

        tracing::debug!(bytes = text.len(), "Directions API response: {} bytes of GPX", text.len());
        Ok(text)
    }

    fn profile(&self) -> &str {
        &self.profile
    }
}

// OpenRouteService request types

#[derive(Debug, Serialize)]
struct GpxRequestBody {
    coordinates: Vec<[f64; 2]>,
    instructions: bool,
    elevation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<AvoidOptions>,
}

#[derive(Debug, Serialize)]
struct AvoidOptions {
    avoid_features: Vec<&'static str>,
}

impl GpxRequestBody {
    fn new(ring: &CoordinateRing, options: RoutingOptions) -> Self {
        let mut avoid_features = Vec::new();
        if options.avoid_tolls {
            avoid_features.push("tollways");
        }
        if options.avoid_highways {
            avoid_features.push("highways");
        }

        GpxRequestBody {
            coordinates: ring.to_lon_lat_pairs(),
            instructions: true,
            elevation: true,
            options: (!avoid_features.is_empty()).then_some(AvoidOptions { avoid_features }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;

    fn ring() -> CoordinateRing {
        CoordinateRing::new(vec![
            GeoPoint::from_raw(42.0, -71.0),
            GeoPoint::from_raw(42.1, -71.0),
            GeoPoint::from_raw(42.0, -70.9),
            GeoPoint::from_raw(42.0, -71.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_defaults_to_api_key_header() {
        let client = OpenRouteServiceClient::new("ors-test".to_string()).unwrap();
        assert_eq!(
            client.gpx_url(),
            "https://api.openrouteservice.org/v2/directions/driving-car/gpx"
        );
        assert_eq!(client.profile(), "driving-car");
        assert!(matches!(client.auth_mode, AuthMode::ApiKeyHeader));
    }

    #[test]
    fn test_with_config_bearer_mode() {
        let client = OpenRouteServiceClient::with_config(
            "my-key".to_string(),
            "http://localhost:4000/v2/directions/".to_string(),
            "cycling-road".to_string(),
            AuthMode::BearerHeader,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.gpx_url(),
            "http://localhost:4000/v2/directions/cycling-road/gpx"
        );
        assert!(matches!(client.auth_mode, AuthMode::BearerHeader));
    }

    #[test]
    fn test_request_body_lon_lat_order() {
        let body = serde_json::to_value(GpxRequestBody::new(&ring(), RoutingOptions::default()))
            .unwrap();
        assert_eq!(body["coordinates"][1][0], -71.0);
        assert_eq!(body["coordinates"][1][1], 42.1);
        assert_eq!(body["instructions"], true);
        assert!(body.get("options").is_none());
    }

    #[test]
    fn test_request_body_avoid_features() {
        let options = RoutingOptions {
            avoid_tolls: true,
            avoid_highways: true,
        };
        let body = serde_json::to_value(GpxRequestBody::new(&ring(), options)).unwrap();
        assert_eq!(
            body["options"]["avoid_features"],
            serde_json::json!(["tollways", "highways"])
        );
    }
}
