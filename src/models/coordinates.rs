use crate::error::{AppError, Result};
use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
///
/// Accepts `latitude`/`longitude` as aliases on input so map-tap payloads from
/// the mobile client deserialize directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude")]
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(AppError::InvalidConfiguration(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(AppError::InvalidConfiguration(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lon
            )));
        }
        Ok(GeoPoint { lat, lon })
    }

    /// Build a point without range checks. Generated ring offsets and
    /// leniently scanned track points go through here.
    pub fn from_raw(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    /// `[lon, lat]`, the order directions services and GeoJSON expect.
    pub fn to_lon_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    /// Great-circle distance in kilometers
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        Haversine.distance(Point::from(*self), Point::from(*other)) / 1000.0
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lon, p.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(42.3889, -71.1294).is_ok());
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(91.0, 0.0).is_err()); // Invalid lat
        assert!(GeoPoint::new(0.0, -180.5).is_err()); // Invalid lon
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_from_raw_skips_validation() {
        let p = GeoPoint::from_raw(95.0, 200.0);
        assert_eq!(p.lat, 95.0);
        assert!(!p.is_valid());
    }

    #[test]
    fn test_lon_lat_order() {
        let p = GeoPoint::new(42.3889, -71.1294).unwrap();
        assert_eq!(p.to_lon_lat(), [-71.1294, 42.3889]);
    }

    #[test]
    fn test_distance_calculation() {
        let boston = GeoPoint::new(42.3601, -71.0589).unwrap();
        let nyc = GeoPoint::new(40.7128, -74.0060).unwrap();

        // Boston to New York is approximately 306 km
        let distance = boston.distance_to(&nyc);
        assert!((distance - 306.0).abs() < 10.0, "got {}", distance);
        assert_eq!(boston.distance_to(&boston), 0.0);
    }

    #[test]
    fn test_deserialize_long_field_names() {
        let p: GeoPoint =
            serde_json::from_str(r#"{"latitude": 42.3889, "longitude": -71.1294}"#).unwrap();
        assert_eq!(p, GeoPoint::from_raw(42.3889, -71.1294));

        let short: GeoPoint = serde_json::from_str(r#"{"lat": 1.5, "lon": 2.5}"#).unwrap();
        assert_eq!(short, GeoPoint::from_raw(1.5, 2.5));
    }
}
