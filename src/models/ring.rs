use crate::error::{AppError, Result};
use crate::models::GeoPoint;
use geojson::{Feature, Geometry, JsonObject, Value};
use serde::{Deserialize, Serialize};

/// Closed loop of geographic points: first element equals last, at least
/// three elements, no repeated consecutive points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GeoPoint>", into = "Vec<GeoPoint>")]
pub struct CoordinateRing {
    points: Vec<GeoPoint>,
}

impl CoordinateRing {
    pub fn new(points: Vec<GeoPoint>) -> Result<Self> {
        if points.len() < 3 {
            return Err(AppError::InvalidConfiguration(format!(
                "A ring needs at least 3 points, got {}",
                points.len()
            )));
        }
        if points.first() != points.last() {
            return Err(AppError::InvalidConfiguration(
                "Ring is not closed: first and last points differ".to_string(),
            ));
        }
        if let Some(i) = points.windows(2).position(|w| w[0] == w[1]) {
            return Err(AppError::InvalidConfiguration(format!(
                "Ring repeats a point at index {}",
                i + 1
            )));
        }
        Ok(CoordinateRing { points })
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Start and end of the loop
    pub fn start(&self) -> GeoPoint {
        self.points[0]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points strictly between the opening and closing start point.
    pub fn waypoint_count(&self) -> usize {
        self.points.len() - 2
    }

    /// `[lon, lat]` pairs in ring order, as the directions API expects them.
    pub fn to_lon_lat_pairs(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(GeoPoint::to_lon_lat).collect()
    }

    /// Straight-line length of the loop in kilometers.
    pub fn length_km(&self) -> f64 {
        path_length_km(&self.points)
    }

    /// GeoJSON `LineString` feature for map overlays.
    pub fn to_geojson(&self) -> Feature {
        let coordinates = self
            .points
            .iter()
            .map(|p| vec![p.lon, p.lat])
            .collect::<Vec<_>>();

        let mut properties = JsonObject::new();
        properties.insert("closed".to_string(), true.into());
        properties.insert(
            "waypoint_count".to_string(),
            self.waypoint_count().into(),
        );

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(coordinates))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

impl TryFrom<Vec<GeoPoint>> for CoordinateRing {
    type Error = AppError;

    fn try_from(points: Vec<GeoPoint>) -> Result<Self> {
        CoordinateRing::new(points)
    }
}

impl From<CoordinateRing> for Vec<GeoPoint> {
    fn from(ring: CoordinateRing) -> Self {
        ring.points
    }
}

/// Sum of haversine legs along a path, in kilometers
pub fn path_length_km(path: &[GeoPoint]) -> f64 {
    path.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}
