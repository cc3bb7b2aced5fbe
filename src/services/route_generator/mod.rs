pub mod geometric_loop;
pub mod ride_plan;

use crate::cache::{self, TrackCache};
use crate::error::Result;
use crate::models::route::PlanRouteRequest;
use crate::models::{
    BikeCatalog, CoordinateRing, GeoPoint, PlannedRoute, RoutingOptions, TemplateCatalog,
};
use crate::services::directions::DirectionsProvider;
use crate::services::gpx;

use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

/// A generated loop together with the nominal radius it was built from.
#[derive(Debug, Clone)]
pub struct GeneratedLoop {
    pub ring: CoordinateRing,
    pub radius_km: f64,
}

/// Plans motorcycle loops: template lookup, ring geometry, directions,
/// GPX post-processing and the fuel/rest estimate.
pub struct RouteGenerator {
    templates: TemplateCatalog,
    bikes: BikeCatalog,
    directions: Arc<dyn DirectionsProvider>,
    cache: Option<Arc<dyn TrackCache>>,
}

impl RouteGenerator {
    pub fn new(
        templates: TemplateCatalog,
        bikes: BikeCatalog,
        directions: Arc<dyn DirectionsProvider>,
        cache: Option<Arc<dyn TrackCache>>,
    ) -> Self {
        RouteGenerator {
            templates,
            bikes,
            directions,
            cache,
        }
    }

    pub fn templates(&self) -> &TemplateCatalog {
        &self.templates
    }

    pub fn bikes(&self) -> &BikeCatalog {
        &self.bikes
    }

    pub fn cache(&self) -> Option<&Arc<dyn TrackCache>> {
        self.cache.as_ref()
    }

    /// Build the waypoint loop for a named template. No network access.
    pub fn generate_ring(
        &self,
        start: GeoPoint,
        template_name: &str,
        duration_hours: f64,
    ) -> Result<GeneratedLoop> {
        let template = self.templates.get(template_name)?;
        let ring = geometric_loop::generate(start, template, duration_hours)?;

        Ok(GeneratedLoop {
            ring,
            radius_km: geometric_loop::loop_radius_km(template, duration_hours),
        })
    }

    /// Fetch the road-snapped GPX for a ring, consulting the track cache first.
    pub async fn fetch_track(&self, ring: &CoordinateRing, options: RoutingOptions) -> Result<String> {
        let key = cache::track_cache_key(ring, self.directions.profile(), options);

        if let Some(ref cache) = self.cache {
            if let Some(gpx) = cache.get_track(&key).await {
                tracing::info!(key = %key, "Track cache hit, skipping directions call");
                return Ok(gpx.to_string());
            }
        }

        let gpx = self.directions.fetch_gpx(ring, options).await?;

        if let Some(ref cache) = self.cache {
            cache.cache_track(&key, &gpx).await;
        }

        Ok(gpx)
    }

    /// Plan a complete ride. Fails as a whole: no partial route is returned
    /// when any step errors.
    pub async fn plan_route(&self, request: &PlanRouteRequest) -> Result<PlannedRoute> {
        let template = self.templates.get(&request.template)?;
        let bike = self.bikes.get(&request.bike)?;

        let ring = geometric_loop::generate(request.start, template, request.duration_hours)?;

        tracing::info!(
            template = %template.name,
            bike = %bike.name,
            waypoints = ring.waypoint_count(),
            duration_h = request.duration_hours,
            "Planning loop: template={}, bike={}, {} waypoints, {:.1}h",
            template.name,
            bike.name,
            ring.waypoint_count(),
            request.duration_hours
        );

        let raw_gpx = self.fetch_track(&ring, request.options).await?;
        let track = gpx::extract_track_points(&raw_gpx)?;
        let enhanced_gpx = gpx::inject_metadata(&raw_gpx, &request.metadata(&bike.name))?;
        let plan = ride_plan::plan_ride(bike, &ring, &track, request.duration_hours);

        tracing::info!(
            track_points = track.len(),
            distance_km = %format!("{:.1}", plan.estimated_distance_km),
            fuel_stops = plan.fuel_stops,
            comfort_stops = plan.comfort_stops,
            "Loop planned: {} track points, {:.1}km",
            track.len(),
            plan.estimated_distance_km
        );

        Ok(PlannedRoute {
            id: Uuid::new_v4(),
            generated_at: OffsetDateTime::now_utc(),
            template: template.name.clone(),
            bike: bike.name.clone(),
            ring,
            track,
            gpx: enhanced_gpx,
            file_name: gpx::export_file_name(&request.ride_name),
            plan,
        })
    }
}
