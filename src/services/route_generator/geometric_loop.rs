use crate::constants::{
    KM_PER_DEGREE, LOOP_BASE_WAYPOINTS, LOOP_RADIUS_KM_PER_HOUR, MAX_LOOP_WAYPOINTS,
    MIN_LOOP_WAYPOINTS, RADIUS_VARIATION_AMPLITUDE, RADIUS_VARIATION_BASE,
};
use crate::error::{AppError, Result};
use crate::models::{CoordinateRing, GeoPoint, RouteTemplate};
use std::f64::consts::PI;

/// Nominal loop radius in kilometers for a ride of `duration_hours`.
pub fn loop_radius_km(template: &RouteTemplate, duration_hours: f64) -> f64 {
    duration_hours * LOOP_RADIUS_KM_PER_HOUR * template.scenic_factor
}

/// Number of perimeter waypoints a template asks for.
pub fn loop_waypoint_count(template: &RouteTemplate) -> usize {
    (LOOP_BASE_WAYPOINTS * template.waypoint_factor).floor() as usize
}

/// Build a closed loop of waypoints around `start`.
///
/// The perimeter is a lobed ellipse rather than a circle: each waypoint's
/// distance from the start swings between 0.1x and 1.3x the nominal radius
/// with `sin(2 * angle)`, which pulls the directions service onto more
/// varied roads. The planar offsets are projected with the equirectangular
/// approximation, so longitudes blow up close to the poles; such points are
/// logged and emitted unchanged.
///
/// The output is a pure function of the inputs: the same start, template and
/// duration always give a bit-identical ring of `waypoints + 2` points.
pub fn generate(
    start: GeoPoint,
    template: &RouteTemplate,
    duration_hours: f64,
) -> Result<CoordinateRing> {
    template.validate()?;
    if !duration_hours.is_finite() || duration_hours <= 0.0 {
        return Err(AppError::InvalidConfiguration(format!(
            "Ride duration must be a positive number of hours, got {}",
            duration_hours
        )));
    }

    let radius_km = loop_radius_km(template, duration_hours);
    let num_points = loop_waypoint_count(template);
    if num_points < MIN_LOOP_WAYPOINTS {
        return Err(AppError::InvalidConfiguration(format!(
            "Template '{}' yields {} waypoints, a loop needs at least {}",
            template.name, num_points, MIN_LOOP_WAYPOINTS
        )));
    }
    if num_points > MAX_LOOP_WAYPOINTS {
        return Err(AppError::InvalidConfiguration(format!(
            "Template '{}' yields {} waypoints, at most {} are supported",
            template.name, num_points, MAX_LOOP_WAYPOINTS
        )));
    }

    let km_per_degree_lon = KM_PER_DEGREE * (start.lat * PI / 180.0).cos();

    let mut points = Vec::with_capacity(num_points + 2);
    points.push(start);

    for i in 0..num_points {
        let angle = 2.0 * PI * i as f64 / num_points as f64;
        let radius_variation = radius_km
            * (RADIUS_VARIATION_BASE + RADIUS_VARIATION_AMPLITUDE * (2.0 * angle).sin());

        let dx = radius_variation * angle.cos();
        let dy = radius_variation * angle.sin();

        let lat = start.lat + dy / KM_PER_DEGREE;
        let lon = start.lon + dx / km_per_degree_lon;

        let waypoint = GeoPoint::from_raw(lat, lon);
        if !waypoint.is_valid() {
            tracing::warn!(
                index = i,
                lat,
                lon,
                start_lat = start.lat,
                "Loop waypoint {} left the valid coordinate range ({}, {})",
                i,
                lat,
                lon
            );
        }
        points.push(waypoint);
    }

    points.push(start); // Close the loop

    tracing::debug!(
        template = %template.name,
        radius_km,
        waypoints = num_points,
        "Generated loop: {} waypoints, radius {:.1}km",
        num_points,
        radius_km
    );

    CoordinateRing::new(points)
}
