use crate::constants::{ROAD_WINDING_FACTOR, USABLE_RANGE_FRACTION};
use crate::models::ring::path_length_km;
use crate::models::{BikeProfile, CoordinateRing, GeoPoint, RidePlan};

/// Estimate fuel and rest stops for `bike` on a loop.
///
/// Uses the road-snapped track length when a track with at least two points
/// is available, otherwise the straight-line ring length stretched by
/// [`ROAD_WINDING_FACTOR`].
pub fn plan_ride(
    bike: &BikeProfile,
    ring: &CoordinateRing,
    track: &[GeoPoint],
    duration_hours: f64,
) -> RidePlan {
    let estimated_distance_km = if track.len() >= 2 {
        path_length_km(track)
    } else {
        ring.length_km() * ROAD_WINDING_FACTOR
    };

    let range_km = bike.range_km();
    let usable_range_km = range_km * USABLE_RANGE_FRACTION;

    RidePlan {
        estimated_distance_km,
        estimated_fuel_l: estimated_distance_km * bike.fuel_consumption_l_per_100km / 100.0,
        range_km,
        fuel_stops: stops_needed(estimated_distance_km, usable_range_km),
        comfort_stops: stops_needed(duration_hours, bike.comfort_stop_interval_h),
    }
}

/// Breaks needed to cover `total` in legs of at most `leg`. The final leg
/// ends at the start point, so it never needs a stop.
fn stops_needed(total: f64, leg: f64) -> u32 {
    if total <= 0.0 || leg <= 0.0 {
        return 0;
    }
    ((total / leg).ceil() as u32).saturating_sub(1)
}
