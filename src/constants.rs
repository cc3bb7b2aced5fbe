//! Stable application-wide constants.
//!
//! Values here are algorithm coefficients for loop geometry and ride planning,
//! plus default fallbacks for env-var-based configuration. Changing any of the
//! geometry coefficients changes every generated ring.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Directions service defaults ---

/// OpenRouteService directions endpoint; the profile and `/gpx` are appended.
pub const ORS_DIRECTIONS_BASE_URL: &str = "https://api.openrouteservice.org/v2/directions";
/// Profile used when `ORS_PROFILE` is absent.
pub const DEFAULT_ORS_PROFILE: &str = "driving-car";
/// Hard limit on coordinates per directions request.
pub const MAX_DIRECTIONS_COORDINATES: usize = 50;
/// Request timeout for the directions client. Overridden by `DIRECTIONS_TIMEOUT_SECS`.
pub const DEFAULT_DIRECTIONS_TIMEOUT_SECS: u64 = 30;

// --- Track cache defaults ---

/// Directions responses are cached for 1 hour. Overridden by `TRACK_CACHE_TTL`.
pub const DEFAULT_TRACK_CACHE_TTL_SECONDS: u64 = 3_600;
/// Overridden by `TRACK_CACHE_MAX_ENTRIES`.
pub const DEFAULT_TRACK_CACHE_MAX_ENTRIES: u64 = 500;

// --- Loop geometry ---
// radius_km = duration_h * LOOP_RADIUS_KM_PER_HOUR * scenic_factor
// num_points = floor(LOOP_BASE_WAYPOINTS * waypoint_factor)

/// Loop radius (km) per hour of riding, before the template's scenic factor.
pub const LOOP_RADIUS_KM_PER_HOUR: f64 = 25.0;
/// Perimeter waypoints before the template's waypoint factor.
pub const LOOP_BASE_WAYPOINTS: f64 = 8.0;
/// A ring needs at least this many distinct perimeter points.
pub const MIN_LOOP_WAYPOINTS: usize = 3;
/// Guards against runaway allocations from absurd waypoint factors.
pub const MAX_LOOP_WAYPOINTS: usize = 1_000;
/// Radius variation is `base + amplitude * sin(2 * angle)`, giving a lobed
/// loop between 0.1x and 1.3x the nominal radius.
pub const RADIUS_VARIATION_BASE: f64 = 0.7;
pub const RADIUS_VARIATION_AMPLITUDE: f64 = 0.6;
/// Kilometers per degree of latitude (equirectangular approximation).
pub const KM_PER_DEGREE: f64 = 111.0;

// --- Ride planning ---

/// Road distance over straight-line ring length, used when no track is available.
pub const ROAD_WINDING_FACTOR: f64 = 1.3;
/// Fraction of the tank range considered usable before a fuel stop (20% reserve).
pub const USABLE_RANGE_FRACTION: f64 = 0.8;

// --- GPX ---

/// Literal tag used as the insertion point for ride metadata.
pub const METADATA_ANCHOR: &str = "<metadata>";
/// File name used when a ride name sanitizes to nothing.
pub const DEFAULT_EXPORT_STEM: &str = "route";
