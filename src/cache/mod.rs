mod memory;

pub use memory::MemoryTrackCache;

use crate::models::{CoordinateRing, RoutingOptions};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Cache of directions GPX responses.
///
/// A GPX track only depends on the ring, the routing profile and the avoid
/// flags, so repeated plans of the same loop skip the directions call.
#[async_trait]
pub trait TrackCache: Send + Sync {
    async fn get_track(&self, key: &str) -> Option<Arc<str>>;
    async fn cache_track(&self, key: &str, gpx: &str);
    async fn get_stats(&self) -> CacheStats;
    fn backend_name(&self) -> &'static str;
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub entries: u64,
}

/// Generate a cache key for a directions request.
/// Coordinates are rounded to 5 decimal places (~1m), which absorbs float
/// noise without merging distinct loops.
pub fn track_cache_key(ring: &CoordinateRing, profile: &str, options: RoutingOptions) -> String {
    let mut hasher = DefaultHasher::new();

    for point in ring.points() {
        ((point.lat * 100_000.0).round() as i64).hash(&mut hasher);
        ((point.lon * 100_000.0).round() as i64).hash(&mut hasher);
    }
    profile.hash(&mut hasher);
    options.hash(&mut hasher);

    format!("track:{:x}", hasher.finish())
}
