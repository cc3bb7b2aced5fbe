use crate::cache::{CacheStats, TrackCache};
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory cache backed by moka with TTL and bounded capacity.
/// All methods take `&self`; moka handles synchronization.
pub struct MemoryTrackCache {
    tracks: Cache<String, Arc<str>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryTrackCache {
    pub fn new(ttl_seconds: u64, max_capacity: u64) -> Self {
        let tracks = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        MemoryTrackCache {
            tracks,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl TrackCache for MemoryTrackCache {
    async fn get_track(&self, key: &str) -> Option<Arc<str>> {
        match self.tracks.get(key).await {
            Some(gpx) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Memory cache hit for track: {}", key);
                Some(gpx)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Memory cache miss for track: {}", key);
                None
            }
        }
    }

    async fn cache_track(&self, key: &str, gpx: &str) {
        self.tracks.insert(key.to_string(), Arc::from(gpx)).await;
        tracing::debug!("Memory cached {} bytes of GPX: {}", gpx.len(), key);
    }

    async fn get_stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let hit_rate = if hits + misses > 0 {
            (hits as f64 / (hits + misses) as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            hits,
            misses,
            hit_rate,
            entries: self.tracks.entry_count(),
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
