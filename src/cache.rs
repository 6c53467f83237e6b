//! Resolved-distance cache keyed by rounded coordinate pairs.
//!
//! Coordinates are rounded to 4 decimal places (about 11 m) before keying,
//! so nearby lookups hit the same entry. Expired entries count as misses
//! and are overwritten in place on the next upsert rather than deleted
//! eagerly. Only external-provider results are ever written here; geodesic
//! fallbacks are cheap to recompute and not authoritative.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::types::GeoPoint;

/// Default time-to-live for provider results.
pub const DEFAULT_TTL_DAYS: i64 = 7;

/// 4 decimal places of coordinate precision.
const KEY_SCALE: f64 = 10_000.0;

/// Identity of a cached pair: rounded origin/destination plus the provider
/// that produced the result. Scaled-integer rounding keeps `-0.00004` and
/// `0.00004` in the same bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    origin: (i64, i64),
    dest: (i64, i64),
    provider: String,
}

impl CacheKey {
    pub fn new(origin: GeoPoint, dest: GeoPoint, provider: &str) -> Self {
        Self {
            origin: (round_e4(origin.latitude), round_e4(origin.longitude)),
            dest: (round_e4(dest.latitude), round_e4(dest.longitude)),
            provider: provider.to_owned(),
        }
    }
}

fn round_e4(value: f64) -> i64 {
    (value * KEY_SCALE).round() as i64
}

/// A previously resolved distance, as the provider reported it.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceCacheEntry {
    pub distance_meters: f64,
    pub duration_seconds: i64,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache store unavailable: {0}")]
    Unavailable(String),
}

/// Cache port. Implementations must make `upsert` idempotent: concurrent
/// writes for the same key resolve to a single updated entry, never a
/// duplicate.
pub trait DistanceCache {
    /// Live entry for the rounded pair, or `None` on a miss. Entries past
    /// their expiry are misses.
    fn lookup(&self, origin: GeoPoint, dest: GeoPoint, provider: &str)
        -> Option<DistanceCacheEntry>;

    /// Create or refresh the entry for the rounded pair.
    fn upsert(
        &self,
        origin: GeoPoint,
        dest: GeoPoint,
        provider: &str,
        distance_meters: f64,
        duration_seconds: i64,
        ttl_days: i64,
    ) -> Result<(), CacheError>;
}

/// Mutex-guarded in-memory cache.
#[derive(Debug, Default)]
pub struct InMemoryDistanceCache {
    entries: Mutex<HashMap<CacheKey, DistanceCacheEntry>>,
}

impl InMemoryDistanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, live or expired.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DistanceCache for InMemoryDistanceCache {
    fn lookup(
        &self,
        origin: GeoPoint,
        dest: GeoPoint,
        provider: &str,
    ) -> Option<DistanceCacheEntry> {
        let key = CacheKey::new(origin, dest, provider);
        let entries = self.entries.lock().ok()?;
        entries
            .get(&key)
            .filter(|entry| entry.expires_at > Utc::now())
            .cloned()
    }

    fn upsert(
        &self,
        origin: GeoPoint,
        dest: GeoPoint,
        provider: &str,
        distance_meters: f64,
        duration_seconds: i64,
        ttl_days: i64,
    ) -> Result<(), CacheError> {
        let key = CacheKey::new(origin, dest, provider);
        let entry = DistanceCacheEntry {
            distance_meters,
            duration_seconds,
            expires_at: Utc::now() + Duration::days(ttl_days),
        };

        let mut entries = self
            .entries
            .lock()
            .map_err(|err| CacheError::Unavailable(err.to_string()))?;
        entries.insert(key, entry);
        Ok(())
    }
}
