//! Distance resolution: cache, then provider, then geodesic fallback.
//!
//! The resolver is the only component that speaks to the external provider
//! and the cache together. Provider failures of any kind (unconfigured,
//! timeout, transport error, unroutable pair) degrade to the geodesic
//! estimate and are reflected only in the result's `source`; they are never
//! surfaced to the caller.

use tracing::{debug, warn};

use crate::cache::{DEFAULT_TTL_DAYS, DistanceCache};
use crate::geodesic::{self, AreaType};
use crate::provider::{DistanceProvider, EXTERNAL_PROVIDER};
use crate::types::{DistanceSource, GeoPoint};

const METERS_PER_MILE: f64 = 1609.344;

/// A real-world distance/time estimate for one leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDistance {
    pub distance_miles: f64,
    pub duration_minutes: i64,
    pub source: DistanceSource,
}

pub struct DistanceResolver<C> {
    cache: C,
    provider: Option<Box<dyn DistanceProvider>>,
}

impl<C: DistanceCache> DistanceResolver<C> {
    /// Resolver without an external provider; everything beyond the cache
    /// falls back to geodesic estimates.
    pub fn new(cache: C) -> Self {
        Self {
            cache,
            provider: None,
        }
    }

    pub fn with_provider(cache: C, provider: Box<dyn DistanceProvider>) -> Self {
        Self {
            cache,
            provider: Some(provider),
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn resolve(&self, origin: GeoPoint, dest: GeoPoint) -> ResolvedDistance {
        let provider_name = self
            .provider
            .as_ref()
            .map_or(EXTERNAL_PROVIDER, |provider| provider.name());

        if let Some(entry) = self.cache.lookup(origin, dest, provider_name) {
            debug!(provider = provider_name, "distance cache hit");
            return ResolvedDistance {
                distance_miles: entry.distance_meters / METERS_PER_MILE,
                duration_minutes: ceil_minutes(entry.duration_seconds),
                source: DistanceSource::Cache,
            };
        }

        if let Some(provider) = &self.provider {
            match provider.matrix(&[origin], &[dest]) {
                Ok(rows) => {
                    let element = rows.first().and_then(|row| row.first().copied()).flatten();
                    if let Some(element) = element {
                        if let Err(err) = self.cache.upsert(
                            origin,
                            dest,
                            provider.name(),
                            element.distance_meters,
                            element.duration_seconds,
                            DEFAULT_TTL_DAYS,
                        ) {
                            warn!(error = %err, "distance cache write failed");
                        }
                        return ResolvedDistance {
                            distance_miles: element.distance_meters / METERS_PER_MILE,
                            duration_minutes: ceil_minutes(element.duration_seconds),
                            source: DistanceSource::Provider,
                        };
                    }
                    warn!("provider returned no routable element, using geodesic estimate");
                }
                Err(err) => {
                    warn!(error = %err, "distance provider unavailable, using geodesic estimate");
                }
            }
        }

        let miles = geodesic::distance_miles(origin, dest);
        ResolvedDistance {
            distance_miles: miles,
            duration_minutes: geodesic::estimate_travel_minutes(miles, AreaType::Suburban),
            source: DistanceSource::Geodesic,
        }
    }
}

fn ceil_minutes(seconds: i64) -> i64 {
    (seconds + 59) / 60
}
