use crate::cache::BoundedCache;
use crate::sources::{NominatimClient, ReverseGeocoder};
use crate::types::coordinate::{CacheKey, Coordinate};
use crate::types::fetched::Fetched;
use log::{debug, warn};
use std::time::Duration;

/// Name used when a coordinate cannot be resolved.
pub const UNKNOWN_REGION: &str = "Unknown";

/// Cached reverse geocoding. Keeps its own cache, separate from the weather one.
pub struct GeoNameGateway<G = NominatimClient> {
    geocoder: G,
    cache: BoundedCache<CacheKey, Fetched<String>>,
    timeout: Duration,
}

impl<G: ReverseGeocoder> GeoNameGateway<G> {
    pub fn new(geocoder: G, cache: BoundedCache<CacheKey, Fetched<String>>, timeout: Duration) -> Self {
        Self {
            geocoder,
            cache,
            timeout,
        }
    }

    /// Human-readable name for the area around `at`, or [`UNKNOWN_REGION`].
    pub async fn resolve(&self, at: Coordinate) -> String {
        self.resolve_detailed(at).await.into_inner()
    }

    /// A service that answers without a usable name still counts as
    /// [`Fetched::Live`]; only failures are [`Fetched::Fallback`].
    pub async fn resolve_detailed(&self, at: Coordinate) -> Fetched<String> {
        let key = at.cache_key();
        if let Some(cached) = self.cache.get(&key).await {
            debug!("Region name cache hit for {}", key.coordinate());
            return cached;
        }

        let rounded = key.coordinate();
        let fetched = match tokio::time::timeout(self.timeout, self.geocoder.place_name(rounded)).await
        {
            Ok(Ok(Some(name))) => Fetched::Live(name),
            Ok(Ok(None)) => Fetched::Live(UNKNOWN_REGION.to_string()),
            Ok(Err(e)) => {
                warn!("Reverse geocoding {} failed: {}", rounded, e);
                Fetched::Fallback(UNKNOWN_REGION.to_string())
            }
            Err(_) => {
                warn!("Reverse geocoding {} timed out after {:?}", rounded, self.timeout);
                Fetched::Fallback(UNKNOWN_REGION.to_string())
            }
        };

        self.cache.insert(key, fetched).await
    }

    pub fn cache(&self) -> &BoundedCache<CacheKey, Fetched<String>> {
        &self.cache
    }
}
