use crate::cache::BoundedCache;
use crate::sources::{OpenMeteoClient, WeatherSource};
use crate::types::coordinate::{CacheKey, Coordinate};
use crate::types::fetched::Fetched;
use crate::types::weather_sample::WeatherSample;
use log::{debug, warn};
use std::time::Duration;

/// Cached current-weather lookups.
///
/// Failures of any kind (transport, status, payload, timeout) become
/// [`WeatherSample::FALLBACK`]. Fallbacks are cached like real answers, so a failing point
/// is not retried until it is evicted.
pub struct WeatherGateway<S = OpenMeteoClient> {
    source: S,
    cache: BoundedCache<CacheKey, Fetched<WeatherSample>>,
    timeout: Duration,
}

impl<S: WeatherSource> WeatherGateway<S> {
    pub fn new(
        source: S,
        cache: BoundedCache<CacheKey, Fetched<WeatherSample>>,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            cache,
            timeout,
        }
    }

    /// Weather at `at`, real or fallback.
    pub async fn fetch(&self, at: Coordinate) -> WeatherSample {
        self.fetch_detailed(at).await.into_inner()
    }

    /// Like [`fetch`](Self::fetch) but tells real data apart from the fallback.
    pub async fn fetch_detailed(&self, at: Coordinate) -> Fetched<WeatherSample> {
        let key = at.cache_key();
        if let Some(cached) = self.cache.get(&key).await {
            debug!("Weather cache hit for {}", key.coordinate());
            return cached;
        }

        let rounded = key.coordinate();
        let fetched = match tokio::time::timeout(self.timeout, self.source.current_weather(rounded))
            .await
        {
            Ok(Ok(sample)) => Fetched::Live(sample),
            Ok(Err(e)) => {
                warn!("Weather lookup for {} failed, using fallback: {}", rounded, e);
                Fetched::Fallback(WeatherSample::FALLBACK)
            }
            Err(_) => {
                warn!(
                    "Weather lookup for {} timed out after {:?}, using fallback",
                    rounded, self.timeout
                );
                Fetched::Fallback(WeatherSample::FALLBACK)
            }
        };

        self.cache.insert(key, fetched).await
    }

    pub fn cache(&self) -> &BoundedCache<CacheKey, Fetched<WeatherSample>> {
        &self.cache
    }
}
