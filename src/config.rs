//! Tunables for building a pipeline.

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::energy::SOLAR_CONSTANT;
use crate::error::ConfigError;
use crate::sources::nominatim::{DEFAULT_ZOOM, NOMINATIM_REVERSE_URL};
use crate::sources::open_meteo::OPEN_METEO_FORECAST_URL;
use crate::types::ranked_snapshot::DEFAULT_TOP_N;
use bon::Builder;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "SolarEnergyApp/1.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 8;

fn default_solar_constant() -> f64 {
    SOLAR_CONSTANT
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}
fn default_top_n() -> usize {
    DEFAULT_TOP_N
}
fn default_weather_endpoint() -> String {
    OPEN_METEO_FORECAST_URL.to_string()
}
fn default_geocode_endpoint() -> String {
    NOMINATIM_REVERSE_URL.to_string()
}
fn default_geocode_zoom() -> u8 {
    DEFAULT_ZOOM
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Everything a [`RankingPipeline`](crate::RankingPipeline) needs that is not code.
///
/// Every field has a default, so a JSON config file only needs to name what it changes.
///
/// # Examples
///
/// ```
/// use solar_rank::SolarConfig;
///
/// let config = SolarConfig::builder().cache_capacity(64).top_n(5).build();
/// assert_eq!(config.cache_capacity, 64);
/// assert_eq!(config.solar_constant, 1367.0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Builder)]
pub struct SolarConfig {
    /// W/m² at the top of the atmosphere.
    #[serde(default = "default_solar_constant")]
    #[builder(default = default_solar_constant())]
    pub solar_constant: f64,

    /// Upper bound on each upstream call, in seconds.
    #[serde(default = "default_timeout_secs")]
    #[builder(default = default_timeout_secs())]
    pub request_timeout_secs: u64,

    /// Entries per gateway cache.
    #[serde(default = "default_cache_capacity")]
    #[builder(default = default_cache_capacity())]
    pub cache_capacity: usize,

    /// Length of a ranked snapshot.
    #[serde(default = "default_top_n")]
    #[builder(default = default_top_n())]
    pub top_n: usize,

    #[serde(default = "default_weather_endpoint")]
    #[builder(default = default_weather_endpoint(), into)]
    pub weather_endpoint: String,

    #[serde(default = "default_geocode_endpoint")]
    #[builder(default = default_geocode_endpoint(), into)]
    pub geocode_endpoint: String,

    #[serde(default = "default_geocode_zoom")]
    #[builder(default = default_geocode_zoom())]
    pub geocode_zoom: u8,

    #[serde(default = "default_user_agent")]
    #[builder(default = default_user_agent(), into)]
    pub user_agent: String,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SolarConfig {
    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
