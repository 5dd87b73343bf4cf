//! Upstream services the gateways call through.
//!
//! The traits are the seam tests use to replace the network; [`OpenMeteoClient`] and
//! [`NominatimClient`] are the production implementations.

pub mod error;
pub mod nominatim;
pub mod open_meteo;

use crate::sources::error::SourceError;
use crate::types::coordinate::Coordinate;
use crate::types::weather_sample::WeatherSample;
use std::future::Future;

pub use nominatim::NominatimClient;
pub use open_meteo::OpenMeteoClient;

/// Something that can report current weather for a coordinate.
pub trait WeatherSource: Send + Sync {
    /// Current temperature and the mean hourly cloud cover of the forecast window.
    fn current_weather(
        &self,
        at: Coordinate,
    ) -> impl Future<Output = Result<WeatherSample, SourceError>> + Send;
}

/// Something that can name the place a coordinate falls in.
pub trait ReverseGeocoder: Send + Sync {
    /// The most specific usable place name, or `None` when the service knows the point but
    /// has no city, town, village or state for it.
    fn place_name(
        &self,
        at: Coordinate,
    ) -> impl Future<Output = Result<Option<String>, SourceError>> + Send;
}
