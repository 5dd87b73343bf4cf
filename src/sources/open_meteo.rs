//! Open-Meteo forecast client.

use crate::sources::error::SourceError;
use crate::sources::WeatherSource;
use crate::types::coordinate::Coordinate;
use crate::types::weather_sample::WeatherSample;
use log::info;
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;

pub const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Temperature reported when the payload has no current temperature.
const DEFAULT_TEMPERATURE: f64 = 25.0;

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    endpoint: String,
}

impl OpenMeteoClient {
    /// Wraps a (shared) HTTP client. Timeouts and headers are the client's business.
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl WeatherSource for OpenMeteoClient {
    fn current_weather(
        &self,
        at: Coordinate,
    ) -> impl Future<Output = Result<WeatherSample, SourceError>> + Send {
        async move {
            let url = &self.endpoint;
            info!("Requesting forecast for {} from {}", at, url);

            let response = self
                .client
                .get(url)
                .query(&[
                    ("latitude", at.latitude().to_string()),
                    ("longitude", at.longitude().to_string()),
                    ("hourly", "cloudcover".to_string()),
                    ("current_weather", "true".to_string()),
                ])
                .send()
                .await
                .map_err(|e| SourceError::NetworkRequest(url.clone(), e))?;

            let response = response
                .error_for_status()
                .map_err(|e| SourceError::from_status(url, e))?;

            let payload: ForecastPayload = response
                .json()
                .await
                .map_err(|e| SourceError::Decode(url.clone(), e))?;

            Ok(WeatherSample::from(payload))
        }
    }
}

/// The subset of the forecast response this crate reads.
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastPayload {
    current_weather: Option<CurrentWeather>,
    hourly: Option<HourlyCloudCover>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct HourlyCloudCover {
    cloudcover: Option<Vec<f64>>,
}

impl From<ForecastPayload> for WeatherSample {
    fn from(payload: ForecastPayload) -> Self {
        let temperature = payload
            .current_weather
            .and_then(|c| c.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE);
        // A missing series reads as a single clear hour.
        let cloud_cover = payload
            .hourly
            .and_then(|h| h.cloudcover)
            .unwrap_or_else(|| vec![0.0]);
        WeatherSample::from_readings(temperature, &cloud_cover)
    }
}
