//! Nominatim reverse-geocoding client.

use crate::sources::error::SourceError;
use crate::sources::ReverseGeocoder;
use crate::types::coordinate::Coordinate;
use log::info;
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;

pub const NOMINATIM_REVERSE_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Zoom 10 asks Nominatim for city-level detail.
pub const DEFAULT_ZOOM: u8 = 10;

#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    endpoint: String,
    zoom: u8,
}

impl NominatimClient {
    /// Nominatim's usage policy requires an identifying `User-Agent`; set it on `client`.
    pub fn new(client: Client, endpoint: impl Into<String>, zoom: u8) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            zoom,
        }
    }
}

impl ReverseGeocoder for NominatimClient {
    fn place_name(
        &self,
        at: Coordinate,
    ) -> impl Future<Output = Result<Option<String>, SourceError>> + Send {
        async move {
            let url = &self.endpoint;
            info!("Reverse geocoding {} via {}", at, url);

            let response = self
                .client
                .get(url)
                .query(&[
                    ("format", "json".to_string()),
                    ("lat", at.latitude().to_string()),
                    ("lon", at.longitude().to_string()),
                    ("zoom", self.zoom.to_string()),
                ])
                .send()
                .await
                .map_err(|e| SourceError::NetworkRequest(url.clone(), e))?;

            let response = response
                .error_for_status()
                .map_err(|e| SourceError::from_status(url, e))?;

            let payload: ReversePayload = response
                .json()
                .await
                .map_err(|e| SourceError::Decode(url.clone(), e))?;

            Ok(payload.place_name())
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReversePayload {
    address: Option<Address>,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
}

impl ReversePayload {
    /// First non-empty of city, town, village, state.
    pub(crate) fn place_name(self) -> Option<String> {
        let address = self.address.unwrap_or_default();
        [address.city, address.town, address.village, address.state]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
    }
}
