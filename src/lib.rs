pub mod astronomy;
mod cache;
mod catalog;
mod clock;
mod config;
mod data_dir;
pub mod energy;
mod error;
mod gateways;
mod persistence;
mod pipeline;
mod service;
mod sources;
mod types;
mod utils;

#[cfg(test)]
mod test_support;

pub use error::{ConfigError, SolarError, ValidationError};
pub use pipeline::RankingPipeline;
pub use service::{QueryInput, QueryOutcome, SolarService};

pub use cache::{BoundedCache, DEFAULT_CACHE_CAPACITY};
pub use catalog::{RegionCatalog, BUNDLED_CATALOG_CSV};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{SolarConfig, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use data_dir::{DataDir, CATALOG_FILE_NAME, QUERY_LOG_FILE_NAME, SNAPSHOT_FILE_NAME};
pub use gateways::{GeoNameGateway, WeatherGateway, UNKNOWN_REGION};
pub use persistence::{CsvQueryLog, CsvSnapshotStore, QueryLog, SnapshotStore};
pub use sources::{NominatimClient, OpenMeteoClient, ReverseGeocoder, WeatherSource};
pub use sources::nominatim::NOMINATIM_REVERSE_URL;
pub use sources::open_meteo::OPEN_METEO_FORECAST_URL;

pub use types::coordinate::{CacheKey, Coordinate};
pub use types::energy_result::{EnergyResult, RESULT_COLUMNS};
pub use types::fetched::Fetched;
pub use types::ranked_snapshot::{RankedSnapshot, DEFAULT_TOP_N};
pub use types::region::RegionEntry;
pub use types::weather_sample::WeatherSample;

pub use catalog::error::CatalogError;
pub use persistence::error::PersistenceError;
pub use sources::error::SourceError;
