//! Memoizing adapters over the upstream sources.
//!
//! Both gateways round the coordinate to four decimals, consult their own
//! [`BoundedCache`](crate::cache::BoundedCache), make at most one bounded call upstream on
//! a miss, and always hand back a value.

pub mod geo_name;
pub mod weather;

pub use geo_name::{GeoNameGateway, UNKNOWN_REGION};
pub use weather::WeatherGateway;
