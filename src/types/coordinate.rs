//! Geographic coordinates and the rounded keys used to memoize lookups against them.

use crate::error::ValidationError;
use std::fmt;

/// Number of decimal places kept when a coordinate is turned into a cache key.
///
/// Four places is roughly 11 m at the equator, enough to collapse near-duplicate queries.
pub const CACHE_KEY_DECIMALS: i32 = 4;

const KEY_SCALE: f64 = 10_000.0;

/// A point on the earth in decimal degrees.
///
/// Latitude lies in `[-90, 90]` and longitude in `[-180, 180]`. Use [`Coordinate::new`]
/// to build a checked value.
///
/// # Examples
///
/// ```
/// use solar_rank::Coordinate;
///
/// let delhi = Coordinate::new(28.6139, 77.2090).unwrap();
/// assert_eq!(delhi.latitude(), 28.6139);
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate after checking both components are finite and in range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parses raw form input. Both values are trimmed; an empty value counts as missing.
    pub fn parse(latitude: Option<&str>, longitude: Option<&str>) -> Result<Self, ValidationError> {
        let latitude = parse_component(latitude)?;
        let longitude = parse_component(longitude)?;
        Self::new(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// The key this coordinate memoizes under.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::from(*self)
    }
}

fn parse_component(raw: Option<&str>) -> Result<f64, ValidationError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ValidationError::MissingCoordinate);
    }
    raw.parse::<f64>()
        .map_err(|_| ValidationError::InvalidNumber(raw.to_string()))
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// A coordinate rounded to [`CACHE_KEY_DECIMALS`] places, stored as scaled integers so it
/// can be hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    latitude_e4: i64,
    longitude_e4: i64,
}

impl CacheKey {
    /// The rounded coordinate this key stands for. Outbound requests use this value.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude_e4 as f64 / KEY_SCALE,
            longitude: self.longitude_e4 as f64 / KEY_SCALE,
        }
    }
}

impl From<Coordinate> for CacheKey {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            latitude_e4: (coordinate.latitude * KEY_SCALE).round() as i64,
            longitude_e4: (coordinate.longitude * KEY_SCALE).round() as i64,
        }
    }
}
