//! The fixed list of regions a ranking pass runs over.

pub mod error;

use crate::catalog::error::CatalogError;
use crate::types::coordinate::Coordinate;
use crate::types::region::RegionEntry;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use std::io::{self, Read};
use std::path::Path;

/// Regions shipped with the crate: thirty Indian cities and districts.
pub static BUNDLED_CATALOG_CSV: &str = include_str!("../../fixtures/india_regions.csv");

const REGION_COLUMN: &str = "region";
const LATITUDE_COLUMN: &str = "latitude";
const LONGITUDE_COLUMN: &str = "longitude";

/// An ordered list of named coordinates.
///
/// Loading is best-effort: rows with a blank name, a missing or non-numeric coordinate,
/// or a coordinate outside the valid range are dropped without comment. Names are kept
/// exactly as written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionCatalog {
    entries: Vec<RegionEntry>,
}

impl RegionCatalog {
    pub fn new(entries: Vec<RegionEntry>) -> Self {
        Self { entries }
    }

    /// Reads a catalog file. A file that does not exist is an empty catalog.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let catalog = Self::from_reader(bytes.as_slice());
                debug!("Loaded {} regions from {}", catalog.len(), path.display());
                Ok(catalog)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No region catalog at {}, using an empty one", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(CatalogError::Read(path.to_path_buf(), e)),
        }
    }

    /// Parses CSV with a `region,latitude,longitude` header (column order is free).
    pub fn from_reader<R: Read>(reader: R) -> Self {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(reader);

        let Ok(headers) = reader.headers().cloned() else {
            return Self::default();
        };
        let column = |name: &str| headers.iter().position(|h| h == name);
        let (Some(region), Some(latitude), Some(longitude)) = (
            column(REGION_COLUMN),
            column(LATITUDE_COLUMN),
            column(LONGITUDE_COLUMN),
        ) else {
            return Self::default();
        };

        let entries = reader
            .records()
            .filter_map(Result::ok)
            .filter_map(|record| parse_row(&record, region, latitude, longitude))
            .collect();

        Self { entries }
    }

    /// The catalog embedded in the crate.
    pub fn bundled() -> Self {
        Self::from_reader(BUNDLED_CATALOG_CSV.as_bytes())
    }

    /// Writes the bundled catalog to `path` unless a file is already there.
    /// Returns whether it wrote.
    pub async fn install_bundled(path: impl AsRef<Path>) -> Result<bool, CatalogError> {
        let path = path.as_ref();
        if tokio::fs::try_exists(path)
            .await
            .map_err(|e| CatalogError::Read(path.to_path_buf(), e))?
        {
            return Ok(false);
        }
        info!("Writing bundled region catalog to {}", path.display());
        tokio::fs::write(path, BUNDLED_CATALOG_CSV)
            .await
            .map_err(|e| CatalogError::Write(path.to_path_buf(), e))?;
        Ok(true)
    }

    pub fn entries(&self) -> &[RegionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RegionEntry> {
        self.entries.iter()
    }
}

impl FromIterator<RegionEntry> for RegionCatalog {
    fn from_iter<I: IntoIterator<Item = RegionEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn parse_row(
    record: &StringRecord,
    region: usize,
    latitude: usize,
    longitude: usize,
) -> Option<RegionEntry> {
    let name = record.get(region).filter(|name| !name.trim().is_empty())?;
    let latitude = record.get(latitude)?.trim().parse::<f64>().ok()?;
    let longitude = record.get(longitude)?.trim().parse::<f64>().ok()?;
    let coordinate = Coordinate::new(latitude, longitude).ok()?;
    Some(RegionEntry::new(name, coordinate))
}
