use crate::catalog::error::CatalogError;
use crate::catalog::RegionCatalog;
use crate::error::SolarError;
use crate::utils::{ensure_dir_exists, get_data_dir};
use std::path::{Path, PathBuf};

pub const CATALOG_FILE_NAME: &str = "india_regions.csv";
pub const QUERY_LOG_FILE_NAME: &str = "User_Query.csv";
pub const SNAPSHOT_FILE_NAME: &str = "TOP_10_REGIONS.csv";

/// The directory holding the region catalog, the query log and the ranked snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<system data dir>/solar_rank`.
    pub fn default_location() -> Result<Self, SolarError> {
        get_data_dir()
            .map(Self::new)
            .map_err(SolarError::DataDirResolution)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(CATALOG_FILE_NAME)
    }

    pub fn query_log_path(&self) -> PathBuf {
        self.root.join(QUERY_LOG_FILE_NAME)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_FILE_NAME)
    }

    /// Creates the directory if it does not exist yet.
    pub async fn ensure(&self) -> Result<(), SolarError> {
        ensure_dir_exists(&self.root)
            .await
            .map_err(|e| SolarError::DataDirCreation(self.root.clone(), e))
    }

    /// Writes the bundled catalog unless one is already present. Returns whether it wrote.
    pub async fn ensure_catalog(&self) -> Result<bool, CatalogError> {
        RegionCatalog::install_bundled(self.catalog_path()).await
    }
}
