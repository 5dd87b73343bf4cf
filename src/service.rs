//! The single-point query flow: validate, estimate, log, re-rank.

use crate::catalog::RegionCatalog;
use crate::config::SolarConfig;
use crate::data_dir::DataDir;
use crate::error::SolarError;
use crate::persistence::{CsvQueryLog, CsvSnapshotStore, QueryLog, SnapshotStore};
use crate::pipeline::RankingPipeline;
use crate::sources::{NominatimClient, OpenMeteoClient, ReverseGeocoder, WeatherSource};
use crate::types::coordinate::Coordinate;
use crate::types::energy_result::EnergyResult;
use crate::types::ranked_snapshot::RankedSnapshot;
use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Raw user input for one query. Latitude and longitude are the strings as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QueryInput {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub region: Option<String>,
}

impl QueryInput {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: Some(latitude.into()),
            longitude: Some(longitude.into()),
            region: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub result: EnergyResult,
    pub top_regions: RankedSnapshot,
}

pub struct SolarService<
    W = OpenMeteoClient,
    G = NominatimClient,
    L = CsvQueryLog,
    S = CsvSnapshotStore,
> {
    pipeline: RankingPipeline<W, G>,
    catalog_path: PathBuf,
    query_log: L,
    snapshots: S,
}

impl SolarService {
    /// Prepares `data_dir` (creating it and installing the bundled catalog if needed) and
    /// wires a live pipeline to CSV files inside it.
    pub async fn open(config: &SolarConfig, data_dir: &DataDir) -> Result<Self, SolarError> {
        data_dir.ensure().await?;
        data_dir.ensure_catalog().await?;
        info!("Using data directory {}", data_dir.root().display());

        Ok(Self::new(
            RankingPipeline::from_config(config)?,
            data_dir.catalog_path(),
            CsvQueryLog::new(data_dir.query_log_path()),
            CsvSnapshotStore::new(data_dir.snapshot_path()),
        ))
    }
}

impl<W, G, L, S> SolarService<W, G, L, S>
where
    W: WeatherSource,
    G: ReverseGeocoder,
    L: QueryLog,
    S: SnapshotStore,
{
    pub fn new(
        pipeline: RankingPipeline<W, G>,
        catalog_path: impl Into<PathBuf>,
        query_log: L,
        snapshots: S,
    ) -> Self {
        Self {
            pipeline,
            catalog_path: catalog_path.into(),
            query_log,
            snapshots,
        }
    }

    pub fn pipeline(&self) -> &RankingPipeline<W, G> {
        &self.pipeline
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Handles one query end to end.
    ///
    /// Invalid input is rejected before anything is fetched or written. Otherwise the
    /// result for today is appended to the query log, and the ranked snapshot is rebuilt
    /// from the catalog as it currently is on disk.
    pub async fn submit(&self, input: &QueryInput) -> Result<QueryOutcome, SolarError> {
        let coordinate = Coordinate::parse(input.latitude.as_deref(), input.longitude.as_deref())?;
        let today = self.pipeline.today();

        let result = self
            .pipeline
            .compute_single()
            .coordinate(coordinate)
            .date(today)
            .maybe_region_name(input.region.as_deref())
            .call()
            .await;
        self.query_log.append(&result).await?;

        let catalog = RegionCatalog::load(&self.catalog_path).await?;
        let top_regions = self
            .pipeline
            .refresh_snapshot(&catalog, today, &self.snapshots)
            .await?;

        Ok(QueryOutcome {
            result,
            top_regions,
        })
    }

    /// The last snapshot written, without recomputing anything.
    pub async fn latest_snapshot(&self) -> Result<RankedSnapshot, SolarError> {
        Ok(self.snapshots.load().await?)
    }
}
