//! Where results go after they are computed.
//!
//! The pipeline only talks to the [`QueryLog`] and [`SnapshotStore`] traits. The CSV
//! implementations in [`csv_store`] are what the service uses by default.

pub mod csv_store;
pub mod error;

use crate::persistence::error::PersistenceError;
use crate::types::energy_result::EnergyResult;
use crate::types::ranked_snapshot::RankedSnapshot;
use std::future::Future;

pub use csv_store::{CsvQueryLog, CsvSnapshotStore};

/// Append-only record of single-point queries.
pub trait QueryLog: Send + Sync {
    fn append(&self, result: &EnergyResult) -> impl Future<Output = Result<(), PersistenceError>> + Send;
}

/// Holds the latest ranked snapshot; each write replaces the previous one entirely.
pub trait SnapshotStore: Send + Sync {
    fn replace(
        &self,
        snapshot: &RankedSnapshot,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;

    /// The stored snapshot, or an empty one if nothing has been stored yet.
    fn load(&self) -> impl Future<Output = Result<RankedSnapshot, PersistenceError>> + Send;
}
