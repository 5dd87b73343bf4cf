use crate::persistence::error::PersistenceError;
use crate::persistence::{QueryLog, SnapshotStore};
use crate::types::energy_result::{EnergyResult, RESULT_COLUMNS};
use crate::types::ranked_snapshot::RankedSnapshot;
use csv::{ReaderBuilder, WriterBuilder};
use log::{debug, info};
use std::fs::{File, OpenOptions};
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tokio::task;

/// Appends results to a CSV file. The header goes in when the file is first created.
#[derive(Debug)]
pub struct CsvQueryLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvQueryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every row logged so far, oldest first. A log that does not exist yet is empty.
    pub async fn read_all(&self) -> Result<Vec<EnergyResult>, PersistenceError> {
        let path = self.path.clone();
        task::spawn_blocking(move || read_rows(&path)).await?
    }
}

impl QueryLog for CsvQueryLog {
    fn append(&self, result: &EnergyResult) -> impl Future<Output = Result<(), PersistenceError>> + Send {
        let row = result.clone();
        async move {
            let _guard = self.write_lock.lock().await;
            let path = self.path.clone();
            task::spawn_blocking(move || append_row(&path, &row)).await?
        }
    }
}

fn append_row(path: &Path, row: &EnergyResult) -> Result<(), PersistenceError> {
    let is_new = !path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| PersistenceError::Io(path.to_path_buf(), e))?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    if is_new {
        debug!("Starting query log at {}", path.display());
        writer
            .write_record(RESULT_COLUMNS)
            .map_err(|e| PersistenceError::Csv(path.to_path_buf(), e))?;
    }
    writer
        .serialize(row)
        .map_err(|e| PersistenceError::Csv(path.to_path_buf(), e))?;
    writer
        .flush()
        .map_err(|e| PersistenceError::Io(path.to_path_buf(), e))
}

/// Keeps the latest ranked snapshot in one CSV file, rewritten in full on every replace.
///
/// The new file is written next to the old one and renamed over it, so readers never see
/// a half-written snapshot.
#[derive(Debug, Clone)]
pub struct CsvSnapshotStore {
    path: PathBuf,
}

impl CsvSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for CsvSnapshotStore {
    fn replace(
        &self,
        snapshot: &RankedSnapshot,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send {
        let rows = snapshot.entries().to_vec();
        let path = self.path.clone();
        async move {
            let written = rows.len();
            task::spawn_blocking({
                let path = path.clone();
                move || write_snapshot(&path, &rows)
            })
            .await??;
            info!("Wrote ranked snapshot of {} regions to {}", written, path.display());
            Ok(())
        }
    }

    fn load(&self) -> impl Future<Output = Result<RankedSnapshot, PersistenceError>> + Send {
        let path = self.path.clone();
        async move {
            let rows = task::spawn_blocking(move || read_rows(&path)).await??;
            Ok(RankedSnapshot::from_ranked(rows))
        }
    }
}

fn write_snapshot(path: &Path, rows: &[EnergyResult]) -> Result<(), PersistenceError> {
    let staging = staging_path(path);
    let file = File::create(&staging).map_err(|e| PersistenceError::Io(staging.clone(), e))?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer
        .write_record(RESULT_COLUMNS)
        .map_err(|e| PersistenceError::Csv(staging.clone(), e))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| PersistenceError::Csv(staging.clone(), e))?;
    }
    writer
        .flush()
        .map_err(|e| PersistenceError::Io(staging.clone(), e))?;
    drop(writer);

    std::fs::rename(&staging, path).map_err(|e| PersistenceError::Io(path.to_path_buf(), e))
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn read_rows(path: &Path) -> Result<Vec<EnergyResult>, PersistenceError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(PersistenceError::Io(path.to_path_buf(), e)),
    };
    ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file)
        .deserialize()
        .collect::<Result<Vec<EnergyResult>, _>>()
        .map_err(|e| PersistenceError::Csv(path.to_path_buf(), e))
}
