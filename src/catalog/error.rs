use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read region catalog '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to write region catalog '{0}'")]
    Write(PathBuf, #[source] std::io::Error),
}
