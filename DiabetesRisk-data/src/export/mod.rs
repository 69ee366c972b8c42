//! Report artifact storage
//!
//! Only one exported report is kept: saving under the same file name replaces
//! the previous artifact.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Export error
#[derive(Debug, Error)]
pub enum ExportError {
    /// Filesystem failure
    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File name is empty or tries to leave the export directory
    #[error("Invalid export file name: {0}")]
    InvalidFileName(String),
}

/// Writes exported report artifacts into a single directory
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    /// Create a store rooted at `dir`; the directory is created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Export directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path an artifact with this name is written to
    pub fn path_for(&self, file_name: &str) -> Result<PathBuf, ExportError> {
        let name = Path::new(file_name);
        let is_plain_name = name.components().count() == 1
            && name.file_name().map(|n| n == name.as_os_str()).unwrap_or(false);

        if file_name.is_empty() || !is_plain_name {
            return Err(ExportError::InvalidFileName(file_name.to_string()));
        }

        Ok(self.dir.join(name))
    }

    /// Write the artifact, replacing any previous one with the same name
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        let target = self.path_for(file_name)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        // Write next to the target and rename so readers never see a partial file
        let staging = self.dir.join(format!(".{}.partial", file_name));
        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &target).await?;

        info!("Exported report to {}", target.display());
        Ok(target)
    }

    /// Read back a previously exported artifact
    pub async fn load(&self, file_name: &str) -> Result<Option<Vec<u8>>, ExportError> {
        let target = self.path_for(file_name)?;
        match tokio::fs::read(&target).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No exported report at {}", target.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
