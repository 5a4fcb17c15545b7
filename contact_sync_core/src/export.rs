//! CSV export files
//!
//! Every row is appended with its own open/write/close cycle so rows written
//! before a failure stay on disk.

use crate::error::{IoError, Result};
use crate::traits::CsvOutput;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Writes export files below a fixed directory
#[derive(Debug, Clone)]
pub struct CsvFileWriter {
    export_dir: PathBuf,
}

impl CsvFileWriter {
    /// Create a writer for the given export directory
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    /// Directory export files are written to
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}

impl CsvOutput for CsvFileWriter {
    fn file_path(&self, filename: &str) -> PathBuf {
        self.export_dir.join(filename)
    }

    fn append_row(&self, path: &Path, row: &[String]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| IoError::from_std(e).with_path(parent))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| IoError::from_std(e).with_path(path))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(row)?;
        writer.flush().map_err(|e| IoError::from_std(e).with_path(path))?;

        Ok(())
    }
}
