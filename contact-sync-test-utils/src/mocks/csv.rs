//! CSV output kept in memory

use contact_sync_core::Result;
use contact_sync_core::error::IoError;
use contact_sync_core::traits::CsvOutput;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Collects appended rows per file
#[derive(Clone)]
pub struct MemoryCsvOutput {
    root: PathBuf,
    state: Arc<Mutex<CsvState>>,
}

#[derive(Default)]
struct CsvState {
    files: HashMap<PathBuf, Vec<Vec<String>>>,
    order: Vec<PathBuf>,
    fail_after_rows: Option<usize>,
    rows_written: usize,
}

impl Default for MemoryCsvOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCsvOutput {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/exports"),
            state: Arc::new(Mutex::new(CsvState::default())),
        }
    }

    /// Let `count` rows be written, then fail every following append
    pub fn fail_after_rows(&self, count: usize) {
        self.state.lock().unwrap().fail_after_rows = Some(count);
    }

    /// File names in creation order
    pub fn filenames(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .order
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect()
    }

    /// Rows of a file, header included
    pub fn rows(&self, filename: &str) -> Vec<Vec<String>> {
        self.state
            .lock()
            .unwrap()
            .files
            .get(&self.root.join(filename))
            .cloned()
            .unwrap_or_default()
    }
}

impl CsvOutput for MemoryCsvOutput {
    fn file_path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    fn append_row(&self, path: &Path, row: &[String]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state
            .fail_after_rows
            .is_some_and(|limit| state.rows_written >= limit)
        {
            return Err(IoError::from_std(std::io::Error::from(
                std::io::ErrorKind::PermissionDenied,
            ))
            .with_path(path)
            .into());
        }
        state.rows_written += 1;

        if !state.files.contains_key(path) {
            state.order.push(path.to_path_buf());
        }
        state
            .files
            .entry(path.to_path_buf())
            .or_default()
            .push(row.to_vec());
        Ok(())
    }
}
