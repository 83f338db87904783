//! JSON file store, one file per persisted collection.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};
use crate::models::{BranchFinancialConfig, LogisticsEntry};

use super::Store;

/// File holding the entry collection.
pub const ENTRIES_FILE: &str = "logistics_data.json";

/// File holding the branch configurations.
pub const CONFIGS_FILE: &str = "financial_configs.json";

/// File holding the raw logo bytes.
pub const LOGO_FILE: &str = "custom_logo.bin";

/// A [`Store`] backed by files in a data directory.
///
/// The directory is created on first save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_bytes(&self, file: &str) -> EngineResult<Option<Vec<u8>>> {
        match fs::read(self.dir.join(file)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(file, e)),
        }
    }

    fn write_bytes(&self, file: &str, bytes: &[u8]) -> EngineResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| storage_error(file, e))?;
        fs::write(self.dir.join(file), bytes).map_err(|e| storage_error(file, e))
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> EngineResult<Option<T>> {
        let Some(bytes) = self.read_bytes(file)? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| storage_error(file, e))
    }

    fn write_json<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> EngineResult<()> {
        let json = serde_json::to_vec_pretty(value).map_err(|e| storage_error(file, e))?;
        self.write_bytes(file, &json)
    }
}

fn storage_error(file: &str, error: impl std::fmt::Display) -> EngineError {
    EngineError::Storage {
        resource: file.to_string(),
        message: error.to_string(),
    }
}

impl Store for JsonFileStore {
    fn load_entries(&self) -> EngineResult<Option<Vec<LogisticsEntry>>> {
        self.read_json(ENTRIES_FILE)
    }

    fn save_entries(&mut self, entries: &[LogisticsEntry]) -> EngineResult<()> {
        self.write_json(ENTRIES_FILE, entries)
    }

    fn load_configs(&self) -> EngineResult<Option<Vec<BranchFinancialConfig>>> {
        self.read_json(CONFIGS_FILE)
    }

    fn save_configs(&mut self, configs: &[BranchFinancialConfig]) -> EngineResult<()> {
        self.write_json(CONFIGS_FILE, configs)
    }

    fn load_logo(&self) -> EngineResult<Option<Vec<u8>>> {
        self.read_bytes(LOGO_FILE)
    }

    fn save_logo(&mut self, logo: &[u8]) -> EngineResult<()> {
        self.write_bytes(LOGO_FILE, logo)
    }

    fn remove_logo(&mut self) -> EngineResult<()> {
        match fs::remove_file(self.dir.join(LOGO_FILE)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(LOGO_FILE, e)),
        }
    }
}
