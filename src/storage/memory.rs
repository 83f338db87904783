use crate::error::EngineResult;
use crate::models::{BranchFinancialConfig, LogisticsEntry};

use super::Store;

/// A [`Store`] that keeps everything in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Option<Vec<LogisticsEntry>>,
    configs: Option<Vec<BranchFinancialConfig>>,
    logo: Option<Vec<u8>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `entries`.
    pub fn with_entries(entries: Vec<LogisticsEntry>) -> Self {
        Self {
            entries: Some(entries),
            ..Self::default()
        }
    }
}

impl Store for MemoryStore {
    fn load_entries(&self) -> EngineResult<Option<Vec<LogisticsEntry>>> {
        Ok(self.entries.clone())
    }

    fn save_entries(&mut self, entries: &[LogisticsEntry]) -> EngineResult<()> {
        self.entries = Some(entries.to_vec());
        Ok(())
    }

    fn load_configs(&self) -> EngineResult<Option<Vec<BranchFinancialConfig>>> {
        Ok(self.configs.clone())
    }

    fn save_configs(&mut self, configs: &[BranchFinancialConfig]) -> EngineResult<()> {
        self.configs = Some(configs.to_vec());
        Ok(())
    }

    fn load_logo(&self) -> EngineResult<Option<Vec<u8>>> {
        Ok(self.logo.clone())
    }

    fn save_logo(&mut self, logo: &[u8]) -> EngineResult<()> {
        self.logo = Some(logo.to_vec());
        Ok(())
    }

    fn remove_logo(&mut self) -> EngineResult<()> {
        self.logo = None;
        Ok(())
    }
}
