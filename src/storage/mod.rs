//! Persistence port for the ledger.
//!
//! The [`Store`] trait abstracts where the entry collection, the branch
//! configurations and the company logo live. [`MemoryStore`] keeps them in
//! process; [`JsonFileStore`] writes them to a data directory.

mod json_file;
mod memory;

pub use json_file::{CONFIGS_FILE, ENTRIES_FILE, JsonFileStore, LOGO_FILE};
pub use memory::MemoryStore;

use crate::error::EngineResult;
use crate::models::{BranchFinancialConfig, LogisticsEntry};

/// Storage for everything the ledger persists.
///
/// Loads return `Ok(None)` when nothing has been saved yet.
pub trait Store: Send {
    /// Loads the entry collection.
    fn load_entries(&self) -> EngineResult<Option<Vec<LogisticsEntry>>>;

    /// Replaces the entry collection.
    fn save_entries(&mut self, entries: &[LogisticsEntry]) -> EngineResult<()>;

    /// Loads the branch configurations.
    fn load_configs(&self) -> EngineResult<Option<Vec<BranchFinancialConfig>>>;

    /// Replaces the branch configurations.
    fn save_configs(&mut self, configs: &[BranchFinancialConfig]) -> EngineResult<()>;

    /// Loads the company logo.
    fn load_logo(&self) -> EngineResult<Option<Vec<u8>>>;

    /// Replaces the company logo.
    fn save_logo(&mut self, logo: &[u8]) -> EngineResult<()>;

    /// Deletes the company logo. Removing an absent logo is not an error.
    fn remove_logo(&mut self) -> EngineResult<()>;
}
