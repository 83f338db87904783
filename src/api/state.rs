//! Application state for the fleet payroll API.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::ledger::Ledger;

/// Shared application state.
///
/// Every handler goes through the one ledger; the mutex keeps writes
/// serialized and reads after a write see it.
#[derive(Clone)]
pub struct AppState {
    ledger: Arc<Mutex<Ledger>>,
}

impl AppState {
    /// Creates a new application state owning `ledger`.
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Returns the shared ledger.
    pub fn ledger(&self) -> &Mutex<Ledger> {
        &self.ledger
    }
}
