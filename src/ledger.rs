//! The entry ledger: the single owner of persisted state.
//!
//! A [`Ledger`] wraps a [`Store`] and the engine configuration. Every
//! operation loads what it needs from the store, computes, and saves, so two
//! ledgers over the same directory see each other's writes.
//!
//! Load failures are logged and treated as "nothing saved yet"; save
//! failures are returned to the caller.

use serde::Serialize;
use tracing::{info, warn};

use crate::calculation::{
    ComplianceReport, Dashboard, FinancialReport, RankedDriver, ReportTotals, audit_compliance,
    calculate_financial_report, dashboard, rank_by_overtime, report_totals, summary_line,
};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::ingestion::{ImportFile, ImportOutcome, export_csv, ingest_batch};
use crate::models::{
    BranchFinancialConfig, ConfigBook, ConfigEdit, EntryFilter, LogisticsEntry, Period,
    available_periods, branches, companies,
};
use crate::storage::Store;

/// Caller feedback for one import batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    /// How the batch ended.
    pub outcome: ImportOutcome,
    /// Rows accepted.
    pub new_records: usize,
    /// Rows discarded as duplicates.
    pub duplicates: usize,
    /// Non-blocking validation messages.
    pub warnings: Vec<String>,
    /// Size of the collection after the import.
    pub total_entries: usize,
}

/// Report totals together with their one-line rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Column totals.
    pub totals: ReportTotals,
    /// The summary line.
    pub text: String,
}

/// Owns the entry collection, the branch configurations and the logo.
pub struct Ledger {
    store: Box<dyn Store>,
    config: ConfigLoader,
}

impl Ledger {
    /// Creates a ledger over `store`.
    pub fn new(store: impl Store + 'static, config: ConfigLoader) -> Self {
        Self {
            store: Box::new(store),
            config,
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    fn load_entries(&self) -> Vec<LogisticsEntry> {
        match self.store.load_entries() {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Failed to load entries, starting empty");
                Vec::new()
            }
        }
    }

    fn load_configs(&self) -> ConfigBook {
        match self.store.load_configs() {
            Ok(configs) => configs.unwrap_or_default().into_iter().collect(),
            Err(e) => {
                warn!(error = %e, "Failed to load branch configurations, starting empty");
                ConfigBook::new()
            }
        }
    }

    /// Returns the entries matching `filter`, in insertion order.
    pub fn entries(&self, filter: &EntryFilter) -> Vec<LogisticsEntry> {
        filter.apply(&self.load_entries())
    }

    /// Imports a batch of files for `period`.
    ///
    /// New entries are appended and saved only when the batch imported at
    /// least one row. A decoding error in any file commits nothing.
    pub fn import(&mut self, files: &[ImportFile], period: &Period) -> EngineResult<ImportReport> {
        let mut entries = self.load_entries();
        let batch = ingest_batch(files, period, &entries)?;
        let outcome = batch.outcome();

        if outcome == ImportOutcome::Imported {
            entries.extend(batch.entries);
            self.store.save_entries(&entries)?;
            info!(
                period = %period,
                new_records = batch.new_records,
                total_entries = entries.len(),
                "Import committed"
            );
        }

        Ok(ImportReport {
            outcome,
            new_records: batch.new_records,
            duplicates: batch.duplicates,
            warnings: batch.warnings,
            total_entries: entries.len(),
        })
    }

    /// Deletes every entry.
    pub fn clear(&mut self) -> EngineResult<()> {
        self.store.save_entries(&[])?;
        info!("Entry collection cleared");
        Ok(())
    }

    /// Distinct periods, newest first.
    pub fn periods(&self) -> Vec<Period> {
        available_periods(&self.load_entries())
    }

    /// Distinct companies, sorted.
    pub fn companies(&self) -> Vec<String> {
        companies(&self.load_entries())
    }

    /// Distinct branches, sorted.
    pub fn branches(&self) -> Vec<String> {
        branches(&self.load_entries())
    }

    /// Returns the stored branch configurations.
    pub fn configs(&self) -> ConfigBook {
        self.load_configs()
    }

    /// Applies one edit to a branch configuration and saves it.
    ///
    /// A branch with entries but no stored configuration starts from the
    /// derived default. A branch with neither is [`EngineError::BranchNotFound`].
    pub fn edit_config(
        &mut self,
        branch: &str,
        edit: ConfigEdit,
    ) -> EngineResult<BranchFinancialConfig> {
        let mut book = self.load_configs();
        let mut config = self.stored_or_default(&book, branch)?;
        config.apply(edit);

        book.upsert(config.clone());
        self.store.save_configs(&book.to_vec())?;
        info!(branch = %branch, edit = ?edit, "Branch configuration updated");

        Ok(config)
    }

    /// Re-derives every rate of a branch from its current base salary,
    /// discarding manual overrides, and saves the result.
    pub fn suggest(&mut self, branch: &str) -> EngineResult<BranchFinancialConfig> {
        let mut book = self.load_configs();
        let mut config = self.stored_or_default(&book, branch)?;
        config.rederive();

        book.upsert(config.clone());
        self.store.save_configs(&book.to_vec())?;
        info!(branch = %branch, base_salary = %config.base_salary, "Branch rates re-derived");

        Ok(config)
    }

    fn stored_or_default(&self, book: &ConfigBook, branch: &str) -> EngineResult<BranchFinancialConfig> {
        if let Some(config) = book.get(branch) {
            return Ok(config.clone());
        }
        if !self.load_entries().iter().any(|e| e.branch == branch) {
            return Err(EngineError::BranchNotFound {
                branch: branch.to_string(),
            });
        }
        Ok(BranchFinancialConfig::derive(
            branch,
            self.config.base_salary_for(branch),
        ))
    }

    /// Prices the filtered entries, filling unconfigured branches with
    /// derived defaults.
    pub fn financial_report(&self, filter: &EntryFilter) -> FinancialReport {
        let entries = self.entries(filter);
        let configs = self.load_configs().with_defaults_for(
            entries.iter().map(|e| e.branch.as_str()),
            self.config.salaries(),
        );
        calculate_financial_report(&entries, &configs)
    }

    /// Dashboard rollups of the filtered entries. Only stored
    /// configurations are used, so unconfigured branches cost nothing.
    pub fn dashboard(&self, filter: &EntryFilter) -> Dashboard {
        dashboard(&self.entries(filter), &self.load_configs())
    }

    /// Top drivers by overtime.
    pub fn ranking(&self, filter: &EntryFilter) -> Vec<RankedDriver> {
        rank_by_overtime(&self.entries(filter), self.config.thresholds().ranking_size)
    }

    /// Compliance flags of the filtered entries.
    pub fn compliance(&self, filter: &EntryFilter) -> ComplianceReport {
        audit_compliance(&self.entries(filter), self.config.thresholds())
    }

    /// Column totals and the summary line of the filtered entries.
    pub fn summary(&self, filter: &EntryFilter) -> Summary {
        let totals = report_totals(&self.entries(filter));
        let text = summary_line(&totals);
        Summary { totals, text }
    }

    /// Exports the filtered entries as `;`-delimited text.
    pub fn export(&self, filter: &EntryFilter) -> EngineResult<String> {
        export_csv(&self.entries(filter))
    }

    /// Returns the stored logo.
    pub fn logo(&self) -> Option<Vec<u8>> {
        match self.store.load_logo() {
            Ok(logo) => logo,
            Err(e) => {
                warn!(error = %e, "Failed to load logo");
                None
            }
        }
    }

    /// Replaces the stored logo.
    pub fn set_logo(&mut self, logo: &[u8]) -> EngineResult<()> {
        self.store.save_logo(logo)?;
        info!(bytes = logo.len(), "Logo updated");
        Ok(())
    }

    /// Deletes the stored logo.
    pub fn remove_logo(&mut self) -> EngineResult<()> {
        self.store.remove_logo()?;
        info!("Logo removed");
        Ok(())
    }
}
