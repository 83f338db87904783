//! Spreadsheet ingestion and export.
//!
//! This module parses raw payroll spreadsheets into deduplicated
//! [`LogisticsEntry`](crate::models::LogisticsEntry) records and serializes
//! entries back to a semicolon-delimited file.

mod export;
mod importer;

pub use export::{EXPORT_HEADER, export_csv};
pub use importer::{
    DEFAULT_BRANCH, DEFAULT_COMPANY, ImportFile, ImportOutcome, IngestBatch, MIN_COLUMNS,
    UNKNOWN_NAME, ingest_batch,
};
