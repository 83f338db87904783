//! Fleet payroll engine
//!
//! This crate ingests monthly driver overtime spreadsheets, validates and
//! deduplicates them into a ledger, and prices each branch's overtime, night
//! premium and per-diem allowances from its wage configuration. The
//! dashboard, compliance, ranking and summary reports are derived from the
//! same entries.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod ledger;
pub mod models;
pub mod storage;
pub mod validators;
