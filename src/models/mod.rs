//! Core data models for the fleet payroll engine.
//!
//! This module contains the domain models used throughout the engine.

mod audit;
mod branch_config;
mod entry;
mod filter;
mod period;

pub use audit::AuditStep;
pub use branch_config::{
    BranchFinancialConfig, ConfigBook, ConfigEdit, MONTHLY_DAYS, MONTHLY_HOURS,
    NIGHT_PREMIUM_MULTIPLIER, OVERTIME_50_MULTIPLIER, OVERTIME_100_MULTIPLIER,
};
pub use entry::{EntryKey, LogisticsEntry};
pub use filter::{EntryFilter, available_periods, branches, companies};
pub use period::Period;
