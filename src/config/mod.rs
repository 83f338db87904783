//! Configuration loading and management for the fleet payroll engine.
//!
//! This module loads the known branch base salaries and the report
//! thresholds from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use fleet_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/fleet").unwrap();
//! println!("Ranking size: {}", config.thresholds().ranking_size);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AuditThresholds, EngineConfig, FALLBACK_BASE_SALARY, SalaryTable};
