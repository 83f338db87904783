//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AuditThresholds, EngineConfig, SalaryTable};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/fleet/
/// ├── salaries.yaml    # Known branch base salaries and the fallback
/// └── thresholds.yaml  # Compliance and ranking thresholds
/// ```
///
/// # Example
///
/// ```no_run
/// use fleet_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/fleet").unwrap();
/// let salary = loader.base_salary_for("CONTAGEM");
/// println!("Base salary: R$ {}", salary);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let salaries = Self::load_yaml::<SalaryTable>(&path.join("salaries.yaml"))?;
        let thresholds = Self::load_yaml::<AuditThresholds>(&path.join("thresholds.yaml"))?;

        Ok(Self {
            config: EngineConfig::new(salaries, thresholds),
        })
    }

    /// Wraps an already-built configuration, e.g. the built-in defaults.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the salary table.
    pub fn salaries(&self) -> &SalaryTable {
        self.config.salaries()
    }

    /// Returns the report thresholds.
    pub fn thresholds(&self) -> &AuditThresholds {
        self.config.thresholds()
    }

    /// Gets the base salary used to derive a default configuration for a branch.
    pub fn base_salary_for(&self, branch: &str) -> Decimal {
        self.config.salaries().base_salary_for(branch)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_config(EngineConfig::default())
    }
}
