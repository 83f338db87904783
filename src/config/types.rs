//! Configuration types for the fleet payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Base salary used for a branch that is not in the known-salary table.
pub const FALLBACK_BASE_SALARY: Decimal = Decimal::from_parts(2000, 0, 0, false, 0);

/// Known base salaries per branch, shipped with the engine.
const KNOWN_BASE_SALARIES: &[(&str, i64)] = &[
    ("CONTAGEM", 233281),
    ("GUARULHOS", 263188),
    ("MATRIZ", 239850),
    ("CUIABÁ", 205566),
    ("RIBEIRAO PRETO", 243050),
    ("GRAVATAI", 235055),
    ("EMBU", 263188),
    ("PAULINIA AJUDANTES", 226942),
    ("CARRETEIROS", 302350),
    ("CARRETEIROS GUARULHOS", 310626),
    ("APARECIDA DE GOIANIA", 210000),
    ("PAULÍNIA", 164199),
    ("VIANA", 233449),
];

/// Lookup table of known branch base salaries with a fallback.
///
/// Deserialized from `salaries.yaml`:
///
/// ```yaml
/// fallback_base_salary: "2000.00"
/// known_base_salaries:
///   CONTAGEM: "2332.81"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalaryTable {
    /// Base salary for branches that are not listed.
    pub fallback_base_salary: Decimal,
    /// Base salary by exact branch name.
    #[serde(default)]
    pub known_base_salaries: HashMap<String, Decimal>,
}

impl SalaryTable {
    /// Returns the known base salary of `branch`, or the fallback.
    pub fn base_salary_for(&self, branch: &str) -> Decimal {
        self.known_base_salaries
            .get(branch)
            .copied()
            .unwrap_or(self.fallback_base_salary)
    }
}

impl Default for SalaryTable {
    fn default() -> Self {
        Self {
            fallback_base_salary: FALLBACK_BASE_SALARY,
            known_base_salaries: KNOWN_BASE_SALARIES
                .iter()
                .map(|(branch, cents)| (branch.to_string(), Decimal::new(*cents, 2)))
                .collect(),
        }
    }
}

/// Thresholds for the compliance and ranking reports.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuditThresholds {
    /// Monthly HE50 + HE100 hours above which an entry is flagged.
    pub excessive_overtime_hours: Decimal,
    /// Absence count at or above which an entry is flagged.
    pub critical_absences: u32,
    /// Number of drivers listed in the overtime ranking.
    pub ranking_size: usize,
}

impl Default for AuditThresholds {
    fn default() -> Self {
        Self {
            excessive_overtime_hours: Decimal::from(60),
            critical_absences: 3,
            ranking_size: 20,
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    /// Known base salaries used to derive default branch rates.
    salaries: SalaryTable,
    /// Report thresholds.
    thresholds: AuditThresholds,
}

impl EngineConfig {
    /// Creates an EngineConfig from its component parts.
    pub fn new(salaries: SalaryTable, thresholds: AuditThresholds) -> Self {
        Self {
            salaries,
            thresholds,
        }
    }

    /// Returns the salary table.
    pub fn salaries(&self) -> &SalaryTable {
        &self.salaries
    }

    /// Returns the report thresholds.
    pub fn thresholds(&self) -> &AuditThresholds {
        &self.thresholds
    }
}
