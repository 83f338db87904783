//! Compliance flags over an entry set.

use serde::Serialize;
use tracing::debug;

use crate::config::AuditThresholds;
use crate::models::LogisticsEntry;
use crate::validators::is_valid_cpf;

/// Entries that need attention, grouped by reason. An entry may appear in
/// more than one group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComplianceReport {
    /// HE50 + HE100 strictly above the overtime threshold.
    pub excessive_overtime: Vec<LogisticsEntry>,
    /// National ID failing the CPF check.
    pub invalid_national_id: Vec<LogisticsEntry>,
    /// Absences at or above the absence threshold.
    pub critical_absences: Vec<LogisticsEntry>,
}

impl ComplianceReport {
    /// Returns the number of flags raised.
    pub fn flag_count(&self) -> usize {
        self.excessive_overtime.len() + self.invalid_national_id.len() + self.critical_absences.len()
    }
}

/// Flags entries with excessive overtime, an invalid CPF or critical
/// absences.
pub fn audit_compliance(entries: &[LogisticsEntry], thresholds: &AuditThresholds) -> ComplianceReport {
    let mut report = ComplianceReport::default();

    for entry in entries {
        if entry.total_overtime() > thresholds.excessive_overtime_hours {
            report.excessive_overtime.push(entry.clone());
        }
        if !is_valid_cpf(&entry.national_id) {
            report.invalid_national_id.push(entry.clone());
        }
        if entry.absences >= thresholds.critical_absences {
            report.critical_absences.push(entry.clone());
        }
    }

    debug!(
        entries = entries.len(),
        flags = report.flag_count(),
        "Compliance audit complete"
    );

    report
}
