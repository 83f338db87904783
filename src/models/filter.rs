//! Entry selection for reports.
//!
//! Every report works on the entries selected by an [`EntryFilter`]; the
//! helpers here list the values available to filter on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{LogisticsEntry, Period};

/// Optional period, company and branch constraints. An unset field matches
/// every entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Only entries of this period.
    #[serde(default)]
    pub period: Option<Period>,
    /// Only entries of this company.
    #[serde(default)]
    pub company: Option<String>,
    /// Only entries of this branch.
    #[serde(default)]
    pub branch: Option<String>,
}

impl EntryFilter {
    /// Returns true if `entry` satisfies every set constraint.
    pub fn matches(&self, entry: &LogisticsEntry) -> bool {
        self.period.as_ref().is_none_or(|p| &entry.period == p)
            && self.company.as_ref().is_none_or(|c| &entry.company == c)
            && self.branch.as_ref().is_none_or(|b| &entry.branch == b)
    }

    /// Returns the matching entries, preserving their order.
    pub fn apply(&self, entries: &[LogisticsEntry]) -> Vec<LogisticsEntry> {
        entries.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}

/// Distinct periods present in `entries`, newest first.
pub fn available_periods(entries: &[LogisticsEntry]) -> Vec<Period> {
    let periods: BTreeSet<&Period> = entries.iter().map(|e| &e.period).collect();
    periods.into_iter().rev().cloned().collect()
}

/// Distinct company names, sorted.
pub fn companies(entries: &[LogisticsEntry]) -> Vec<String> {
    distinct(entries.iter().map(|e| e.company.as_str()))
}

/// Distinct branch names, sorted.
pub fn branches(entries: &[LogisticsEntry]) -> Vec<String> {
    distinct(entries.iter().map(|e| e.branch.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
