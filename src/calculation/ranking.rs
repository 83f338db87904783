//! Overtime ranking of drivers.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{LogisticsEntry, Period};

/// One position in the overtime ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDriver {
    /// 1-based position.
    pub position: usize,
    /// Driver name.
    pub name: String,
    /// Driver national ID.
    pub national_id: String,
    /// Driver company.
    pub company: String,
    /// Driver branch.
    pub branch: String,
    /// Period of the ranked entry.
    pub period: Period,
    /// HE50 hours.
    pub overtime_50: Decimal,
    /// HE100 hours.
    pub overtime_100: Decimal,
    /// HE50 plus HE100 hours; the ranking key.
    pub total_overtime: Decimal,
}

/// Returns the `size` entries with the most overtime, highest first.
///
/// Entries with equal overtime keep their input order.
pub fn rank_by_overtime(entries: &[LogisticsEntry], size: usize) -> Vec<RankedDriver> {
    let mut ordered: Vec<&LogisticsEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| b.total_overtime().cmp(&a.total_overtime()));

    ordered
        .into_iter()
        .take(size)
        .enumerate()
        .map(|(index, entry)| RankedDriver {
            position: index + 1,
            name: entry.name.clone(),
            national_id: entry.national_id.clone(),
            company: entry.company.clone(),
            branch: entry.branch.clone(),
            period: entry.period.clone(),
            overtime_50: entry.overtime_50,
            overtime_100: entry.overtime_100,
            total_overtime: entry.total_overtime(),
        })
        .collect()
}
