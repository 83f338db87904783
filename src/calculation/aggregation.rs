//! Rollups of a filtered entry set.
//!
//! Every function here is a pure function of the entries and the branch
//! configurations; nothing is cached, so callers simply recompute after a
//! filter change.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{ConfigBook, LogisticsEntry, Period};

use super::cost::calculate_financial_report;
use super::saturating::{sum_count, sum_decimal};

/// Overtime, absences and cost of one branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchTotals {
    /// Branch name.
    pub branch: String,
    /// HE50 plus HE100 hours.
    pub overtime_hours: Decimal,
    /// Summed absences.
    pub absences: u32,
    /// Branch cost as priced by the financial report.
    pub total_cost: Decimal,
}

/// Overtime hours of one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodOvertime {
    /// The period.
    pub period: Period,
    /// `MM/YYYY` label.
    pub label: String,
    /// HE50 plus HE100 hours.
    pub overtime_hours: Decimal,
}

/// A branch's percentage of the overall overtime hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchShare {
    /// Branch name.
    pub branch: String,
    /// Percentage rounded to one decimal place.
    pub percentage: Decimal,
}

/// Headline figures of an entry set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    /// Summed HE50 hours.
    pub overtime_50_hours: Decimal,
    /// Summed HE100 hours.
    pub overtime_100_hours: Decimal,
    /// Summed night premium hours.
    pub night_premium_hours: Decimal,
    /// Summed absences.
    pub absences: u32,
    /// Summed days worked.
    pub days_worked: u32,
    /// HE50 plus HE100 cost.
    pub overtime_cost: Decimal,
    /// Overtime plus night premium cost.
    pub overtime_and_night_cost: Decimal,
    /// Per-diem allowance cost.
    pub per_diem_cost: Decimal,
    /// Sum of every branch total.
    pub total_cost: Decimal,
    /// Total cost divided by the number of branches, rounded to cents.
    pub average_cost_per_branch: Decimal,
    /// Overtime hours divided by the number of branches, rounded to two
    /// decimal places.
    pub average_overtime_per_branch: Decimal,
}

/// Everything the dashboard shows for one entry set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Headline figures.
    pub kpis: Kpis,
    /// Per-branch totals, most overtime first.
    pub branch_totals: Vec<BranchTotals>,
    /// Overtime time series.
    pub overtime_by_period: Vec<PeriodOvertime>,
    /// Overtime share per branch.
    pub overtime_distribution: Vec<BranchShare>,
}

/// Per-branch overtime hours, absences and cost, most overtime first.
///
/// Ties keep branch-name order.
pub fn branch_totals(entries: &[LogisticsEntry], configs: &ConfigBook) -> Vec<BranchTotals> {
    let report = calculate_financial_report(entries, configs);

    let mut totals: BTreeMap<&str, BranchTotals> = BTreeMap::new();
    for entry in entries {
        let line = totals
            .entry(entry.branch.as_str())
            .or_insert_with(|| BranchTotals {
                branch: entry.branch.clone(),
                overtime_hours: Decimal::ZERO,
                absences: 0,
                total_cost: report
                    .branch(&entry.branch)
                    .map(|b| b.total_cost)
                    .unwrap_or(Decimal::ZERO),
            });
        line.overtime_hours = line.overtime_hours.saturating_add(entry.total_overtime());
        line.absences = line.absences.saturating_add(entry.absences);
    }

    let mut totals: Vec<BranchTotals> = totals.into_values().collect();
    totals.sort_by(|a, b| b.overtime_hours.cmp(&a.overtime_hours));
    totals
}

/// Overtime hours per period in chronological order.
pub fn overtime_by_period(entries: &[LogisticsEntry]) -> Vec<PeriodOvertime> {
    let mut by_period: BTreeMap<&Period, Decimal> = BTreeMap::new();
    for entry in entries {
        let hours = by_period.entry(&entry.period).or_insert(Decimal::ZERO);
        *hours = hours.saturating_add(entry.total_overtime());
    }

    by_period
        .into_iter()
        .map(|(period, overtime_hours)| PeriodOvertime {
            period: period.clone(),
            label: period.display_label(),
            overtime_hours,
        })
        .collect()
}

/// Each branch's share of the overall overtime hours.
///
/// Shares that round to zero are left out, and so is everything when there
/// is no overtime at all.
pub fn overtime_distribution(entries: &[LogisticsEntry]) -> Vec<BranchShare> {
    let mut by_branch: BTreeMap<&str, Decimal> = BTreeMap::new();
    for entry in entries {
        let hours = by_branch.entry(entry.branch.as_str()).or_insert(Decimal::ZERO);
        *hours = hours.saturating_add(entry.total_overtime());
    }

    let overall = sum_decimal(by_branch.values().copied());
    if overall.is_zero() {
        return Vec::new();
    }

    let mut shares: Vec<BranchShare> = by_branch
        .into_iter()
        .map(|(branch, hours)| BranchShare {
            branch: branch.to_string(),
            percentage: hours
                .checked_div(overall)
                .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ZERO)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
        })
        .filter(|share| share.percentage > Decimal::ZERO)
        .collect();
    shares.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    shares
}

/// Global totals of an entry set.
///
/// Costs use the same branch-level pricing as the financial report, so the
/// per-diem tier is decided on each branch's summed figure.
pub fn kpis(entries: &[LogisticsEntry], configs: &ConfigBook) -> Kpis {
    let report = calculate_financial_report(entries, configs);

    let overtime_50_hours = sum_decimal(entries.iter().map(|e| e.overtime_50));
    let overtime_100_hours = sum_decimal(entries.iter().map(|e| e.overtime_100));
    let overtime_cost = sum_decimal(report.branches.iter().map(|b| b.overtime_cost));
    let night_premium_cost = sum_decimal(report.branches.iter().map(|b| b.night_premium_cost));
    let per_diem_cost = sum_decimal(report.branches.iter().map(|b| b.per_diem_cost));

    let branch_count = Decimal::from(report.branches.len());
    let average = |value: Decimal| {
        if branch_count.is_zero() {
            Decimal::ZERO
        } else {
            (value / branch_count).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        }
    };

    Kpis {
        overtime_50_hours,
        overtime_100_hours,
        night_premium_hours: sum_decimal(entries.iter().map(|e| e.night_premium)),
        absences: sum_count(entries.iter().map(|e| e.absences)),
        days_worked: sum_count(entries.iter().map(|e| e.days_worked)),
        overtime_cost,
        overtime_and_night_cost: overtime_cost.saturating_add(night_premium_cost),
        per_diem_cost,
        total_cost: report.total_cost,
        average_cost_per_branch: average(report.total_cost),
        average_overtime_per_branch: average(overtime_50_hours.saturating_add(overtime_100_hours)),
    }
}

/// Computes every dashboard rollup at once.
pub fn dashboard(entries: &[LogisticsEntry], configs: &ConfigBook) -> Dashboard {
    Dashboard {
        kpis: kpis(entries, configs),
        branch_totals: branch_totals(entries, configs),
        overtime_by_period: overtime_by_period(entries),
        overtime_distribution: overtime_distribution(entries),
    }
}
