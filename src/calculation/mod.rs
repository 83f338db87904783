//! Cost calculation and reporting rollups.
//!
//! This module prices branches with their financial configuration, interprets
//! the per-diem column, and derives the dashboard, compliance, ranking and
//! summary views from a filtered entry set. Everything here is a pure
//! function of its inputs and never fails.

mod aggregation;
mod allowance;
mod compliance;
mod cost;
mod ranking;
mod saturating;
mod totals;

pub use aggregation::{
    BranchShare, BranchTotals, Dashboard, Kpis, PeriodOvertime, branch_totals, dashboard, kpis,
    overtime_by_period, overtime_distribution,
};
pub use allowance::{AllowanceAmount, PRECOMPUTED_TOTAL_THRESHOLD};
pub use compliance::{ComplianceReport, audit_compliance};
pub use cost::{BranchCost, FinancialReport, calculate_branch_cost, calculate_financial_report};
pub use ranking::{RankedDriver, rank_by_overtime};
pub use totals::{ReportTotals, format_brl, format_hours, report_totals, summary_line};
