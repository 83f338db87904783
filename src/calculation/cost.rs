//! Per-branch financial cost calculation.
//!
//! This module prices each branch's overtime, night premium and per-diem
//! allowances with the branch's [`BranchFinancialConfig`] and rolls the
//! branches up into a [`FinancialReport`].

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{AuditStep, BranchFinancialConfig, ConfigBook, LogisticsEntry};

use super::allowance::{AllowanceAmount, PRECOMPUTED_TOTAL_THRESHOLD};
use super::saturating::sum_decimal;

/// The cost breakdown of one branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchCost {
    /// Branch name.
    pub branch: String,
    /// False when the branch had no configuration; every cost is then zero.
    pub configured: bool,
    /// Summed HE50 hours.
    pub overtime_50_hours: Decimal,
    /// Summed HE100 hours.
    pub overtime_100_hours: Decimal,
    /// Summed night premium hours.
    pub night_premium_hours: Decimal,
    /// Summed per-diem figure and its interpretation.
    pub per_diem: AllowanceAmount,
    /// Cost of HE50 hours.
    pub overtime_50_cost: Decimal,
    /// Cost of HE100 hours.
    pub overtime_100_cost: Decimal,
    /// HE50 plus HE100 cost.
    pub overtime_cost: Decimal,
    /// Cost of night premium hours.
    pub night_premium_cost: Decimal,
    /// Cost of per-diem allowances.
    pub per_diem_cost: Decimal,
    /// Overtime plus night premium plus per-diem cost.
    pub total_cost: Decimal,
    /// How each figure was obtained.
    pub audit_steps: Vec<AuditStep>,
}

/// Branch costs for a set of entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialReport {
    /// One line per branch, most expensive first.
    pub branches: Vec<BranchCost>,
    /// Sum of every branch total.
    pub total_cost: Decimal,
}

impl FinancialReport {
    /// Returns the cost line of a branch.
    pub fn branch(&self, name: &str) -> Option<&BranchCost> {
        self.branches.iter().find(|b| b.branch == name)
    }
}

/// Calculates the cost of one branch's entries.
///
/// A branch without configuration yields zero for every cost; its hours
/// are still reported.
///
/// # Example
///
/// ```
/// use fleet_payroll::calculation::calculate_branch_cost;
/// use fleet_payroll::models::{BranchFinancialConfig, LogisticsEntry, Period};
/// use rust_decimal::Decimal;
///
/// let entry = LogisticsEntry {
///     id: "e1".to_string(),
///     name: "Ana".to_string(),
///     national_id: "52998224725".to_string(),
///     company: "Alfa".to_string(),
///     branch: "EMBU".to_string(),
///     period: Period::parse("2024-03").unwrap(),
///     days_worked: 22,
///     overtime_50: Decimal::from(10),
///     overtime_100: Decimal::from(2),
///     night_premium: Decimal::ZERO,
///     absences: 0,
///     advance: Decimal::ZERO,
///     per_diem: Decimal::ZERO,
/// };
/// let config = BranchFinancialConfig::derive("EMBU", Decimal::from(2200));
///
/// let cost = calculate_branch_cost("EMBU", &[&entry], Some(&config));
/// assert_eq!(cost.total_cost, Decimal::from(190)); // 10 x 15 + 2 x 20
/// ```
pub fn calculate_branch_cost(
    branch: &str,
    entries: &[&LogisticsEntry],
    config: Option<&BranchFinancialConfig>,
) -> BranchCost {
    let overtime_50_hours = sum_decimal(entries.iter().map(|e| e.overtime_50));
    let overtime_100_hours = sum_decimal(entries.iter().map(|e| e.overtime_100));
    let night_premium_hours = sum_decimal(entries.iter().map(|e| e.night_premium));
    let per_diem = AllowanceAmount::classify(sum_decimal(entries.iter().map(|e| e.per_diem)));

    let Some(config) = config else {
        return BranchCost {
            branch: branch.to_string(),
            configured: false,
            overtime_50_hours,
            overtime_100_hours,
            night_premium_hours,
            per_diem,
            overtime_50_cost: Decimal::ZERO,
            overtime_100_cost: Decimal::ZERO,
            overtime_cost: Decimal::ZERO,
            night_premium_cost: Decimal::ZERO,
            per_diem_cost: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            audit_steps: vec![AuditStep {
                step_number: 1,
                rule_id: "missing_config".to_string(),
                rule_name: "Missing Branch Configuration".to_string(),
                input: serde_json::json!({ "branch": branch, "entries": entries.len() }),
                output: serde_json::json!({ "amount": "0" }),
                reasoning: format!("No configuration for branch {} - contributes zero cost", branch),
            }],
        };
    };

    let overtime_50_cost = sum_decimal(
        entries
            .iter()
            .map(|e| e.overtime_50.saturating_mul(config.rate_50)),
    );
    let overtime_100_cost = sum_decimal(
        entries
            .iter()
            .map(|e| e.overtime_100.saturating_mul(config.rate_100)),
    );
    let overtime_cost = overtime_50_cost.saturating_add(overtime_100_cost);
    let night_premium_cost = sum_decimal(
        entries
            .iter()
            .map(|e| e.night_premium.saturating_mul(config.rate_night_premium)),
    );
    let per_diem_cost = per_diem.cost(config.daily_rate);
    let total_cost = sum_decimal([overtime_cost, night_premium_cost, per_diem_cost]);

    let audit_steps = vec![
        AuditStep {
            step_number: 1,
            rule_id: "overtime_cost".to_string(),
            rule_name: "Overtime Cost".to_string(),
            input: serde_json::json!({
                "overtime_50_hours": overtime_50_hours.normalize().to_string(),
                "rate_50": config.rate_50.normalize().to_string(),
                "overtime_100_hours": overtime_100_hours.normalize().to_string(),
                "rate_100": config.rate_100.normalize().to_string(),
            }),
            output: serde_json::json!({
                "overtime_50_cost": overtime_50_cost.normalize().to_string(),
                "overtime_100_cost": overtime_100_cost.normalize().to_string(),
                "amount": overtime_cost.normalize().to_string(),
            }),
            reasoning: format!(
                "{}h × R$ {} + {}h × R$ {} = R$ {}",
                overtime_50_hours.normalize(),
                config.rate_50.normalize(),
                overtime_100_hours.normalize(),
                config.rate_100.normalize(),
                overtime_cost.normalize()
            ),
        },
        AuditStep {
            step_number: 2,
            rule_id: "night_premium_cost".to_string(),
            rule_name: "Night Premium Cost".to_string(),
            input: serde_json::json!({
                "night_premium_hours": night_premium_hours.normalize().to_string(),
                "rate_night_premium": config.rate_night_premium.normalize().to_string(),
            }),
            output: serde_json::json!({
                "amount": night_premium_cost.normalize().to_string(),
            }),
            reasoning: format!(
                "{}h × R$ {} = R$ {}",
                night_premium_hours.normalize(),
                config.rate_night_premium.normalize(),
                night_premium_cost.normalize()
            ),
        },
        per_diem_step(3, per_diem, config.daily_rate, per_diem_cost),
    ];

    BranchCost {
        branch: branch.to_string(),
        configured: true,
        overtime_50_hours,
        overtime_100_hours,
        night_premium_hours,
        per_diem,
        overtime_50_cost,
        overtime_100_cost,
        overtime_cost,
        night_premium_cost,
        per_diem_cost,
        total_cost,
        audit_steps,
    }
}

fn per_diem_step(
    step_number: u32,
    per_diem: AllowanceAmount,
    daily_rate: Decimal,
    amount: Decimal,
) -> AuditStep {
    let reasoning = match per_diem {
        AllowanceAmount::Count(count) => format!(
            "{} allowances × R$ {} = R$ {}",
            count.normalize(),
            daily_rate.normalize(),
            amount.normalize()
        ),
        AllowanceAmount::PrecomputedTotal(total) => format!(
            "Summed per-diem {} exceeds {} - taken as a precomputed total",
            total.normalize(),
            PRECOMPUTED_TOTAL_THRESHOLD
        ),
    };

    AuditStep {
        step_number,
        rule_id: "per_diem_cost".to_string(),
        rule_name: "Per-Diem Allowance Cost".to_string(),
        input: serde_json::json!({
            "summed_per_diem": per_diem.value().normalize().to_string(),
            "daily_rate": daily_rate.normalize().to_string(),
            "threshold": PRECOMPUTED_TOTAL_THRESHOLD.to_string(),
        }),
        output: serde_json::json!({
            "interpretation": per_diem,
            "amount": amount.normalize().to_string(),
        }),
        reasoning,
    }
}

/// Calculates the cost of every branch present in `entries`.
///
/// Branches are priced with their stored configuration only; call
/// [`ConfigBook::with_defaults_for`] first to price unconfigured branches
/// with derived defaults.
pub fn calculate_financial_report(entries: &[LogisticsEntry], configs: &ConfigBook) -> FinancialReport {
    let mut by_branch: BTreeMap<&str, Vec<&LogisticsEntry>> = BTreeMap::new();
    for entry in entries {
        by_branch.entry(entry.branch.as_str()).or_default().push(entry);
    }

    let mut branches: Vec<BranchCost> = by_branch
        .into_iter()
        .map(|(branch, branch_entries)| {
            calculate_branch_cost(branch, &branch_entries, configs.get(branch))
        })
        .collect();
    branches.sort_by(|a, b| b.total_cost.cmp(&a.total_cost));

    let total_cost = sum_decimal(branches.iter().map(|b| b.total_cost));

    FinancialReport {
        branches,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConfigEdit, Period};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_entry(branch: &str, he50: &str, he100: &str, night: &str, per_diem: &str) -> LogisticsEntry {
        LogisticsEntry {
            id: format!("{branch}-{he50}"),
            name: "Motorista".to_string(),
            national_id: "52998224725".to_string(),
            company: "Alfa".to_string(),
            branch: branch.to_string(),
            period: Period::parse("2024-03").unwrap(),
            days_worked: 22,
            overtime_50: dec(he50),
            overtime_100: dec(he100),
            night_premium: dec(night),
            absences: 0,
            advance: Decimal::ZERO,
            per_diem: dec(per_diem),
        }
    }

    fn config_2200(branch: &str) -> BranchFinancialConfig {
        BranchFinancialConfig::derive(branch, dec("2200"))
    }

    #[test]
    fn test_branch_cost_sums_every_category() {
        let a = create_test_entry("EMBU", "10", "2", "5", "4");
        let b = create_test_entry("EMBU", "4.5", "1", "0", "3");
        let config = config_2200("EMBU");

        let cost = calculate_branch_cost("EMBU", &[&a, &b], Some(&config));

        assert!(cost.configured);
        assert_eq!(cost.overtime_50_hours, dec("14.5"));
        assert_eq!(cost.overtime_50_cost, dec("217.5")); // 14.5 x 15
        assert_eq!(cost.overtime_100_cost, dec("60")); // 3 x 20
        assert_eq!(cost.overtime_cost, dec("277.5"));
        assert_eq!(cost.night_premium_cost, dec("10")); // 5 x 2
        assert_eq!(cost.per_diem, AllowanceAmount::Count(dec("7")));
        assert_eq!(cost.per_diem_cost, dec("513.31")); // 7 x 73.33
        assert_eq!(cost.total_cost, dec("800.81"));
    }

    #[test]
    fn test_per_diem_sum_at_or_below_100_uses_rate() {
        let a = create_test_entry("EMBU", "0", "0", "0", "60");
        let b = create_test_entry("EMBU", "0", "0", "0", "40");
        let config = config_2200("EMBU");

        let cost = calculate_branch_cost("EMBU", &[&a, &b], Some(&config));
        assert_eq!(cost.per_diem_cost, dec("7333")); // 100 x 73.33
    }

    #[test]
    fn test_per_diem_sum_above_100_passes_through() {
        let a = create_test_entry("EMBU", "0", "0", "0", "60");
        let b = create_test_entry("EMBU", "0", "0", "0", "40.01");
        let config = config_2200("EMBU");

        let cost = calculate_branch_cost("EMBU", &[&a, &b], Some(&config));
        assert_eq!(cost.per_diem, AllowanceAmount::PrecomputedTotal(dec("100.01")));
        assert_eq!(cost.per_diem_cost, dec("100.01"));
        assert!(cost.audit_steps[2].reasoning.contains("precomputed total"));
    }

    #[test]
    fn test_tier_is_decided_on_branch_sum_not_per_entry() {
        // Each entry alone is a count, their sum is a total.
        let a = create_test_entry("EMBU", "0", "0", "0", "80");
        let b = create_test_entry("EMBU", "0", "0", "0", "80");
        let config = config_2200("EMBU");

        let cost = calculate_branch_cost("EMBU", &[&a, &b], Some(&config));
        assert_eq!(cost.per_diem_cost, dec("160"));
    }

    #[test]
    fn test_missing_config_contributes_zero() {
        let a = create_test_entry("NOVA", "10", "2", "5", "4");

        let cost = calculate_branch_cost("NOVA", &[&a], None);

        assert!(!cost.configured);
        assert_eq!(cost.overtime_50_hours, dec("10"));
        assert_eq!(cost.total_cost, Decimal::ZERO);
        assert_eq!(cost.audit_steps.len(), 1);
        assert_eq!(cost.audit_steps[0].rule_id, "missing_config");
    }

    #[test]
    fn test_audit_steps_describe_calculation() {
        let a = create_test_entry("EMBU", "10", "2", "5", "4");
        let config = config_2200("EMBU");

        let cost = calculate_branch_cost("EMBU", &[&a], Some(&config));
        let rule_ids: Vec<&str> = cost.audit_steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(rule_ids, vec!["overtime_cost", "night_premium_cost", "per_diem_cost"]);

        let overtime = &cost.audit_steps[0];
        assert_eq!(overtime.input["rate_50"].as_str().unwrap(), "15");
        assert_eq!(overtime.output["amount"].as_str().unwrap(), "190");
        assert_eq!(overtime.reasoning, "10h × R$ 15 + 2h × R$ 20 = R$ 190");

        let per_diem = &cost.audit_steps[2];
        assert_eq!(per_diem.output["interpretation"]["kind"], "count");
    }

    #[test]
    fn test_report_sorted_by_total_and_global_total_sums_branches() {
        let entries = vec![
            create_test_entry("EMBU", "1", "0", "0", "0"),
            create_test_entry("VIANA", "10", "0", "0", "0"),
            create_test_entry("EMBU", "2", "0", "0", "0"),
            create_test_entry("CONTAGEM", "5", "0", "0", "0"),
        ];
        let configs: ConfigBook = ["EMBU", "VIANA", "CONTAGEM"]
            .into_iter()
            .map(config_2200)
            .collect();

        let report = calculate_financial_report(&entries, &configs);

        let order: Vec<&str> = report.branches.iter().map(|b| b.branch.as_str()).collect();
        assert_eq!(order, vec!["VIANA", "CONTAGEM", "EMBU"]);
        assert_eq!(report.branch("EMBU").unwrap().total_cost, dec("45"));
        assert_eq!(report.total_cost, dec("270")); // (10 + 5 + 3) x 15
    }

    #[test]
    fn test_report_with_unconfigured_branch() {
        let entries = vec![
            create_test_entry("EMBU", "1", "0", "0", "0"),
            create_test_entry("NOVA", "100", "0", "0", "0"),
        ];
        let configs: ConfigBook = vec![config_2200("EMBU")].into_iter().collect();

        let report = calculate_financial_report(&entries, &configs);
        assert_eq!(report.total_cost, dec("15"));
        assert!(!report.branch("NOVA").unwrap().configured);
    }

    #[test]
    fn test_manual_rate_override_is_used() {
        let a = create_test_entry("EMBU", "10", "0", "0", "0");
        let mut config = config_2200("EMBU");
        config.apply(ConfigEdit::Rate50(dec("20")));

        let cost = calculate_branch_cost("EMBU", &[&a], Some(&config));
        assert_eq!(cost.overtime_50_cost, dec("200"));
    }

    #[test]
    fn test_empty_report() {
        let report = calculate_financial_report(&[], &ConfigBook::new());
        assert!(report.branches.is_empty());
        assert_eq!(report.total_cost, Decimal::ZERO);
    }

    #[test]
    fn test_oversized_hours_saturate_instead_of_overflowing() {
        let huge = create_test_entry("EMBU", "9999999999999999999999999999", "0", "0", "0");
        let normal = create_test_entry("VIANA", "10", "0", "0", "0");
        let configs: ConfigBook = [config_2200("EMBU"), config_2200("VIANA")].into_iter().collect();

        let report = calculate_financial_report(&[huge, normal], &configs);

        let embu = report.branch("EMBU").unwrap();
        assert_eq!(embu.overtime_50_cost, Decimal::MAX);
        assert_eq!(embu.total_cost, Decimal::MAX);
        assert_eq!(report.branch("VIANA").unwrap().total_cost, dec("150"));
        assert_eq!(report.total_cost, Decimal::MAX);
    }
}
