//! Branch wage-rate configuration.
//!
//! This module contains [`BranchFinancialConfig`], the rates used to price
//! one branch's overtime, night premium and per-diem allowances, and
//! [`ConfigBook`], the branch-keyed collection of them.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::SalaryTable;

/// Monthly hours used to turn a base salary into an hourly rate.
pub const MONTHLY_HOURS: Decimal = Decimal::from_parts(220, 0, 0, false, 0);

/// Days used to turn a base salary into a per-diem rate.
pub const MONTHLY_DAYS: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Multiplier applied to the hourly base for 50% overtime.
pub const OVERTIME_50_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Multiplier applied to the hourly base for 100% overtime.
pub const OVERTIME_100_MULTIPLIER: Decimal = Decimal::TWO;

/// Multiplier applied to the hourly base for night premium hours.
pub const NIGHT_PREMIUM_MULTIPLIER: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// Wage-rate parameters for one branch.
///
/// # Example
///
/// ```
/// use fleet_payroll::models::BranchFinancialConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = BranchFinancialConfig::derive("CONTAGEM", Decimal::from(2200));
/// assert_eq!(config.rate_50, Decimal::from_str("15.00").unwrap());
/// assert_eq!(config.daily_rate, Decimal::from_str("73.33").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchFinancialConfig {
    /// Branch name; the key of the configuration.
    pub branch: String,
    /// Base monthly salary.
    pub base_salary: Decimal,
    /// Hourly rate for 50% overtime.
    pub rate_50: Decimal,
    /// Hourly rate for 100% overtime.
    pub rate_100: Decimal,
    /// Hourly rate for night premium hours.
    pub rate_night_premium: Decimal,
    /// Rate per per-diem allowance.
    pub daily_rate: Decimal,
}

impl BranchFinancialConfig {
    /// Derives every rate of a branch from its base salary.
    ///
    /// The hourly base is `base_salary / 220`; the overtime and night rates
    /// are 1.5x, 2x and 0.2x of it and the per-diem rate is
    /// `base_salary / 30`. All four are rounded to cents.
    pub fn derive(branch: impl Into<String>, base_salary: Decimal) -> Self {
        let mut config = Self {
            branch: branch.into(),
            base_salary,
            rate_50: Decimal::ZERO,
            rate_100: Decimal::ZERO,
            rate_night_premium: Decimal::ZERO,
            daily_rate: Decimal::ZERO,
        };
        config.rederive();
        config
    }

    /// Recomputes the four derived rates from the current base salary,
    /// discarding any manual override.
    pub fn rederive(&mut self) {
        let hourly = self.base_salary / MONTHLY_HOURS;
        self.rate_50 = round_cents(hourly.saturating_mul(OVERTIME_50_MULTIPLIER));
        self.rate_100 = round_cents(hourly.saturating_mul(OVERTIME_100_MULTIPLIER));
        self.rate_night_premium = round_cents(hourly.saturating_mul(NIGHT_PREMIUM_MULTIPLIER));
        self.daily_rate = round_cents(self.base_salary / MONTHLY_DAYS);
    }

    /// Applies a single field edit. Editing the base salary re-derives the
    /// other rates.
    pub fn apply(&mut self, edit: ConfigEdit) {
        match edit {
            ConfigEdit::BaseSalary(value) => {
                self.base_salary = value;
                self.rederive();
            }
            ConfigEdit::Rate50(value) => self.rate_50 = value,
            ConfigEdit::Rate100(value) => self.rate_100 = value,
            ConfigEdit::RateNightPremium(value) => self.rate_night_premium = value,
            ConfigEdit::DailyRate(value) => self.daily_rate = value,
        }
    }
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A user edit to one field of a branch configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ConfigEdit {
    /// New base salary; re-derives every rate.
    BaseSalary(Decimal),
    /// Manual 50% overtime rate.
    #[serde(rename = "rate_50")]
    Rate50(Decimal),
    /// Manual 100% overtime rate.
    #[serde(rename = "rate_100")]
    Rate100(Decimal),
    /// Manual night premium rate.
    RateNightPremium(Decimal),
    /// Manual per-diem rate.
    DailyRate(Decimal),
}

/// The branch configurations known to the engine, keyed by branch name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigBook {
    configs: BTreeMap<String, BranchFinancialConfig>,
}

impl ConfigBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored configuration of a branch, if any.
    pub fn get(&self, branch: &str) -> Option<&BranchFinancialConfig> {
        self.configs.get(branch)
    }

    /// Returns a mutable reference to a branch configuration, if any.
    pub fn get_mut(&mut self, branch: &str) -> Option<&mut BranchFinancialConfig> {
        self.configs.get_mut(branch)
    }

    /// Inserts or replaces the configuration of its branch.
    pub fn upsert(&mut self, config: BranchFinancialConfig) {
        self.configs.insert(config.branch.clone(), config);
    }

    /// Returns a copy of this book where every branch in `branches` without
    /// a stored configuration gets one derived from `salaries`.
    pub fn with_defaults_for<'a>(
        &self,
        branches: impl IntoIterator<Item = &'a str>,
        salaries: &SalaryTable,
    ) -> Self {
        let mut book = self.clone();
        for branch in branches {
            if book.get(branch).is_none() {
                book.upsert(BranchFinancialConfig::derive(
                    branch,
                    salaries.base_salary_for(branch),
                ));
            }
        }
        book
    }

    /// Iterates over configurations in branch-name order.
    pub fn iter(&self) -> impl Iterator<Item = &BranchFinancialConfig> {
        self.configs.values()
    }

    /// Returns the number of configured branches.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Returns true if no branch is configured.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Returns the configurations as a list in branch-name order.
    pub fn to_vec(&self) -> Vec<BranchFinancialConfig> {
        self.configs.values().cloned().collect()
    }
}

impl FromIterator<BranchFinancialConfig> for ConfigBook {
    fn from_iter<I: IntoIterator<Item = BranchFinancialConfig>>(iter: I) -> Self {
        let mut book = Self::new();
        for config in iter {
            book.upsert(config);
        }
        book
    }
}
