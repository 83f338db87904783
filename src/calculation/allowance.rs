//! Per-diem allowance interpretation.
//!
//! The per-diem column is overloaded: most sheets hold a count of
//! allowances, but legacy sheets store the monetary total. The two are told
//! apart by magnitude, and that rule lives only in [`AllowanceAmount::classify`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A summed per-diem value above this is taken as a precomputed total.
pub const PRECOMPUTED_TOTAL_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

/// What a per-diem figure represents.
///
/// # Example
///
/// ```
/// use fleet_payroll::calculation::AllowanceAmount;
/// use rust_decimal::Decimal;
///
/// let count = AllowanceAmount::classify(Decimal::from(12));
/// assert_eq!(count.cost(Decimal::from(80)), Decimal::from(960));
///
/// let total = AllowanceAmount::classify(Decimal::from(1500));
/// assert_eq!(total.cost(Decimal::from(80)), Decimal::from(1500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AllowanceAmount {
    /// A number of allowances, priced at the branch per-diem rate.
    Count(Decimal),
    /// A monetary total already computed upstream.
    PrecomputedTotal(Decimal),
}

impl AllowanceAmount {
    /// Interprets a summed per-diem figure.
    ///
    /// Values strictly above [`PRECOMPUTED_TOTAL_THRESHOLD`] are totals;
    /// anything else, including exactly 100, is a count.
    pub fn classify(summed: Decimal) -> Self {
        if summed > PRECOMPUTED_TOTAL_THRESHOLD {
            AllowanceAmount::PrecomputedTotal(summed)
        } else {
            AllowanceAmount::Count(summed)
        }
    }

    /// Returns the raw figure.
    pub fn value(self) -> Decimal {
        match self {
            AllowanceAmount::Count(value) | AllowanceAmount::PrecomputedTotal(value) => value,
        }
    }

    /// Returns the cost of the allowance at `daily_rate`. Precomputed
    /// totals ignore the rate.
    pub fn cost(self, daily_rate: Decimal) -> Decimal {
        match self {
            AllowanceAmount::Count(count) => count.saturating_mul(daily_rate),
            AllowanceAmount::PrecomputedTotal(total) => total,
        }
    }
}
