//! Report totals and the pt-BR formatting used by the summary text.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::LogisticsEntry;

/// Column totals of an entry set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTotals {
    /// Number of entries.
    pub headcount: usize,
    /// Summed HE50 hours.
    pub overtime_50: Decimal,
    /// Summed HE100 hours.
    pub overtime_100: Decimal,
    /// Summed night premium hours.
    pub night_premium: Decimal,
    /// Summed absences.
    pub absences: u32,
    /// Summed cash advances.
    pub advances: Decimal,
    /// Summed raw per-diem figures.
    pub per_diem: Decimal,
}

impl ReportTotals {
    /// HE50 plus HE100 hours.
    pub fn total_overtime(&self) -> Decimal {
        self.overtime_50.saturating_add(self.overtime_100)
    }
}

/// Sums every reported column.
pub fn report_totals(entries: &[LogisticsEntry]) -> ReportTotals {
    entries.iter().fold(ReportTotals::default(), |mut totals, entry| {
        totals.headcount += 1;
        totals.overtime_50 = totals.overtime_50.saturating_add(entry.overtime_50);
        totals.overtime_100 = totals.overtime_100.saturating_add(entry.overtime_100);
        totals.night_premium = totals.night_premium.saturating_add(entry.night_premium);
        totals.absences = totals.absences.saturating_add(entry.absences);
        totals.advances = totals.advances.saturating_add(entry.advance);
        totals.per_diem = totals.per_diem.saturating_add(entry.per_diem);
        totals
    })
}

/// Renders the one-line summary shared with payroll.
///
/// ```
/// use fleet_payroll::calculation::{ReportTotals, summary_line};
/// use rust_decimal::Decimal;
///
/// let totals = ReportTotals {
///     headcount: 2,
///     overtime_50: Decimal::new(105, 1),
///     advances: Decimal::new(123456, 2),
///     per_diem: Decimal::from(8),
///     ..Default::default()
/// };
/// assert_eq!(
///     summary_line(&totals),
///     "Colaboradores: 2 | Total HE: 10.5h | Adic. Noturno: 0.0h | Adiantamentos: R$ 1.234,56 | Diárias: 8"
/// );
/// ```
pub fn summary_line(totals: &ReportTotals) -> String {
    format!(
        "Colaboradores: {} | Total HE: {} | Adic. Noturno: {} | Adiantamentos: {} | Diárias: {}",
        totals.headcount,
        format_hours(totals.total_overtime()),
        format_hours(totals.night_premium),
        format_brl(totals.advances),
        totals.per_diem.normalize()
    )
}

/// Formats an amount as Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_brl(value: Decimal) -> String {
    let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);

    let sign = if cents.is_sign_negative() && !cents.is_zero() {
        "-"
    } else {
        ""
    };
    let text = cents.abs().to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{}R$ {},{}", sign, group_thousands(integer), fraction)
}

/// Formats hours with one decimal place, e.g. `12.5h`.
pub fn format_hours(value: Decimal) -> String {
    let mut hours = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    hours.rescale(1);
    format!("{}h", hours)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}
