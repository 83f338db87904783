//! Driver-period entry model.
//!
//! This module defines [`LogisticsEntry`], one imported spreadsheet row for
//! one driver in one period, and [`EntryKey`], the identity used for
//! deduplication.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Period;

/// One driver's overtime and allowance figures for one period.
///
/// Entries are created only by ingestion and never edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticsEntry {
    /// Opaque unique identifier.
    pub id: String,
    /// Driver name as written in the spreadsheet.
    pub name: String,
    /// National ID (CPF). Not guaranteed to be valid.
    pub national_id: String,
    /// Employing company.
    pub company: String,
    /// Operational branch; the unit of cost aggregation.
    pub branch: String,
    /// Payroll period the row was imported for.
    pub period: Period,
    /// Days worked in the period.
    pub days_worked: u32,
    /// Overtime hours paid at 50%.
    pub overtime_50: Decimal,
    /// Overtime hours paid at 100%.
    pub overtime_100: Decimal,
    /// Night-shift premium hours.
    pub night_premium: Decimal,
    /// Number of absences.
    pub absences: u32,
    /// Cash advance amount.
    pub advance: Decimal,
    /// Per-diem allowances. Usually a count; legacy sheets store the
    /// monetary total instead (see [`crate::calculation::AllowanceAmount`]).
    pub per_diem: Decimal,
}

impl LogisticsEntry {
    /// Returns the deduplication key of this entry.
    pub fn key(&self) -> EntryKey {
        EntryKey::new(&self.national_id, &self.name, &self.period)
    }

    /// Returns HE50 plus HE100 hours.
    pub fn total_overtime(&self) -> Decimal {
        self.overtime_50.saturating_add(self.overtime_100)
    }
}

/// Identity of an entry: national ID, lower-cased name and period.
///
/// No two entries in a collection share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    national_id: String,
    name: String,
    period: Period,
}

impl EntryKey {
    /// Builds a key, lower-casing the name.
    pub fn new(national_id: &str, name: &str, period: &Period) -> Self {
        Self {
            national_id: national_id.to_string(),
            name: name.to_lowercase(),
            period: period.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_entry(name: &str, period: &str) -> LogisticsEntry {
        LogisticsEntry {
            id: "e1".to_string(),
            name: name.to_string(),
            national_id: "52998224725".to_string(),
            company: "Transportes Alfa".to_string(),
            branch: "CONTAGEM".to_string(),
            period: Period::parse(period).unwrap(),
            days_worked: 22,
            overtime_50: dec("10.5"),
            overtime_100: dec("4"),
            night_premium: dec("3"),
            absences: 1,
            advance: dec("500.00"),
            per_diem: dec("5"),
        }
    }

    #[test]
    fn test_key_ignores_name_case() {
        let a = create_test_entry("JOAO SILVA", "2024-03");
        let b = create_test_entry("joao silva", "2024-03");
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_key_distinguishes_periods() {
        let a = create_test_entry("Joao Silva", "2024-03");
        let b = create_test_entry("Joao Silva", "2024-04");
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_total_overtime() {
        let entry = create_test_entry("Joao Silva", "2024-03");
        assert_eq!(entry.total_overtime(), dec("14.5"));
    }

    #[test]
    fn test_serde_round_trip_keeps_decimals_as_strings() {
        let entry = create_test_entry("Joao Silva", "2024-03");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["overtime_50"], "10.5");
        assert_eq!(json["period"], "2024-03");

        let back: LogisticsEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
