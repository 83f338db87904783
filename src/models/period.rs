//! Payroll period model.
//!
//! This module contains the [`Period`] type, a validated `YYYY-MM` token
//! identifying one payroll cycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// A year-month payroll period such as `2024-03`.
///
/// Periods compare lexically, which for zero-padded `YYYY-MM` tokens is the
/// same as chronological order.
///
/// # Example
///
/// ```
/// use fleet_payroll::models::Period;
///
/// let period = Period::parse("2024-03").unwrap();
/// assert_eq!(period.as_str(), "2024-03");
/// assert_eq!(period.display_label(), "03/2024");
/// assert!(Period::parse("2024-13").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period(String);

impl Period {
    /// Parses and validates a `YYYY-MM` token.
    pub fn parse(value: &str) -> EngineResult<Self> {
        let value = value.trim();
        let invalid = || EngineError::InvalidPeriod {
            value: value.to_string(),
        };

        let bytes = value.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(invalid());
        }

        let year: i32 = value[..4].parse().map_err(|_| invalid())?;
        let month: u32 = value[5..].parse().map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;

        Ok(Self(value.to_string()))
    }

    /// Returns the `YYYY-MM` token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the period as `MM/YYYY`, the form used in user-facing messages.
    pub fn display_label(&self) -> String {
        format!("{}/{}", &self.0[5..], &self.0[..4])
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Period {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Period {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.0
    }
}
