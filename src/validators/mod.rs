//! Field-level validators shared by ingestion and reporting.
//!
//! This module contains the locale-tolerant numeric normalizer used while
//! parsing spreadsheet cells and the CPF checksum validator used both for
//! ingestion warnings and for the compliance report.

mod national_id;
mod number;

pub use national_id::{CPF_LENGTH, is_valid_cpf};
pub use number::{
    CURRENCY_MARKER, DOT_THOUSANDS_THRESHOLD, RawNumber, SeparatorLayout, normalize,
    normalize_count,
};
