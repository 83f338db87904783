//! Sums that clamp at the numeric range.
//!
//! Every figure summed here comes straight from a spreadsheet cell, so a
//! single absurd value must not bring a report down.

use rust_decimal::Decimal;

/// Adds up `values`, clamping at the `Decimal` range instead of panicking.
pub(crate) fn sum_decimal<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Adds up day counts, clamping at `u32::MAX`.
pub(crate) fn sum_count<I>(values: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    values.into_iter().fold(0, u32::saturating_add)
}
