//! Locale-tolerant numeric parsing.
//!
//! Spreadsheets exported by different branches mix Brazilian (`1.234,56`)
//! and US (`1,234.56`) conventions, currency markers and dash placeholders.
//! [`normalize`] turns any of them into a [`Decimal`] without ever failing.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Currency marker stripped before parsing.
pub const CURRENCY_MARKER: &str = "R$";

/// A dot-only value whose magnitude exceeds this is read as a thousands
/// grouping (`1.500` hours are unusual, `1.500` reais are not).
pub const DOT_THOUSANDS_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

/// A raw field value, either already numeric or still text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawNumber<'a> {
    /// A value that is already numeric.
    Numeric(Decimal),
    /// Text as read from a spreadsheet cell.
    Text(&'a str),
}

impl<'a> From<&'a str> for RawNumber<'a> {
    fn from(value: &'a str) -> Self {
        RawNumber::Text(value)
    }
}

impl From<Decimal> for RawNumber<'_> {
    fn from(value: Decimal) -> Self {
        RawNumber::Numeric(value)
    }
}

/// How the separators in a numeric string are laid out.
///
/// Each variant maps to exactly one rewrite rule in [`SeparatorLayout::canonicalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorLayout {
    /// No comma and no dot.
    Plain,
    /// Both present, comma rightmost: `1.234,56`.
    CommaDecimal,
    /// Both present, dot rightmost: `1,234.56`.
    DotDecimal,
    /// Only commas: `1234,5`.
    CommaOnly,
    /// Only dots, exactly two characters after the last one: `1234.56`.
    DotCents,
    /// Only dots, any other tail length: `1.5`, `1.500`.
    DotAmbiguous,
}

impl SeparatorLayout {
    /// Classifies a currency-stripped, trimmed string.
    pub fn detect(s: &str) -> Self {
        match (s.rfind(','), s.rfind('.')) {
            (None, None) => SeparatorLayout::Plain,
            (Some(comma), Some(dot)) if comma > dot => SeparatorLayout::CommaDecimal,
            (Some(_), Some(_)) => SeparatorLayout::DotDecimal,
            (Some(_), None) => SeparatorLayout::CommaOnly,
            (None, Some(dot)) if s[dot + 1..].chars().count() == 2 => SeparatorLayout::DotCents,
            (None, Some(_)) => SeparatorLayout::DotAmbiguous,
        }
    }

    /// Rewrites `s` so that the only remaining separator is a decimal dot.
    pub fn canonicalize(self, s: &str) -> String {
        match self {
            SeparatorLayout::Plain | SeparatorLayout::DotCents => s.to_string(),
            SeparatorLayout::CommaDecimal => s.replace('.', "").replacen(',', ".", 1),
            SeparatorLayout::DotDecimal => s.replace(',', ""),
            SeparatorLayout::CommaOnly => s.replacen(',', ".", 1),
            SeparatorLayout::DotAmbiguous => match leading_decimal(s) {
                Some(value) if value.abs() > DOT_THOUSANDS_THRESHOLD => s.replace('.', ""),
                _ => s.to_string(),
            },
        }
    }
}

/// Parses a raw field into a decimal.
///
/// Numeric input is returned unchanged. Text has its currency marker and
/// surrounding whitespace removed; empty text and `-` (so also `R$ -`) are
/// zero. Separators are resolved by [`SeparatorLayout`] and the leading
/// numeric prefix of the result is parsed. Unparseable text is zero.
///
/// # Examples
///
/// ```
/// use fleet_payroll::validators::normalize;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(normalize("1.234,56"), Decimal::from_str("1234.56").unwrap());
/// assert_eq!(normalize("1,234.56"), Decimal::from_str("1234.56").unwrap());
/// assert_eq!(normalize("R$ -"), Decimal::ZERO);
/// ```
pub fn normalize<'a>(value: impl Into<RawNumber<'a>>) -> Decimal {
    let text = match value.into() {
        RawNumber::Numeric(n) => return n,
        RawNumber::Text(text) => text,
    };

    let stripped = text.replacen(CURRENCY_MARKER, "", 1);
    let s = stripped.trim();
    if s.is_empty() || s == "-" {
        return Decimal::ZERO;
    }

    let canonical = SeparatorLayout::detect(s).canonicalize(s);
    leading_decimal(&canonical).unwrap_or(Decimal::ZERO)
}

/// Parses the leading integer of a count field (days worked, absences).
///
/// Non-numeric or negative input is zero.
pub fn normalize_count(text: &str) -> u32 {
    let s = text.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s[..end].parse().unwrap_or(0)
}

/// Reads the longest numeric prefix: optional sign, digits, optional fraction.
fn leading_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let int_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let integer = &rest[..int_len];

    let fraction = rest[int_len..]
        .strip_prefix('.')
        .map(|tail| {
            let len = tail.find(|c: char| !c.is_ascii_digit()).unwrap_or(tail.len());
            &tail[..len]
        })
        .unwrap_or("");

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut candidate = String::with_capacity(int_len + fraction.len() + 3);
    if negative {
        candidate.push('-');
    }
    candidate.push_str(if integer.is_empty() { "0" } else { integer });
    if !fraction.is_empty() {
        candidate.push('.');
        candidate.push_str(fraction);
    }

    Decimal::from_str(&candidate).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_brazilian_thousands_and_cents() {
        assert_eq!(normalize("1.234,56"), dec("1234.56"));
    }

    #[test]
    fn test_us_thousands_and_cents() {
        assert_eq!(normalize("1,234.56"), dec("1234.56"));
    }

    #[test]
    fn test_small_dotted_value_is_decimal() {
        assert_eq!(normalize("1.5"), dec("1.5"));
    }

    #[test]
    fn test_dash_placeholders_are_zero() {
        assert_eq!(normalize("-"), Decimal::ZERO);
        assert_eq!(normalize("R$ -"), Decimal::ZERO);
        assert_eq!(normalize("  R$   -  "), Decimal::ZERO);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(normalize(""), Decimal::ZERO);
        assert_eq!(normalize("   "), Decimal::ZERO);
    }

    #[test]
    fn test_numeric_input_is_unchanged() {
        assert_eq!(normalize(dec("150.5")), dec("150.5"));
        assert_eq!(normalize(dec("-3.25")), dec("-3.25"));
    }

    #[test]
    fn test_currency_marker_is_stripped() {
        assert_eq!(normalize("R$ 2.398,50"), dec("2398.50"));
        assert_eq!(normalize("R$1500"), dec("1500"));
    }

    #[test]
    fn test_comma_only_is_decimal() {
        assert_eq!(normalize("12,5"), dec("12.5"));
        assert_eq!(normalize("1234,56"), dec("1234.56"));
    }

    #[test]
    fn test_dot_with_two_digit_tail_is_cents() {
        assert_eq!(normalize("1234.56"), dec("1234.56"));
        assert_eq!(normalize("3.75"), dec("3.75"));
    }

    #[test]
    fn test_large_dotted_value_is_thousands() {
        assert_eq!(normalize("1.500"), dec("1.5"));
        assert_eq!(normalize("150.5"), dec("1505"));
        assert_eq!(normalize("2.350.550"), dec("2.35"));
    }

    #[test]
    fn test_dot_threshold_boundaries() {
        // Two-character tails never reach the magnitude check.
        assert_eq!(normalize("99.99"), dec("99.99"));
        assert_eq!(normalize("100.01"), dec("100.01"));
        assert_eq!(normalize("100"), dec("100"));
        assert_eq!(normalize("100.0"), dec("100.0"));
        assert_eq!(normalize("100.5"), dec("1005"));
        assert_eq!(normalize("99.5"), dec("99.5"));
    }

    #[test]
    fn test_negative_dotted_magnitude_is_thousands() {
        assert_eq!(normalize("-150.5"), dec("-1505"));
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        assert_eq!(normalize("12h"), dec("12"));
        assert_eq!(normalize("7,5 horas"), dec("7.5"));
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(normalize("abc"), Decimal::ZERO);
        assert_eq!(normalize("."), Decimal::ZERO);
        assert_eq!(normalize("R$"), Decimal::ZERO);
    }

    #[test]
    fn test_layout_detection_table() {
        assert_eq!(SeparatorLayout::detect("1234"), SeparatorLayout::Plain);
        assert_eq!(SeparatorLayout::detect("1.234,56"), SeparatorLayout::CommaDecimal);
        assert_eq!(SeparatorLayout::detect("1,234.56"), SeparatorLayout::DotDecimal);
        assert_eq!(SeparatorLayout::detect("12,5"), SeparatorLayout::CommaOnly);
        assert_eq!(SeparatorLayout::detect("12.50"), SeparatorLayout::DotCents);
        assert_eq!(SeparatorLayout::detect("1.500"), SeparatorLayout::DotAmbiguous);
        assert_eq!(SeparatorLayout::detect("1.5"), SeparatorLayout::DotAmbiguous);
    }

    #[test]
    fn test_count_reads_leading_integer() {
        assert_eq!(normalize_count("22"), 22);
        assert_eq!(normalize_count(" 3 "), 3);
        assert_eq!(normalize_count("3,5"), 3);
        assert_eq!(normalize_count("+4"), 4);
    }

    #[test]
    fn test_count_rejects_garbage_and_negatives() {
        assert_eq!(normalize_count(""), 0);
        assert_eq!(normalize_count("-"), 0);
        assert_eq!(normalize_count("-2"), 0);
        assert_eq!(normalize_count("dez"), 0);
    }

    proptest! {
        #[test]
        fn prop_normalize_never_panics(s in "\\PC*") {
            let _ = normalize(s.as_str());
        }

        #[test]
        fn prop_brazilian_format_round_trips(units in 0u32..1_000_000, cents in 0u32..100) {
            let grouped = format_brazilian(units);
            let text = format!("{},{:02}", grouped, cents);
            let expected = Decimal::from(units) + Decimal::new(i64::from(cents), 2);
            prop_assert_eq!(normalize(text.as_str()), expected);
        }

        #[test]
        fn prop_plain_integers_are_exact(n in 0u32..1_000_000) {
            prop_assert_eq!(normalize(n.to_string().as_str()), Decimal::from(n));
        }
    }

    fn format_brazilian(units: u32) -> String {
        let digits = units.to_string();
        let mut out = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(c);
        }
        out
    }
}
