//! National ID (CPF) checksum validation.

/// Number of digits in a CPF.
pub const CPF_LENGTH: usize = 11;

/// Returns true if `cpf` is a structurally valid CPF.
///
/// Formatting characters (dots, dashes, spaces) are ignored. The ID is
/// rejected when it does not have exactly 11 digits, when all digits are
/// identical, or when either check digit does not match.
///
/// # Examples
///
/// ```
/// use fleet_payroll::validators::is_valid_cpf;
///
/// assert!(is_valid_cpf("529.982.247-25"));
/// assert!(!is_valid_cpf("111.111.111-11"));
/// assert!(!is_valid_cpf("1234"));
/// ```
pub fn is_valid_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != CPF_LENGTH {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Computes the check digit over `body`, weighting from `len + 1` down to 2.
fn check_digit(body: &[u32]) -> u32 {
    let top_weight = body.len() as u32 + 1;
    let sum: u32 = body
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top_weight - i as u32))
        .sum();

    match (sum * 10) % 11 {
        10 => 0,
        r => r,
    }
}
