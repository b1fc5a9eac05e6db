//! Brazilian telephone numbers: `(00) 00000-0000` and `(00) 0000-0000`.

/// Keep only the ASCII digits of `value`.
pub fn unformat_phone(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Format as `(DD) NNNNN-NNNN` (mobile) or `(DD) NNNN-NNNN` (landline).
///
/// Inputs with fewer than ten digits are returned unchanged. Longer inputs
/// are assumed to carry a country code and keep their last eleven digits.
pub fn format_phone(value: &str) -> String {
    let digits = unformat_phone(value);
    match digits.len() {
        0..=9 => value.to_string(),
        10 => split(&digits, 4),
        11 => split(&digits, 5),
        n => split(&digits[n - 11..], 5),
    }
}

/// Format as `+CC (DD) NNNNN-NNNN`, defaulting the country code to 55.
pub fn format_phone_international(value: &str) -> String {
    let digits = unformat_phone(value);
    match digits.len() {
        0..=9 => value.to_string(),
        10 | 11 => format!("+55 {}", format_phone(&digits)),
        n => format!("+{} {}", &digits[..n - 11], split(&digits[n - 11..], 5)),
    }
}

/// Ten to fifteen digits with an area code between 11 and 99.
pub fn is_valid_phone(value: &str) -> bool {
    let digits = unformat_phone(value);
    if !(10..=15).contains(&digits.len()) {
        return false;
    }
    let local = &digits[digits.len().saturating_sub(11)..];
    local[..2]
        .parse::<u8>()
        .is_ok_and(|ddd| (11..=99).contains(&ddd))
}

fn split(digits: &str, first_len: usize) -> String {
    let (ddd, rest) = digits.split_at(2);
    let (first, second) = rest.split_at(first_len);
    format!("({ddd}) {first}-{second}")
}
