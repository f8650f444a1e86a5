//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number regex (E.164 format)
static E164_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").unwrap());

/// Convert user-entered phone text into the canonical form used as a lookup key.
///
/// Rules, first match wins:
/// 1. 10 digits: assumed North American, `+1` is prefixed.
/// 2. 11 digits starting with `1`: `+` is prefixed.
/// 3. Input starting with `+`: returned unchanged.
/// 4. Anything else: `+1` is prefixed to the digits.
///
/// Digits are counted after stripping every non-digit character. The
/// function never fails; garbage in produces a string that will simply
/// never match a stored record.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 10 {
        format!("+1{}", digits)
    } else if digits.len() == 11 && digits.starts_with('1') {
        format!("+{}", digits)
    } else if raw.starts_with('+') {
        raw.to_string()
    } else {
        format!("+1{}", digits)
    }
}

/// Check if a phone number is in E.164 format
pub fn is_e164(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Mask a phone number for logs, keeping only the last four digits
pub fn mask_phone_number(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 7 {
        let tail: String = digits[digits.len() - 4..].iter().collect();
        format!("***{}", tail)
    } else {
        "****".to_string()
    }
}
