//! Reusable field validators
//!
//! Pure predicates over primitive values. Setters combine these with an
//! assignment; none of them allocate an error, they only answer yes or no.

use regex::Regex;
use std::sync::OnceLock;

/// Default maximum length for short text fields
pub const MAX_TEXT_LEN: usize = 255;

/// Maximum length for description and comment fields
pub const MAX_LONG_TEXT_LEN: usize = 1000;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Non-empty and at most `max_len` characters
pub fn check_string(value: &str, max_len: usize) -> bool {
    !value.is_empty() && value.chars().count() <= max_len
}

/// At most `max_len` characters, empty allowed
pub fn check_optional_string(value: &str, max_len: usize) -> bool {
    value.chars().count() <= max_len
}

/// Review rating between 0 and 5 inclusive
pub fn check_rating(rating: i64) -> bool {
    (0..=5).contains(&rating)
}

/// `YYYY-MM-DD` shape only; month and day ranges are not checked
pub fn check_date(value: &str) -> bool {
    static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = DATE_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid")
    });
    regex.is_match(value)
}

/// Case-sensitive exact membership in a fixed literal set
pub fn check_in_set(value: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|candidate| candidate == value)
}

/// Non-negative and finite
pub fn check_float(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Non-negative
pub fn check_int(value: i64) -> bool {
    value >= 0
}

/// Contains both `@` and `.`
pub fn check_email(value: &str) -> bool {
    value.contains('@') && value.contains('.')
}

/// At least [`MIN_PASSWORD_LEN`] characters with a digit, an uppercase letter,
/// a lowercase letter and one character from `specials`
pub fn check_password(value: &str, specials: &str) -> bool {
    value.chars().count() >= MIN_PASSWORD_LEN
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| c.is_uppercase())
        && value.chars().any(|c| c.is_lowercase())
        && value.chars().any(|c| specials.contains(c))
}
