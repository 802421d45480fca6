//! Pure formatting and validation helpers for values shown to members.

/// Number of digits in a valid postal code (CEP).
pub const POSTAL_CODE_DIGITS: usize = 8;

/// Maximum number of digits in a phone number (area code included).
pub const PHONE_MAX_DIGITS: usize = 11;

/// Minimum number of digits in a phone number (area code included).
pub const PHONE_MIN_DIGITS: usize = 10;

/// Text shown when no distance can be displayed.
pub const DISTANCE_UNAVAILABLE: &str = "Distância não disponível";

/// Returns only the ASCII digits of the provided `input`.
#[must_use]
pub fn digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Checks whether the provided `input` contains exactly
/// [`POSTAL_CODE_DIGITS`] digits, ignoring any formatting characters.
#[must_use]
pub fn is_valid_postal_code(input: &str) -> bool {
    digits(input).len() == POSTAL_CODE_DIGITS
}

/// Formats the provided postal code as `DDDDD-DDD`.
///
/// The `input` is returned unchanged unless it contains exactly
/// [`POSTAL_CODE_DIGITS`] digits.
#[must_use]
pub fn format_postal_code(input: &str) -> String {
    let digits = digits(input);
    if digits.len() != POSTAL_CODE_DIGITS {
        return input.to_owned();
    }
    let (head, tail) = digits.split_at(5);
    format!("{head}-{tail}")
}

/// Progressively formats a phone number as `(DD) DDDDD-DDDD`.
///
/// Suits live typing: a partial `input` produces a partial mask, and digits
/// beyond [`PHONE_MAX_DIGITS`] are dropped.
#[must_use]
pub fn format_phone(input: &str) -> String {
    let mut digits = digits(input);
    digits.truncate(PHONE_MAX_DIGITS);

    match digits.len() {
        0 => String::new(),
        1..=2 => format!("({digits}"),
        3..=7 => format!("({}) {}", &digits[..2], &digits[2..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}

/// Removes any formatting from the provided phone number.
#[must_use]
pub fn unformat_phone(input: &str) -> String {
    digits(input)
}

/// Checks whether the provided phone number has an area code followed by an
/// 8 or 9 digits subscriber number.
#[must_use]
pub fn is_valid_phone(input: &str) -> bool {
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits(input).len())
}

/// Formats the provided distance in kilometers for display.
///
/// - below 1 km the distance is shown in whole meters (`400m`);
/// - below 10 km it's shown with a single decimal (`3.3km`);
/// - otherwise it's rounded to whole kilometers (`42km`).
#[must_use]
pub fn format_distance(km: f64) -> String {
    if !km.is_finite() {
        return DISTANCE_UNAVAILABLE.to_owned();
    }

    if km < 1.0 {
        format!("{:.0}m", (km * 1000.0).round())
    } else if km < 10.0 {
        format!("{:.1}km", (km * 10.0).round() / 10.0)
    } else {
        format!("{:.0}km", km.round())
    }
}
