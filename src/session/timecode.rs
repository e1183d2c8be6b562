//! Timecode conversion and duration formatting.

use regex::Regex;
use std::sync::LazyLock;

/// The same digit class the clip grammar matches timecodes with.
#[allow(clippy::expect_used)]
static DECIMAL_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("digit pattern compiles"));

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Value of a decimal digit from any script (`7`, `٣`, `७`).
fn decimal_digit_value(c: char) -> Option<u32> {
    if let Some(value) = c.to_digit(10) {
        return Some(value);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    // Unicode encodes decimal digits in contiguous runs of ten starting at
    // zero, so the offset from the start of the run is the value.
    let mut zero = u32::from(c);
    while let Some(previous) = zero.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(previous) {
            break;
        }
        zero -= 1;
    }
    Some((u32::from(c) - zero) % 10)
}

/// Parse a non-empty run of decimal digits.
fn parse_field(field: &str) -> Option<i64> {
    if field.is_empty() {
        return None;
    }
    field.chars().try_fold(0_i64, |value, c| {
        value
            .checked_mul(10)?
            .checked_add(i64::from(decimal_digit_value(c)?))
    })
}

/// Convert an `HH:MM:SS` timecode to whole seconds.
///
/// Fields may use decimal digits from any script. Returns `None` when the
/// text does not have exactly three numeric fields or the result does not
/// fit in an `i64`.
pub fn timecode_to_seconds(timecode: &str) -> Option<i64> {
    let mut parts = timecode.split(':');
    let hours = parse_field(parts.next()?)?;
    let minutes = parse_field(parts.next()?)?;
    let seconds = parse_field(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }

    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// Format a number of seconds as `HH:MM:SS`.
///
/// Hours are not wrapped at 24 and may use more than two digits. Negative
/// values use floor division, so `-15` seconds renders as `-1:59:45`.
pub fn format_duration(total_seconds: i64) -> String {
    let hours = total_seconds.div_euclid(3600);
    let minutes = total_seconds.rem_euclid(3600) / 60;
    let seconds = total_seconds.rem_euclid(60);
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timecode_to_seconds() {
        assert_eq!(timecode_to_seconds("00:00:00"), Some(0));
        assert_eq!(timecode_to_seconds("00:00:25"), Some(25));
        assert_eq!(timecode_to_seconds("01:02:03"), Some(3723));
        assert_eq!(timecode_to_seconds("100:00:00"), Some(360_000));
    }

    #[test]
    fn test_timecode_fields_not_range_checked() {
        assert_eq!(timecode_to_seconds("00:90:75"), Some(90 * 60 + 75));
    }

    #[test]
    fn test_timecode_rejects_malformed() {
        assert_eq!(timecode_to_seconds("00:00"), None);
        assert_eq!(timecode_to_seconds("00:00:00:00"), None);
        assert_eq!(timecode_to_seconds("aa:00:00"), None);
        assert_eq!(timecode_to_seconds("+1:00:00"), None);
        assert_eq!(timecode_to_seconds(":00:00"), None);
        assert_eq!(timecode_to_seconds("99999999999999999999:00:00"), None);
    }

    #[test]
    fn test_timecode_other_script_digits() {
        // Arabic-Indic 01:02:03.
        assert_eq!(
            timecode_to_seconds("\u{660}\u{661}:\u{660}\u{662}:\u{660}\u{663}"),
            Some(3723)
        );
        // Devanagari 9 minutes.
        assert_eq!(timecode_to_seconds("00:\u{96F}:00"), Some(540));
        // Mathematical double-struck 2, inside a span of adjacent digit runs.
        assert_eq!(timecode_to_seconds("00:00:\u{1D7DA}"), Some(2));
    }

    #[test]
    fn test_decimal_digit_value_rejects_non_digits() {
        assert_eq!(decimal_digit_value('a'), None);
        assert_eq!(decimal_digit_value('\u{B2}'), None);
        assert_eq!(decimal_digit_value('\u{663}'), Some(3));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(15), "00:00:15");
        assert_eq!(format_duration(3723), "01:02:03");
        assert_eq!(format_duration(86_400), "24:00:00");
        assert_eq!(format_duration(360_000), "100:00:00");
    }

    #[test]
    fn test_format_negative_duration_floors() {
        assert_eq!(format_duration(-15), "-1:59:45");
        assert_eq!(format_duration(-3600), "-1:00:00");
        assert_eq!(format_duration(-3601), "-2:59:59");
    }
}
