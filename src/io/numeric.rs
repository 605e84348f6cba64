//! Locale-formatted number parsing.

use std::sync::LazyLock;

use regex::Regex;

/// `1.234,56`: dot-grouped thousands ahead of a decimal comma.
static DOT_GROUPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]{1,3}(\.[0-9]{3})+,[0-9]+$").expect("dot grouping pattern"));

/// Parse a value field that may use a decimal comma.
///
/// The first comma is the decimal separator. Dots are dropped only when they
/// group thousands ahead of that comma (`1.234,56` → `1234.56`); any other mix
/// of `.` and `,` (e.g. `1,234.50`) doesn't parse. Non-finite results are `None`.
pub fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let normalized = if DOT_GROUPED.is_match(trimmed) {
        trimmed.replace('.', "").replacen(',', ".", 1)
    } else {
        trimmed.replacen(',', ".", 1)
    };

    let v = normalized.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_comma() {
        assert_eq!(parse_value("1234,5"), Some(1234.5));
        assert_eq!(parse_value("-0,25"), Some(-0.25));
    }

    #[test]
    fn grouped_thousands_with_decimal_comma() {
        assert_eq!(parse_value("1.234,56"), Some(1234.56));
        assert_eq!(parse_value("12.345.678,9"), Some(12345678.9));
        assert_eq!(parse_value("-1.000,5"), Some(-1000.5));
    }

    #[test]
    fn comma_grouped_point_decimal_is_rejected() {
        assert_eq!(parse_value("1,234.50"), None);
        assert_eq!(parse_value("1,234,567.5"), None);
    }

    #[test]
    fn malformed_dot_grouping_is_rejected() {
        assert_eq!(parse_value("1.23,5"), None);
        assert_eq!(parse_value("1234.567,8"), None);
    }

    #[test]
    fn plain_decimal_point() {
        assert_eq!(parse_value("1.5"), Some(1.5));
        assert_eq!(parse_value(" 42 "), Some(42.0));
    }

    #[test]
    fn only_the_first_comma_is_a_decimal_point() {
        assert_eq!(parse_value("1,234,5"), None);
    }

    #[test]
    fn non_numbers_and_non_finite_values_are_invalid() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("n/a"), None);
        assert_eq!(parse_value("inf"), None);
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value("1e999"), None);
    }
}
