// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! String → number/date coercions shared by the converters.
//!
//! Every helper degrades to zero or `None` instead of failing, so a single
//! bad cell never aborts an import.

use chrono::NaiveDate;

/// Convert `H:MM:SS` or `MM:SS` (optionally with a `.D` fraction) to seconds.
///
/// The fraction is truncated, not rounded. Components are taken literally
/// (`90:00` is 5400 seconds). Any other shape yields 0.
pub fn parse_time_to_sec(raw: &str) -> u64 {
    let trimmed = raw.trim();
    let whole = match trimmed.find('.') {
        Some(idx) => &trimmed[..idx],
        None => trimmed,
    };

    let parts: Option<Vec<u64>> = whole
        .split(':')
        .map(|part| part.trim().parse::<u64>().ok())
        .collect();

    match parts.as_deref() {
        Some([h, m, s]) => h
            .saturating_mul(3600)
            .saturating_add(m.saturating_mul(60))
            .saturating_add(*s),
        Some([m, s]) => m.saturating_mul(60).saturating_add(*s),
        _ => 0,
    }
}

/// Parse the longest leading decimal number, ignoring trailing text.
///
/// `"25°C"` → 25.0, `"1.2.3"` → 1.2, `"km"` → None.
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut j = end + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = j - end - 1;
        if int_digits > 0 || frac_digits > 0 {
            end = j;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    s[..end].parse().ok()
}

/// Parse the leading integer, ignoring trailing text (`"12/340"` → 12).
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }

    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

/// Legacy distance cell: keep only digits and `.`, then parse (`"21 km"` → 21.0).
pub fn parse_stripped_distance(raw: &str) -> f64 {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    parse_leading_float(&kept).unwrap_or(0.0)
}

/// Garmin numeric cell with thousands separators (`"1,234.5"` → 1234.5).
pub fn parse_grouped_number(raw: &str) -> f64 {
    parse_leading_float(&raw.replace(',', "")).unwrap_or(0.0)
}

/// Normalize `2025-12-21T07:46:20`, `2025/12/21 07:46:20` or a bare date to a
/// calendar date.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split(['T', ' ']).next()?;
    let iso = date_part.replace('/', "-");
    NaiveDate::parse_from_str(&iso, "%Y-%m-%d").ok()
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_three_components() {
        assert_eq!(parse_time_to_sec("1:02:03"), 3723);
        assert_eq!(parse_time_to_sec("0:00:00"), 0);
        assert_eq!(parse_time_to_sec("03:25:10"), 12310);
    }

    #[test]
    fn test_time_two_components() {
        assert_eq!(parse_time_to_sec("5:30"), 330);
        assert_eq!(parse_time_to_sec("90:00"), 5400);
    }

    #[test]
    fn test_time_fraction_truncated() {
        assert_eq!(parse_time_to_sec("07:02.2"), 422);
        assert_eq!(parse_time_to_sec("07:02.9"), 422);
        assert_eq!(parse_time_to_sec("1:00:00.5"), 3600);
    }

    #[test]
    fn test_time_malformed_is_zero() {
        assert_eq!(parse_time_to_sec(""), 0);
        assert_eq!(parse_time_to_sec("   "), 0);
        assert_eq!(parse_time_to_sec("45"), 0);
        assert_eq!(parse_time_to_sec("1:2:3:4"), 0);
        assert_eq!(parse_time_to_sec("ab:cd"), 0);
        assert_eq!(parse_time_to_sec("--"), 0);
        assert_eq!(parse_time_to_sec("-1:00"), 0);
    }

    #[test]
    fn test_leading_float() {
        assert_eq!(parse_leading_float("25°C"), Some(25.0));
        assert_eq!(parse_leading_float(" 18.5"), Some(18.5));
        assert_eq!(parse_leading_float("-3"), Some(-3.0));
        assert_eq!(parse_leading_float("1.2.3"), Some(1.2));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("km"), None);
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_float("."), None);
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(parse_leading_int("12/340"), Some(12));
        assert_eq!(parse_leading_int("  7"), Some(7));
        assert_eq!(parse_leading_int("DNF"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_stripped_distance() {
        assert_eq!(parse_stripped_distance("21 km"), 21.0);
        assert_eq!(parse_stripped_distance("42.195K"), 42.195);
        assert_eq!(parse_stripped_distance("全馬"), 0.0);
    }

    #[test]
    fn test_grouped_number() {
        assert_eq!(parse_grouped_number("1,234.5"), 1234.5);
        assert_eq!(parse_grouped_number("10.02"), 10.02);
        assert_eq!(parse_grouped_number("--"), 0.0);
    }

    #[test]
    fn test_normalize_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 12, 21);
        assert_eq!(normalize_date("2025-12-21T07:46:20"), expected);
        assert_eq!(normalize_date("2025/12/21 07:46:20"), expected);
        assert_eq!(normalize_date("2025-12-21"), expected);
        assert_eq!(normalize_date("2025/12/21"), expected);
    }

    #[test]
    fn test_normalize_date_unpadded() {
        assert_eq!(
            normalize_date("2019/3/9"),
            NaiveDate::from_ymd_opt(2019, 3, 9)
        );
    }

    #[test]
    fn test_normalize_date_rejects_garbage() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("yesterday"), None);
        assert_eq!(normalize_date("2025-13-40"), None);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.0), 3.0);
        assert_eq!(round2(10.004), 10.0);
        assert_eq!(round2(10.456), 10.46);
    }
}
