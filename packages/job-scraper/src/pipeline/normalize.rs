//! Date normalization for model-supplied values.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

pub use crate::types::dates::{default_expiry, today};

/// Strict `yyyy-mm-dd`.
fn iso_date() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"))
}

/// Values that explicitly mean "no date".
const ABSENT_MARKERS: [&str; 3] = ["none", "not specified", ""];

/// Parse a strict `yyyy-mm-dd` date.
///
/// Absence markers, other formats, and impossible dates all yield `None`.
/// There is no fuzzy parsing.
pub fn normalize_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if ABSENT_MARKERS.contains(&text.to_lowercase().as_str()) {
        return None;
    }
    if !iso_date().is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Resolve an expiry value that is never absent.
pub fn resolve_expiry(text: &str, today: NaiveDate, days: u32) -> NaiveDate {
    normalize_date(text).unwrap_or_else(|| default_expiry(today, days))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_absent_markers() {
        for text in ["None", "none", "NOT SPECIFIED", "Not specified", "", "   "] {
            assert_eq!(normalize_date(text), None, "{:?}", text);
        }
    }

    #[test]
    fn test_non_iso_formats_are_absent() {
        for text in [
            "June 2024",
            "N/A",
            "2024/01/01",
            "01-01-2024",
            "2024-1-1",
            "2024-01-01T00:00:00",
            "2024-01-01 extra",
            "asap",
        ] {
            assert_eq!(normalize_date(text), None, "{:?}", text);
        }
    }

    #[test]
    fn test_impossible_dates_are_absent() {
        assert_eq!(normalize_date("2024-02-30"), None);
        assert_eq!(normalize_date("2023-13-01"), None);
    }

    #[test]
    fn test_valid_dates_round_trip() {
        for (text, expected) in [
            ("2024-01-01", date(2024, 1, 1)),
            ("2024-02-29", date(2024, 2, 29)),
            ("1999-12-31", date(1999, 12, 31)),
            (" 2025-07-15 ", date(2025, 7, 15)),
        ] {
            let parsed = normalize_date(text).unwrap();
            assert_eq!(parsed, expected);
            assert_eq!(parsed.to_string(), text.trim());
        }
    }

    #[test]
    fn test_resolve_expiry() {
        let today = date(2024, 6, 1);
        assert_eq!(resolve_expiry("None", today, 7), date(2024, 6, 8));
        assert_eq!(resolve_expiry("next week", today, 7), date(2024, 6, 8));
        assert_eq!(resolve_expiry("2024-09-30", today, 7), date(2024, 9, 30));
    }
}
