//! Calendar defaults shared by the record types and the pipeline.

use chrono::{Local, NaiveDate};

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Expiry used when the description gives none.
pub fn default_expiry(today: NaiveDate, days: u32) -> NaiveDate {
    today + chrono::Duration::days(i64::from(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expiry_crosses_month() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(default_expiry(date(2024, 2, 25), 7), date(2024, 3, 3));
        assert_eq!(default_expiry(date(2024, 12, 28), 7), date(2025, 1, 4));
    }
}
