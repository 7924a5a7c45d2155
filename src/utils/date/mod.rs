// Date utility functions

use chrono::{DateTime, Local, NaiveDate};

/// Format a date as the `YYYY-MM-DD` key used at the backend boundary.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` key back into a date.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

pub fn is_same_day(date1: DateTime<Local>, date2: DateTime<Local>) -> bool {
    date1.date_naive() == date2.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_key_round_trip() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        let key = date_key(date);
        assert_eq!(key, "2026-03-07");
        assert_eq!(parse_date_key(&key), Some(date));
    }

    #[test]
    fn test_parse_date_key_rejects_garbage() {
        assert_eq!(parse_date_key("07/03/2026"), None);
        assert_eq!(parse_date_key("not-a-date"), None);
        assert_eq!(parse_date_key(""), None);
    }

    #[test]
    fn test_is_same_day() {
        let morning = Local.with_ymd_and_hms(2026, 3, 7, 6, 0, 0).unwrap();
        let evening = Local.with_ymd_and_hms(2026, 3, 7, 23, 0, 0).unwrap();
        let next = Local.with_ymd_and_hms(2026, 3, 8, 0, 0, 0).unwrap();

        assert!(is_same_day(morning, evening));
        assert!(!is_same_day(evening, next));
    }
}
