use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

/// Parse a `Viewing_Month` cell into a calendar date.
///
/// Accepts full dates (`2025-06-14`, `2025/06/14`), timestamps with or without
/// an offset, bare months (`2025-06`, `2025/06`, first of the month) and
/// month-name forms (`June 2025`, `Jun 2025`, `Jun-2025`).
pub fn parse_viewing_month(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // 1) plain dates
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // 2) timestamps
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    // 3) year + month
    if s.len() == 7 && matches!(s.as_bytes()[4], b'-' | b'/') {
        let sep = s.as_bytes()[4] as char;
        let padded = format!("{s}{sep}01");
        let fmt = if sep == '-' { "%Y-%m-%d" } else { "%Y/%m/%d" };
        if let Ok(d) = NaiveDate::parse_from_str(&padded, fmt) {
            return Some(d);
        }
    }

    // 4) month names
    let spaced = s.replace('-', " ");
    NaiveDate::parse_from_str(&format!("1 {spaced}"), "%d %B %Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_dates() {
        assert_eq!(parse_viewing_month("2025-06-14"), Some(ymd(2025, 6, 14)));
        assert_eq!(parse_viewing_month("2025/06/14"), Some(ymd(2025, 6, 14)));
        assert_eq!(parse_viewing_month(" 2024-12-01 "), Some(ymd(2024, 12, 1)));
    }

    #[test]
    fn test_timestamps() {
        assert_eq!(
            parse_viewing_month("2025-06-14 08:30:00"),
            Some(ymd(2025, 6, 14))
        );
        assert_eq!(
            parse_viewing_month("2025-06-14T08:30:00"),
            Some(ymd(2025, 6, 14))
        );
        assert_eq!(
            parse_viewing_month("2025-06-14T08:30:00+10:00"),
            Some(ymd(2025, 6, 14))
        );
        assert_eq!(
            parse_viewing_month("2025/06/14 23:59:59"),
            Some(ymd(2025, 6, 14))
        );
    }

    #[test]
    fn test_year_month() {
        assert_eq!(parse_viewing_month("2025-06"), Some(ymd(2025, 6, 1)));
        assert_eq!(parse_viewing_month("2025/07"), Some(ymd(2025, 7, 1)));
        assert_eq!(parse_viewing_month("2025-13"), None);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(parse_viewing_month("June 2025"), Some(ymd(2025, 6, 1)));
        assert_eq!(parse_viewing_month("Jun 2025"), Some(ymd(2025, 6, 1)));
        assert_eq!(parse_viewing_month("Dec-2024"), Some(ymd(2024, 12, 1)));
    }

    #[test]
    fn test_garbage() {
        assert_eq!(parse_viewing_month(""), None);
        assert_eq!(parse_viewing_month("not a date"), None);
        assert_eq!(parse_viewing_month("2025-02-30"), None);
    }
}
