use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Trim whitespace + strip outer quotes if present.
fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Parse `"YYYY-MM-DD"`, `"YYYY/MM/DD"` or `"MM/DD/YYYY"`, with or without a
/// trailing `HH:MM:SS`, into a calendar date. Time of day is discarded.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = clean_str(s);
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calendar_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        for raw in [
            "2023-03-01",
            "2023/03/01",
            "03/01/2023",
            "\"2023-03-01\"",
            "  2023-03-01 ",
            "2023-03-01 17:45:00",
            "2023-03-01T00:00:00",
        ] {
            assert_eq!(parse_calendar_date(raw), Some(expected), "input {raw:?}");
        }
    }

    #[test]
    fn test_parse_calendar_date_rejects_garbage() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("\"\""), None);
        assert_eq!(parse_calendar_date("next tuesday"), None);
        assert_eq!(parse_calendar_date("2023-02-30"), None);
        assert_eq!(parse_calendar_date("2023-13-01"), None);
    }
}
