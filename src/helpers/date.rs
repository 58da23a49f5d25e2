//! Date helper functions

use crate::content::parse_date_string;

/// Format an authored date string for display
///
/// Strings that do not parse as a date are shown unchanged.
///
/// # Examples
/// ```ignore
/// format_date("2024-01-15", "%B %-d, %Y") // -> "January 15, 2024"
/// ```
pub fn format_date(date: &str, format: &str) -> String {
    match parse_date_string(date) {
        Some(dt) => dt.format(format).to_string(),
        None => date.to_string(),
    }
}

/// Date in `YYYY-MM-DD` form for `<time datetime="...">`
pub fn date_iso(date: &str) -> String {
    format_date(date, "%Y-%m-%d")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-15", "%B %-d, %Y"), "January 15, 2024");
        assert_eq!(format_date("2024/03/05", "%B %-d, %Y"), "March 5, 2024");
    }

    #[test]
    fn test_format_unparsable_date() {
        assert_eq!(format_date("sometime soon", "%B %-d, %Y"), "sometime soon");
    }

    #[test]
    fn test_date_iso() {
        assert_eq!(date_iso("2024-01-15T10:30:00Z"), "2024-01-15");
    }
}
