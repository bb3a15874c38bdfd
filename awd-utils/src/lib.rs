//! Shared utility functions for AWD crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{Datelike, NaiveDate};

    /// Date formats accepted in the wildfire dataset's `Date` column.
    pub const DATASET_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Parse a dataset date, trying each of [`DATASET_DATE_FORMATS`] in turn.
    ///
    /// The published wildfire CSV writes dates as `M/D/YYYY`; normalized
    /// copies use ISO dates. A trailing time component (`2005-01-04 00:00`)
    /// is ignored.
    pub fn parse_dataset_date(s: &str) -> Result<NaiveDate, DateError> {
        let trimmed = s.trim();
        let date_part = trimmed.split_whitespace().next().unwrap_or("");
        DATASET_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
            .ok_or_else(|| DateError(format!("unrecognized date '{}'", trimmed)))
    }

    /// Calendar year and month number (1-12) of a date.
    pub fn year_month(date: &NaiveDate) -> (i32, u32) {
        (date.year(), date.month())
    }

}

/// Month name helpers
pub mod months {
    /// English month names, January first.
    pub const MONTH_NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];

    /// Name of a month number (1 = January). `None` outside 1..=12.
    pub fn month_name(month: u32) -> Option<&'static str> {
        match month {
            1..=12 => Some(MONTH_NAMES[(month - 1) as usize]),
            _ => None,
        }
    }

    /// Month number (1-12) for a full English month name, case-insensitive.
    pub fn month_number(name: &str) -> Option<u32> {
        let name = name.trim();
        MONTH_NAMES
            .iter()
            .position(|m| m.eq_ignore_ascii_case(name))
            .map(|i| i as u32 + 1)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_month_name_bounds() {
            assert_eq!(month_name(1), Some("January"));
            assert_eq!(month_name(12), Some("December"));
            assert_eq!(month_name(0), None);
            assert_eq!(month_name(13), None);
        }

        #[test]
        fn test_month_number() {
            assert_eq!(month_number("March"), Some(3));
            assert_eq!(month_number("march"), Some(3));
            assert_eq!(month_number("Smarch"), None);
        }
    }
}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
