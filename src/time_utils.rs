// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date filter handling.

use chrono::NaiveDate;

/// Date format accepted by the list endpoint's `beginTime`/`endTime`.
pub const FILTER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Treat an empty filter the same as an absent one.
pub fn non_empty(filter: Option<&str>) -> Option<&str> {
    filter.map(str::trim).filter(|f| !f.is_empty())
}

/// Parse a `YYYY-MM-DD` filter value.
pub fn parse_filter_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), FILTER_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_drops_blank_filters() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(Some("2025-01-01")), Some("2025-01-01"));
    }

    #[test]
    fn test_parse_filter_date() {
        assert_eq!(
            parse_filter_date("2025-03-09"),
            NaiveDate::from_ymd_opt(2025, 3, 9)
        );
        assert!(parse_filter_date("2025/03/09").is_none());
        assert!(parse_filter_date("2025-02-30").is_none());
        assert!(parse_filter_date("yesterday").is_none());
    }
}
