//! XMLTV timestamp handling
//!
//! XMLTV programmes carry their times as `YYYYMMDDHHMMSS ±HHMM`. The offset
//! is mandatory.

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// Format of XMLTV `start` and `stop` attributes
pub const XMLTV_DATETIME_FORMAT: &str = "%Y%m%d%H%M%S %z";

/// Errors that can occur while reading XMLTV timestamps
#[derive(Error, Debug)]
pub enum DateTimeError {
    #[error("Invalid XMLTV datetime: '{input}' - expected format YYYYMMDDHHMMSS +HHMM")]
    InvalidFormat { input: String },
}

/// Parse an XMLTV timestamp, keeping its original offset
pub fn parse_xmltv_datetime(input: &str) -> Result<DateTime<FixedOffset>, DateTimeError> {
    DateTime::parse_from_str(input.trim(), XMLTV_DATETIME_FORMAT).map_err(|_| {
        DateTimeError::InvalidFormat {
            input: input.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Timelike};

    #[test]
    fn test_parse_with_offset() {
        let dt = parse_xmltv_datetime("20240105235000 +0100").unwrap();
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(dt.hour(), 23);
        assert_eq!(dt.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn test_date_is_taken_in_own_offset() {
        // 23:50 at +0100 is still the 5th locally even though it is 22:50 UTC
        let dt = parse_xmltv_datetime("20240105235000 +0100").unwrap();
        assert_eq!(dt.day(), 5);
        let dt = parse_xmltv_datetime("20240106003000 +0100").unwrap();
        assert_eq!(dt.day(), 6);
    }

    #[test]
    fn test_missing_offset_is_rejected() {
        let error = parse_xmltv_datetime("20240105120000").unwrap_err();
        assert!(error.to_string().contains("20240105120000"));
    }

    #[test]
    fn test_format_round_trip() {
        let dt = parse_xmltv_datetime("20240105120000 -0230").unwrap();
        assert_eq!(dt.format(XMLTV_DATETIME_FORMAT).to_string(), "20240105120000 -0230");
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(parse_xmltv_datetime("").is_err());
        assert!(parse_xmltv_datetime("2024-01-05T12:00:00Z").is_err());
        assert!(parse_xmltv_datetime("20241305120000 +0100").is_err());
    }
}
