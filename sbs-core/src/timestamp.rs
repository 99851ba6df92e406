//! Merge the separate date and time tokens of a BaseStation line into one
//! UTC instant.
//!
//! Feeds write dates as `2017/12/23` and times as `16:01:15.429`, and some
//! emit far more fractional digits than any parser accepts
//! (`16:01:15.4294967295` has been observed). The time token is cut back to
//! millisecond precision before parsing.

use chrono::{DateTime, Utc};

use crate::types::{Result, SbsError};

/// Length of `HH:MM:SS.SSS`.
const MAX_TIME_LEN: usize = 12;

/// Combine a date token and a time token into a UTC instant.
///
/// Fails with an invalid-input error if either token is empty or if the
/// normalized `<date>T<time>Z` text is not a strict RFC 3339 instant
/// (4-digit year, 2-digit fields).
pub fn assemble_timestamp(date: &str, time: &str) -> Result<DateTime<Utc>> {
    if date.is_empty() || time.is_empty() {
        return Err(SbsError::MissingTimestamp {
            date: date.to_string(),
            time: time.to_string(),
        });
    }

    let date = date.replace('/', "-");
    let time = if time.len() > MAX_TIME_LEN {
        // A non-ASCII cut point is garbage anyway; let the parser reject it whole
        time.get(..MAX_TIME_LEN).unwrap_or(time)
    } else {
        time
    };

    let value = format!("{date}T{time}Z");
    match DateTime::parse_from_rfc3339(&value) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(source) => Err(SbsError::MalformedTimestamp { value, source }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_truncates_excess_precision() {
        let ts = assemble_timestamp("2017-12-23", "16:01:15.4294967295").unwrap();
        assert_eq!(ts, utc(2017, 12, 23, 16, 1, 15) + Duration::milliseconds(429));
    }

    #[test]
    fn test_normalizes_slashes() {
        let ts = assemble_timestamp("2017/12/23", "16:01:15").unwrap();
        assert_eq!(ts, utc(2017, 12, 23, 16, 1, 15));
    }

    #[test]
    fn test_millisecond_precision_kept() {
        let ts = assemble_timestamp("2016/03/11", "13:07:16.663").unwrap();
        assert_eq!(ts, utc(2016, 3, 11, 13, 7, 16) + Duration::milliseconds(663));
    }

    #[test]
    fn test_short_fraction() {
        let ts = assemble_timestamp("2016/03/11", "13:07:16.6").unwrap();
        assert_eq!(ts, utc(2016, 3, 11, 13, 7, 16) + Duration::milliseconds(600));
    }

    #[test]
    fn test_empty_tokens_rejected() {
        let err = assemble_timestamp("", "16:01:15").unwrap_err();
        assert!(matches!(err, SbsError::MissingTimestamp { .. }));
        assert!(err.is_invalid_input());

        let err = assemble_timestamp("2017-12-23", "").unwrap_err();
        assert!(matches!(err, SbsError::MissingTimestamp { .. }));
    }

    #[test]
    fn test_malformed_rejected() {
        let err = assemble_timestamp("2017-13-45", "16:01:15").unwrap_err();
        assert!(matches!(err, SbsError::MalformedTimestamp { .. }));
        assert!(err.is_invalid_input());

        let err = assemble_timestamp("2017/12/23", "noon").unwrap_err();
        assert!(matches!(err, SbsError::MalformedTimestamp { .. }));
    }

    #[test]
    fn test_unpadded_fields_rejected() {
        for (date, time) in [
            ("17-12-23", "16:01:15"),
            ("2017-1-5", "16:01:15"),
            ("2017/12/23", "6:1:5"),
            ("2017/12/23", "16:01"),
        ] {
            let err = assemble_timestamp(date, time).unwrap_err();
            assert!(
                matches!(err, SbsError::MalformedTimestamp { .. }),
                "{date} {time} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_ascii_time_rejected() {
        let err = assemble_timestamp("2017/12/23", "16:01:15.42éé").unwrap_err();
        assert!(err.is_invalid_input());
    }
}
