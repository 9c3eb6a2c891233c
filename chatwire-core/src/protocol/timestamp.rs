//! Wire Timestamp Format
//!
//! The relay timestamps inbound messages with a local-time string in a
//! fixed format and a fixed UTC offset. Historically this was
//! `yyyy-MM-dd HH:mm:ss` in Asia/Tokyo; both the format and the offset
//! are configuration here, not constants at the parse site.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use super::error::DecodeError;

/// Strftime format matching the historical `yyyy-MM-dd HH:mm:ss` wire dates.
pub const DEFAULT_WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default UTC offset for wire timestamps (+09:00).
pub const DEFAULT_UTC_OFFSET_SECS: i32 = 9 * 3600;

/// Configurable parse rules for the `createdDatetime` wire field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireTimestampFormat {
    /// Strftime format string the timestamp must match exactly.
    pub format: String,
    /// UTC offset (seconds east) the naive wire time is interpreted in.
    pub utc_offset_secs: i32,
}

impl Default for WireTimestampFormat {
    fn default() -> Self {
        WireTimestampFormat {
            format: DEFAULT_WIRE_FORMAT.to_string(),
            utc_offset_secs: DEFAULT_UTC_OFFSET_SECS,
        }
    }
}

impl WireTimestampFormat {
    /// Creates a format with a custom strftime pattern and UTC offset.
    pub fn new(format: &str, utc_offset_secs: i32) -> Self {
        WireTimestampFormat {
            format: format.to_string(),
            utc_offset_secs,
        }
    }

    /// Parses a wire timestamp string.
    ///
    /// Fails with [`DecodeError::BadTimestamp`] if the string does not
    /// match the configured format or the configured offset is out of
    /// range (|offset| must be below 24 hours).
    pub fn parse(&self, raw: &str) -> Result<DateTime<FixedOffset>, DecodeError> {
        let naive = NaiveDateTime::parse_from_str(raw, &self.format)
            .map_err(|e| DecodeError::BadTimestamp(format!("{raw:?}: {e}")))?;

        let offset = FixedOffset::east_opt(self.utc_offset_secs).ok_or_else(|| {
            DecodeError::BadTimestamp(format!(
                "invalid UTC offset: {} seconds",
                self.utc_offset_secs
            ))
        })?;

        naive
            .and_local_timezone(offset)
            .single()
            .ok_or_else(|| DecodeError::BadTimestamp(format!("ambiguous local time: {raw:?}")))
    }

    /// Formats a datetime back into the wire representation.
    pub fn format_datetime(&self, datetime: &DateTime<FixedOffset>) -> String {
        datetime.format(&self.format).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format_parses_sample_date() {
        let fmt = WireTimestampFormat::default();
        let parsed = fmt.parse("2020-12-05 10:00:00").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 9 * 3600);
        assert_eq!(fmt.format_datetime(&parsed), "2020-12-05 10:00:00");
    }

    #[test]
    fn test_out_of_range_offset_rejected() {
        let fmt = WireTimestampFormat::new(DEFAULT_WIRE_FORMAT, 24 * 3600);
        let result = fmt.parse("2020-12-05 10:00:00");
        assert!(matches!(result, Err(DecodeError::BadTimestamp(_))));
    }
}
