//! Local timestamps without timezone, stored in their textual form
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical minute-precision format, as produced by datetime-local inputs
pub const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

const ACCEPTED_FORMATS: [&str; 5] = [
    MINUTE_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// A local wall-clock timestamp kept verbatim.
///
/// The raw text is preserved so that a malformed value read back from the
/// slot survives a save; callers that need the instant go through
/// [`LocalTimestamp::parse`], which yields `None` for anything unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalTimestamp(String);

impl LocalTimestamp {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Format an instant at minute precision
    pub fn from_datetime(at: NaiveDateTime) -> Self {
        Self(at.format(MINUTE_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn parse(&self) -> Option<NaiveDateTime> {
        parse_local(&self.0)
    }

    /// Human-facing form with a space instead of the `T` separator
    pub fn display(&self) -> String {
        self.0.replacen('T', " ", 1)
    }
}

impl From<NaiveDateTime> for LocalTimestamp {
    fn from(at: NaiveDateTime) -> Self {
        Self::from_datetime(at)
    }
}

impl From<&str> for LocalTimestamp {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for LocalTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a local timestamp in any of the accepted layouts
pub fn parse_local(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Signed difference `to - from` in fractional hours
pub fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / 3_600_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_minute_precision() {
        assert_eq!(parse_local("2026-03-14T09:30"), Some(at(9, 30)));
        assert_eq!(parse_local("2026-03-14 09:30"), Some(at(9, 30)));
        assert_eq!(parse_local("2026-03-14T09:30:00"), Some(at(9, 30)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_local(""), None);
        assert_eq!(parse_local("tomorrow"), None);
        assert_eq!(parse_local("2026-13-40T99:99"), None);
    }

    #[test]
    fn test_from_datetime_drops_seconds() {
        let instant = at(9, 30) + chrono::Duration::seconds(42);
        let ts = LocalTimestamp::from_datetime(instant);
        assert_eq!(ts.as_str(), "2026-03-14T09:30");
        assert_eq!(ts.display(), "2026-03-14 09:30");
    }

    #[test]
    fn test_hours_between_is_signed() {
        assert_eq!(hours_between(at(9, 0), at(12, 30)), 3.5);
        assert_eq!(hours_between(at(12, 30), at(9, 0)), -3.5);
    }
}
