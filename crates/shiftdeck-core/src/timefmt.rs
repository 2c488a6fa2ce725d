//! Time parsing and formatting for worklog boundaries.
//!
//! Server payloads mix full ISO-8601 timestamps and bare `HH:mm` strings for
//! the same logical field. Everything funnels through [`TimeParser::parse`],
//! which normalizes both shapes into a [`ClockTime`] and caches per distinct
//! input string, since the same literal is parsed repeatedly while rendering
//! tables and previews.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

/// Bare clock times carry no date; they are anchored here so that two `HH:mm`
/// values from the same conflict group stay comparable.
const ANCHOR_DATE: (i32, u32, u32) = (1970, 1, 1);

/// A parsed instant, or an explicit sentinel for input that matched neither
/// accepted pattern. Invalid values never panic; they compare as equal to
/// everything so sorts stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockTime {
    Valid(NaiveDateTime),
    Invalid,
}

impl ClockTime {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Ordering that treats any comparison involving an invalid instant as
    /// equal, so stable sorts leave such rows where they were.
    #[must_use]
    pub fn cmp_stable(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Valid(a), Self::Valid(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }

    /// Minutes from `self` to `end`, or `None` when either side is invalid.
    #[must_use]
    pub fn minutes_until(&self, end: &Self) -> Option<i64> {
        match (self, end) {
            (Self::Valid(start), Self::Valid(end)) => {
                Some(end.signed_duration_since(*start).num_minutes())
            }
            _ => None,
        }
    }
}

/// Parser with a per-instance cache keyed by the raw input string.
#[derive(Debug)]
pub struct TimeParser {
    hm_pattern: Regex,
    cache: HashMap<String, ClockTime>,
}

impl TimeParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            hm_pattern: Regex::new(r"^\d{1,2}:\d{2}$").expect("Invalid regex"),
            cache: HashMap::new(),
        }
    }

    /// Parse a full ISO-8601 timestamp or a bare `HH:mm` string.
    ///
    /// Returns [`ClockTime::Invalid`] when neither pattern matches; never
    /// errors. Results are cached per distinct input, so repeated calls with
    /// the same literal are lookups.
    pub fn parse(&mut self, raw: &str) -> ClockTime {
        if let Some(cached) = self.cache.get(raw) {
            return *cached;
        }

        let parsed = self.parse_uncached(raw);
        if !parsed.is_valid() {
            tracing::warn!(input = raw, "unparseable worklog time");
        }
        self.cache.insert(raw.to_string(), parsed);
        parsed
    }

    fn parse_uncached(&self, raw: &str) -> ClockTime {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ClockTime::Invalid;
        }

        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
            return ClockTime::Valid(dt.naive_local());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
            return ClockTime::Valid(dt);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
            return ClockTime::Valid(dt);
        }

        if self.hm_pattern.is_match(trimmed) {
            if let Ok(time) = NaiveTime::parse_from_str(trimmed, "%H:%M") {
                return ClockTime::Valid(anchor_date().and_time(time));
            }
        }

        ClockTime::Invalid
    }
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new()
    }
}

fn anchor_date() -> NaiveDate {
    let (year, month, day) = ANCHOR_DATE;
    NaiveDate::from_ymd_opt(year, month, day).expect("anchor date is valid")
}

/// Render an instant as `HH:mm`, or an empty string when invalid.
#[must_use]
pub fn format_hm(value: &ClockTime) -> String {
    match value {
        ClockTime::Valid(dt) => dt.format("%H:%M").to_string(),
        ClockTime::Invalid => String::new(),
    }
}

/// Non-negative duration between two instants as zero-padded `HH:mm`.
///
/// Negative differences and invalid operands clamp to `00:00`.
#[must_use]
pub fn diff_hm(start: &ClockTime, end: &ClockTime) -> String {
    let minutes = start.minutes_until(end).unwrap_or(0).max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(raw: &str) -> ClockTime {
        TimeParser::new().parse(raw)
    }

    #[test]
    fn parses_bare_hm() {
        assert_eq!(format_hm(&parse("09:30")), "09:30");
        assert_eq!(format_hm(&parse("9:05")), "09:05");
    }

    #[test]
    fn parses_iso_timestamps() {
        assert_eq!(format_hm(&parse("2024-03-18T14:45:00")), "14:45");
        assert_eq!(format_hm(&parse("2024-03-18T14:45:00+00:00")), "14:45");
        assert_eq!(format_hm(&parse("2024-03-18 14:45:00")), "14:45");
    }

    #[test]
    fn malformed_input_yields_invalid_without_panic() {
        assert_eq!(parse(""), ClockTime::Invalid);
        assert_eq!(parse("not a time"), ClockTime::Invalid);
        assert_eq!(parse("25:99"), ClockTime::Invalid);
        assert_eq!(format_hm(&ClockTime::Invalid), "");
    }

    #[test]
    fn parse_is_cached_and_idempotent() {
        let mut parser = TimeParser::new();
        let first = parser.parse("10:15");
        let second = parser.parse("10:15");
        assert_eq!(first, second);
        assert_eq!(parser.cache.len(), 1);

        let bad_first = parser.parse("garbage");
        let bad_second = parser.parse("garbage");
        assert_eq!(bad_first, bad_second);
        assert_eq!(bad_first, ClockTime::Invalid);
        assert_eq!(parser.cache.len(), 2);
    }

    #[test]
    fn diff_hm_formats_duration() {
        let mut parser = TimeParser::new();
        let start = parser.parse("10:00");
        let end = parser.parse("12:30");
        assert_eq!(diff_hm(&start, &end), "02:30");
    }

    #[test]
    fn diff_hm_clamps_negative_to_zero() {
        let mut parser = TimeParser::new();
        let start = parser.parse("12:00");
        let end = parser.parse("10:00");
        assert_eq!(diff_hm(&start, &end), "00:00");
    }

    #[test]
    fn diff_hm_with_invalid_operand_is_zero() {
        let mut parser = TimeParser::new();
        let start = parser.parse("12:00");
        assert_eq!(diff_hm(&start, &ClockTime::Invalid), "00:00");
        assert_eq!(diff_hm(&ClockTime::Invalid, &start), "00:00");
    }

    #[test]
    fn cmp_stable_treats_invalid_as_equal() {
        let mut parser = TimeParser::new();
        let a = parser.parse("08:00");
        let b = parser.parse("09:00");
        assert_eq!(a.cmp_stable(&b), Ordering::Less);
        assert_eq!(a.cmp_stable(&ClockTime::Invalid), Ordering::Equal);
        assert_eq!(ClockTime::Invalid.cmp_stable(&b), Ordering::Equal);
    }
}
