use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Input grammar for a date without time.
pub const DATE_PATTERN: &str = "yyyy-MM-dd";
/// Input grammar for a date with a 24-hour time.
pub const DATE_TIME_PATTERN: &str = "yyyy-MM-dd HH:mm";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const DATE_DISPLAY: &str = "%b %d %Y";
const DATE_TIME_DISPLAY: &str = "%b %d %Y %H:%M";

// `#` marks a digit, anything else must match exactly.
const DATE_SHAPE: &str = "####-##-##";
const DATE_TIME_SHAPE: &str = "####-##-## ##:##";

/// A calendar date, optionally carrying a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Temporal {
    DateOnly(NaiveDate),
    DateTime(NaiveDateTime),
}

/// Raised when a raw string does not follow the date or date-time grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' does not match {pattern}: {reason}")]
pub struct TemporalParseError {
    pub input: String,
    pub pattern: &'static str,
    pub reason: String,
}

impl Temporal {
    /// Renders the value back in the grammar accepted by [`parse`].
    pub fn to_raw(&self) -> String {
        match self {
            Temporal::DateOnly(d) => d.format(DATE_FORMAT).to_string(),
            Temporal::DateTime(dt) => dt.format(DATE_TIME_FORMAT).to_string(),
        }
    }
}

/// Parses `yyyy-MM-dd` or `yyyy-MM-dd HH:mm`.
///
/// Anything longer than the date-only pattern is read as a date-time, so a
/// malformed long string is reported against the date-time grammar.
pub fn parse(raw: &str) -> Result<Temporal, TemporalParseError> {
    let has_time = raw.chars().count() > DATE_PATTERN.len();
    if has_time {
        check_shape(raw, DATE_TIME_SHAPE, DATE_TIME_PATTERN)?;
        NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT)
            .map(Temporal::DateTime)
            .map_err(|e| TemporalParseError {
                input: raw.to_string(),
                pattern: DATE_TIME_PATTERN,
                reason: e.to_string(),
            })
    } else {
        check_shape(raw, DATE_SHAPE, DATE_PATTERN)?;
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Temporal::DateOnly)
            .map_err(|e| TemporalParseError {
                input: raw.to_string(),
                pattern: DATE_PATTERN,
                reason: e.to_string(),
            })
    }
}

/// chrono accepts unpadded fields; the grammar here is fixed width.
fn check_shape(raw: &str, shape: &str, pattern: &'static str) -> Result<(), TemporalParseError> {
    let fits = raw.len() == shape.len()
        && raw.bytes().zip(shape.bytes()).all(|(c, s)| match s {
            b'#' => c.is_ascii_digit(),
            _ => c == s,
        });
    if fits {
        Ok(())
    } else {
        Err(TemporalParseError {
            input: raw.to_string(),
            pattern,
            reason: "wrong layout".to_string(),
        })
    }
}

/// True when `end` is at or after `start`.
///
/// When only one side carries a time it is cut back to its date, so mixed
/// comparisons work at day granularity.
pub fn is_valid_duration(start: &Temporal, end: &Temporal) -> bool {
    match (start, end) {
        (Temporal::DateTime(s), Temporal::DateTime(e)) => e >= s,
        (Temporal::DateOnly(s), Temporal::DateOnly(e)) => e >= s,
        (Temporal::DateOnly(s), Temporal::DateTime(e)) => e.date() >= *s,
        (Temporal::DateTime(s), Temporal::DateOnly(e)) => *e >= s.date(),
    }
}

/// True when both values fall on the same day.
///
/// Two date-times must also agree on the time of day.
pub fn is_equal_date(start: &Temporal, end: &Temporal) -> bool {
    match (start, end) {
        (Temporal::DateTime(s), Temporal::DateTime(e)) => s == e,
        (Temporal::DateOnly(s), Temporal::DateOnly(e)) => s == e,
        (Temporal::DateOnly(s), Temporal::DateTime(e)) => e.date() == *s,
        (Temporal::DateTime(s), Temporal::DateOnly(e)) => *e == s.date(),
    }
}

/// `Mar 05 2024 09:07` for date-times, `Mar 05 2024` for dates.
pub fn format_for_display(value: &Temporal) -> String {
    match value {
        Temporal::DateOnly(d) => d.format(DATE_DISPLAY).to_string(),
        Temporal::DateTime(dt) => dt.format(DATE_TIME_DISPLAY).to_string(),
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_for_display(self))
    }
}

impl Serialize for Temporal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_raw())
    }
}

impl<'de> Deserialize<'de> for Temporal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}
