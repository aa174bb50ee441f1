//! UTC datestamps as used in selective harvesting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A datestamp argument, either day or seconds granularity.
///
/// Accepted forms are `YYYY-MM-DD`, `YYYY-MM-DDThh:mm:ssZ`, RFC 3339 with an
/// explicit offset, and `YYYY-MM-DDThh:mm:ss` (read as UTC).
///
/// # Example
///
/// ```
/// use oai_pmh_core::Datestamp;
///
/// let day: Datestamp = "2001-12-14".parse().unwrap();
/// assert_eq!(day.start().to_rfc3339(), "2001-12-14T00:00:00+00:00");
/// assert_eq!(day.end().to_rfc3339(), "2001-12-14T23:59:59+00:00");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Datestamp {
    Day(NaiveDate),
    Seconds(DateTime<Utc>),
}

impl Datestamp {
    /// Parse a datestamp string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string matches none of the accepted forms.
    pub fn parse(s: &str) -> Result<Self, Error> {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Datestamp::Day(date));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Datestamp::Seconds(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Ok(Datestamp::Seconds(naive.and_utc()));
        }

        Err(InvalidInputError::Datestamp {
            value: s.to_string(),
            reason: "expected YYYY-MM-DD or YYYY-MM-DDThh:mm:ssZ".to_string(),
        }
        .into())
    }

    /// Returns the earliest instant covered by this datestamp.
    pub fn start(&self) -> DateTime<Utc> {
        match self {
            Datestamp::Day(date) => date.and_time(NaiveTime::default()).and_utc(),
            Datestamp::Seconds(dt) => *dt,
        }
    }

    /// Returns the latest instant covered by this datestamp.
    ///
    /// A day covers everything up to and including `23:59:59`.
    pub fn end(&self) -> DateTime<Utc> {
        match self {
            Datestamp::Day(_) => self.start() + TimeDelta::seconds(86_399),
            Datestamp::Seconds(dt) => *dt,
        }
    }

    /// Format an instant at seconds granularity (`YYYY-MM-DDThh:mm:ssZ`).
    pub fn format_utc(dt: &DateTime<Utc>) -> String {
        dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl fmt::Display for Datestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datestamp::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Datestamp::Seconds(dt) => f.write_str(&Self::format_utc(dt)),
        }
    }
}

impl FromStr for Datestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Datestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Datestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Datestamp::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_granularity() {
        let ds = Datestamp::parse("2001-12-14").unwrap();
        assert!(matches!(ds, Datestamp::Day(_)));
        assert_eq!(ds.to_string(), "2001-12-14");
    }

    #[test]
    fn parses_seconds_granularity() {
        let ds = Datestamp::parse("2001-12-14T10:20:30Z").unwrap();
        assert_eq!(ds.to_string(), "2001-12-14T10:20:30Z");
        assert_eq!(ds.start(), ds.end());
    }

    #[test]
    fn normalizes_offsets_to_utc() {
        let ds = Datestamp::parse("2001-12-14T10:20:30+02:00").unwrap();
        assert_eq!(ds.to_string(), "2001-12-14T08:20:30Z");
    }

    #[test]
    fn naive_datetime_is_utc() {
        let ds = Datestamp::parse("2001-12-14T10:20:30").unwrap();
        assert_eq!(ds.to_string(), "2001-12-14T10:20:30Z");
    }

    #[test]
    fn day_spans_whole_day() {
        let ds = Datestamp::parse("2020-02-29").unwrap();
        assert_eq!(Datestamp::format_utc(&ds.start()), "2020-02-29T00:00:00Z");
        assert_eq!(Datestamp::format_utc(&ds.end()), "2020-02-29T23:59:59Z");
    }

    #[test]
    fn deserializes_from_string() {
        let ds: Datestamp = serde_json::from_str("\"1999-01-01\"").unwrap();
        assert_eq!(ds, Datestamp::Day(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Datestamp::parse("yesterday").is_err());
        assert!(Datestamp::parse("2001-13-01").is_err());
        assert!(Datestamp::parse("").is_err());
    }
}
