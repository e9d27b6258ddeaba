//! Inbound target datetime, with or without a UTC offset.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Offset-carrying layouts tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Layouts without an offset. `%.f` also matches an absent fraction.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// == Target DateTime ==
/// ISO-8601 datetime as received from a client.
///
/// A naive value is local time in whichever timezone the request resolves to;
/// an offset value names an absolute instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetDateTime {
    Naive(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

impl FromStr for TargetDateTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(TargetDateTime::Offset(dt));
        }
        for fmt in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
                return Ok(TargetDateTime::Offset(dt));
            }
        }
        for fmt in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(TargetDateTime::Naive(dt));
            }
        }
        if let Some(midnight) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Ok(TargetDateTime::Naive(midnight));
        }

        Err(format!("invalid ISO-8601 datetime: {s:?}"))
    }
}

impl fmt::Display for TargetDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetDateTime::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            TargetDateTime::Offset(dt) => {
                f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, false))
            }
        }
    }
}

impl<'de> Deserialize<'de> for TargetDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl Serialize for TargetDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_naive_with_seconds() {
        let parsed: TargetDateTime = "2025-12-31T23:59:59".parse().unwrap();
        match parsed {
            TargetDateTime::Naive(dt) => {
                assert_eq!(dt.year(), 2025);
                assert_eq!(dt.second(), 59);
            }
            other => panic!("expected naive, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_naive_space_and_minutes_only() {
        assert!(matches!(
            "2025-12-31 23:59:00".parse::<TargetDateTime>(),
            Ok(TargetDateTime::Naive(_))
        ));
        assert!(matches!(
            "2025-12-31T23:59".parse::<TargetDateTime>(),
            Ok(TargetDateTime::Naive(_))
        ));
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let parsed: TargetDateTime = "2025-12-31T23:59:59.250".parse().unwrap();
        match parsed {
            TargetDateTime::Naive(dt) => assert_eq!(dt.nanosecond(), 250_000_000),
            other => panic!("expected naive, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_with_offset() {
        let parsed: TargetDateTime = "2025-12-31T23:59:59+02:00".parse().unwrap();
        match parsed {
            TargetDateTime::Offset(dt) => assert_eq!(dt.offset().local_minus_utc(), 7200),
            other => panic!("expected offset, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_zulu() {
        assert!(matches!(
            "2025-12-31T23:59:59Z".parse::<TargetDateTime>(),
            Ok(TargetDateTime::Offset(_))
        ));
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let parsed: TargetDateTime = "2026-01-01".parse().unwrap();
        match parsed {
            TargetDateTime::Naive(dt) => assert_eq!(dt.hour(), 0),
            other => panic!("expected naive, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!("next tuesday".parse::<TargetDateTime>().is_err());
        assert!("2025-13-01T00:00:00".parse::<TargetDateTime>().is_err());
    }

    #[test]
    fn test_deserialize_from_json() {
        let parsed: TargetDateTime = serde_json::from_str(r#""2025-12-31T23:59:59""#).unwrap();
        assert_eq!(parsed.to_string(), "2025-12-31T23:59:59");
    }
}
