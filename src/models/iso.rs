//! ISO-8601 timestamp codec and lenient integer coercion shared by the serde impls.
//!
//! Timestamps are naive (no UTC offset). Formatting always uses `T` as the separator and
//! prints a fractional part only when the seconds are not whole, so a formatted value parses
//! back to an equal instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const ACCEPTED: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const ACCEPTED_WITH_OFFSET: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

pub fn format(datetime: &NaiveDateTime) -> String {
    datetime.format(FORMAT).to_string()
}

/// Parses a timestamp; a bare date is read as midnight of that day.
///
/// A UTC offset (`+01:00`, `Z`) is accepted and dropped: the wall-clock time is kept as
/// written, so `2024-01-09T00:00:00+05:00` reads as `2024-01-09T00:00:00`.
pub fn parse(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let text = text.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(datetime.naive_local());
    }
    for pattern in ACCEPTED_WITH_OFFSET {
        if let Ok(datetime) = DateTime::parse_from_str(text, pattern) {
            return Ok(datetime.naive_local());
        }
    }
    for pattern in ACCEPTED {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, pattern) {
            return Ok(datetime);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map(|date| date.and_time(NaiveTime::MIN))
}

pub fn serialize<S: Serializer>(datetime: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(datetime))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(|e| D::Error::custom(format!("invalid timestamp {:?}: {}", text, e)))
}

/// Adapter for optional timestamps. Pair with `skip_serializing_if = "Option::is_none"` and
/// `default` so an absent key means `None`.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        datetime: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match datetime {
            Some(datetime) => super::serialize(datetime, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        super::deserialize(deserializer).map(Some)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntLike {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Reads an integer from an integer, a float with no fractional part, or a numeric string.
pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match IntLike::deserialize(deserializer)? {
        IntLike::Int(value) => Ok(value),
        IntLike::Float(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            Ok(value as i64)
        }
        IntLike::Float(value) => Err(D::Error::custom(format!("expected an integer, got {}", value))),
        IntLike::Text(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("expected an integer, got {:?}", text))),
    }
}

/// A box number: an integer of at least 1.
pub fn box_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = int(deserializer)?;
    usize::try_from(value)
        .ok()
        .filter(|&n| n >= 1)
        .ok_or_else(|| D::Error::custom(format!("box must be at least 1, got {}", value)))
}
