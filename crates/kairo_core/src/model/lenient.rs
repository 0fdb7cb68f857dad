//! Tolerant field decoders for persisted and dispatched payloads.
//!
//! Stored values come from older builds and from form inputs that write empty
//! strings for unset fields. These helpers map such values to `None` instead of
//! failing the whole slice.

use chrono::{DateTime, NaiveDate, Utc};
use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Decodes an optional string, treating blank text as absent.
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(normalize_text(Option::<String>::deserialize(deserializer)?))
}

/// Trims `value`; blank text becomes `None`.
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Decodes an optional `YYYY-MM-DD` date.
///
/// Accepts full ISO timestamps by keeping the date prefix. Blank and
/// unparsable values decode to `None`.
pub(crate) fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = optional_text(deserializer)?;
    Ok(raw.and_then(|value| {
        let parsed = parse_iso_date(&value);
        if parsed.is_none() {
            warn!("event=decode_date module=model status=fallback value_len={}", value.len());
        }
        parsed
    }))
}

/// Decodes a mandatory date, accepting the same shapes as [`optional_date`].
pub(crate) fn required_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_iso_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid ISO date `{raw}`")))
}

/// Decodes an optional RFC 3339 timestamp; unparsable values become `None`.
pub(crate) fn optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = optional_text(deserializer)?;
    Ok(raw.and_then(|value| {
        DateTime::parse_from_rfc3339(&value)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc))
    }))
}

/// Decodes a mandatory timestamp without failing the record.
///
/// Accepts RFC 3339 text, a bare `YYYY-MM-DD` date (read as UTC midnight) and
/// epoch milliseconds. Anything else decodes to the Unix epoch.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let parsed = match &raw {
        Value::String(text) => parse_timestamp(text),
        Value::Number(number) => number
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(|| {
        warn!("event=decode_timestamp module=model status=fallback");
        DateTime::<Utc>::default()
    }))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|midnight| midnight.and_utc())
        })
}

/// Parses the date part of an ISO date or timestamp string.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, ISO_DATE_FORMAT).ok()
}
