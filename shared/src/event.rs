use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const APPROVED_STATUS: &str = "approved";
pub const DEFAULT_LOCATION: &str = "TBD";
pub const DEFAULT_DESCRIPTION: &str = "No details available.";
pub const DEFAULT_LINK: &str = "#";

/// Date as provided by the source, with the instant it parsed to (if any).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventDate {
    raw: String,
    parsed: Option<DateTime<Utc>>,
}

impl EventDate {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = parse_instant(raw.trim());
        Self { raw, parsed }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub const fn instant(&self) -> Option<DateTime<Utc>> {
        self.parsed
    }

    /// `Fri, January 10, 2025`, or the raw string when it didn't parse.
    pub fn display(&self) -> String {
        match self.parsed {
            Some(instant) => instant.format("%a, %B %-d, %Y").to_string(),
            None => self.raw.clone(),
        }
    }

    pub fn is_after(&self, now: DateTime<Utc>) -> bool {
        self.parsed.is_some_and(|instant| instant > now)
    }

    // Unparsable dates are greater than any valid one and equal to each other.
    fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self.parsed, other.parsed) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl Serialize for EventDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for EventDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::parse(lenient_string(deserializer)?.unwrap_or_default()))
    }
}

// Spreadsheet-backed sources send numbers and booleans where strings are expected.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,
    #[serde(default)]
    pub date: EventDate,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
}

impl EventRecord {
    pub fn is_approved(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|status| status.trim().eq_ignore_ascii_case(APPROVED_STATUS))
    }

    pub fn location_or_default(&self) -> &str {
        non_empty(&self.location).unwrap_or(DEFAULT_LOCATION)
    }

    pub fn description_or_default(&self) -> &str {
        non_empty(&self.description).unwrap_or(DEFAULT_DESCRIPTION)
    }

    pub fn link_or_default(&self) -> &str {
        non_empty(&self.link).unwrap_or(DEFAULT_LINK)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Filters (remote data only) and sorts events by ascending date. The input
/// is left untouched.
pub fn prepare(records: &[EventRecord], source_is_remote: bool) -> Vec<EventRecord> {
    let mut events: Vec<EventRecord> = records
        .iter()
        .filter(|event| !source_is_remote || event.is_approved())
        .cloned()
        .collect();
    events.sort_by(|a, b| a.date.sort_cmp(&b.date));
    events
}

/// Position of the first event strictly after `now`.
pub fn next_upcoming(sorted: &[EventRecord], now: DateTime<Utc>) -> Option<usize> {
    sorted.iter().position(|event| event.date.is_after(now))
}
