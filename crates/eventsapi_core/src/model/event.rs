//! Catalog event record.
//!
//! # Responsibility
//! - Carry one event object exactly as the catalog returned it.
//! - Interpret the `start_time` field for past/upcoming decisions.
//!
//! # Invariants
//! - Every field except `start_time` is opaque to core.
//! - A missing, non-string or unparseable `start_time` reads as `None` and
//!   never raises an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name the catalog uses for event start timestamps.
pub const START_TIME_FIELD: &str = "start_time";

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One event object from the catalog.
///
/// Serialized transparently, so a record written back out is the same JSON
/// object the catalog produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventRecord {
    fields: Map<String, Value>,
}

impl EventRecord {
    /// Wraps an already-decoded JSON object.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Convenience constructor for records that only need a start time.
    pub fn with_start_time(start_time: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(
            START_TIME_FIELD.to_string(),
            Value::String(start_time.into()),
        );
        Self { fields }
    }

    /// Returns one raw field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns all raw fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Returns the raw `start_time` string, if present and a string.
    pub fn raw_start_time(&self) -> Option<&str> {
        self.fields.get(START_TIME_FIELD).and_then(Value::as_str)
    }

    /// Returns the parsed start time, or `None` when it is missing or malformed.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.raw_start_time().and_then(parse_start_time)
    }

    /// Returns whether this event started strictly before `now`.
    ///
    /// Records without a usable start time are never past.
    pub fn started_before(&self, now: DateTime<Utc>) -> bool {
        self.start_time().is_some_and(|start| start < now)
    }
}

impl From<Map<String, Value>> for EventRecord {
    fn from(value: Map<String, Value>) -> Self {
        Self::from_fields(value)
    }
}

/// Parses a catalog timestamp.
///
/// Accepted shapes:
/// - RFC 3339 (`2024-03-10T18:00:00+11:00`, `2024-03-10T07:00:00Z`)
/// - date-time with numeric offset (`2024-03-10 18:00:00+1100`)
/// - naive date-time (`2024-03-10T18:00:00`, `2024-03-10 18:00`), read as UTC
/// - bare date (`2024-03-10`), read as UTC midnight
pub fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use super::{parse_start_time, EventRecord};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_start_time("2024-03-10T18:00:00+11:00").expect("rfc3339 parses");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 10, 7, 0, 0).unwrap());
    }

    #[test]
    fn parses_naive_and_date_only_as_utc() {
        assert_eq!(
            parse_start_time("2024-03-10 18:30:00"),
            Some(Utc.with_ymd_and_hms(2024, 3, 10, 18, 30, 0).unwrap())
        );
        assert_eq!(
            parse_start_time("2024-03-10"),
            Some(Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn malformed_values_read_as_none() {
        assert_eq!(parse_start_time(""), None);
        assert_eq!(parse_start_time("next tuesday"), None);
        assert_eq!(parse_start_time("2024-13-40"), None);
    }

    #[test]
    fn non_string_start_time_is_ignored() {
        let record: EventRecord =
            serde_json::from_value(json!({"title": "x", "start_time": 1710028800})).unwrap();
        assert_eq!(record.raw_start_time(), None);
        assert_eq!(record.start_time(), None);
        assert!(!record.started_before(Utc::now()));
    }

    #[test]
    fn record_round_trips_unknown_fields() {
        let source = json!({
            "id": 42,
            "title": "Public lecture",
            "start_time": "2024-03-10T18:00:00+11:00",
            "tags": ["science"]
        });
        let record: EventRecord = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(record.get("title"), Some(&json!("Public lecture")));
        assert_eq!(serde_json::to_value(&record).unwrap(), source);
    }
}
