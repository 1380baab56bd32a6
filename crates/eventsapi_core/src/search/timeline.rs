//! Pure filtering and ordering of event records by start time.

use crate::model::event::EventRecord;
use chrono::{DateTime, Utc};

/// Keeps records whose start time is strictly before `now`.
///
/// Records with a missing or malformed start time are dropped.
pub fn filter_past(records: Vec<EventRecord>, now: DateTime<Utc>) -> Vec<EventRecord> {
    records
        .into_iter()
        .filter(|record| record.started_before(now))
        .collect()
}

/// Stable sort by start time, most recent first.
///
/// Records without a usable start time sink to the end, keeping their
/// relative order.
pub fn sort_descending(records: Vec<EventRecord>) -> Vec<EventRecord> {
    let mut keyed: Vec<_> = records
        .into_iter()
        .map(|record| (record.start_time(), record))
        .collect();
    keyed.sort_by(|(left, _), (right, _)| right.cmp(left));
    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_past, sort_descending};
    use crate::model::event::EventRecord;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn titled(title: &str, start_time: &str) -> EventRecord {
        serde_json::from_value(json!({"title": title, "start_time": start_time})).unwrap()
    }

    fn titles(records: &[EventRecord]) -> Vec<&str> {
        records
            .iter()
            .map(|record| record.get("title").and_then(|v| v.as_str()).unwrap_or(""))
            .collect()
    }

    #[test]
    fn filter_is_strictly_before_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let kept = filter_past(
            vec![
                titled("before", "2024-03-09T23:59:59Z"),
                titled("exactly", "2024-03-10"),
                titled("after", "2024-03-10T00:00:01Z"),
            ],
            now,
        );
        assert_eq!(titles(&kept), vec!["before"]);
    }

    #[test]
    fn sort_keeps_equal_timestamps_in_input_order() {
        let sorted = sort_descending(vec![
            titled("a", "2024-01-01"),
            titled("b", "2024-02-01"),
            titled("c", "2024-01-01"),
            titled("broken", "soon"),
            titled("d", "2024-02-01"),
        ]);
        assert_eq!(titles(&sorted), vec!["b", "d", "a", "c", "broken"]);
    }
}
