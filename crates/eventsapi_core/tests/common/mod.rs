#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use eventsapi_core::{
    ClientError, ClientResult, Deadline, EventQuery, EventRecord, EventSource, MonthCursor,
};
use serde_json::json;
use std::cell::RefCell;

type MonthScript = Box<dyn Fn(MonthCursor) -> ClientResult<Vec<EventRecord>>>;

/// In-memory event source answering month-scoped queries from a script.
///
/// Records every query it receives so tests can assert the walk order.
pub struct ScriptedSource {
    script: MonthScript,
    calls: RefCell<Vec<EventQuery>>,
}

impl ScriptedSource {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(MonthCursor) -> ClientResult<Vec<EventRecord>> + 'static,
    {
        Self {
            script: Box::new(script),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Answers every month with `per_month` events on days `1..=per_month`.
    pub fn uniform(per_month: u32) -> Self {
        Self::new(move |month| Ok(events_in_month(month, per_month)))
    }

    pub fn calls(&self) -> Vec<EventQuery> {
        self.calls.borrow().clone()
    }

    /// Queried months in call order.
    pub fn months(&self) -> Vec<MonthCursor> {
        self.calls
            .borrow()
            .iter()
            .map(|query| query.month.expect("backfill queries are month scoped"))
            .collect()
    }
}

impl EventSource for ScriptedSource {
    fn query(&self, query: &EventQuery, _deadline: Deadline) -> ClientResult<Vec<EventRecord>> {
        self.calls.borrow_mut().push(query.clone());
        match query.month {
            Some(month) => (self.script)(month),
            None => Err(ClientError::InvalidRequest("unscoped query".to_string())),
        }
    }
}

pub fn month(month: u32, year: i32) -> MonthCursor {
    MonthCursor::new(month, year).unwrap()
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// Event starting at noon UTC, titled `YYYY-MM-DD`.
pub fn event_on(year: i32, month: u32, day: u32) -> EventRecord {
    let title = format!("{year:04}-{month:02}-{day:02}");
    serde_json::from_value(json!({
        "title": title,
        "start_time": format!("{title}T12:00:00Z"),
    }))
    .unwrap()
}

pub fn events_in_month(cursor: MonthCursor, count: u32) -> Vec<EventRecord> {
    (1..=count)
        .map(|day| event_on(cursor.year(), cursor.month(), day))
        .collect()
}

pub fn titles(records: &[EventRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| {
            record
                .get("title")
                .and_then(|value| value.as_str())
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}
