//! Month-by-month backfill searches.
//!
//! Two walks share the same per-month step (query, then drop not-yet-started
//! events in the current month):
//! - [`past_events_by_tag`] visits whole years and keeps everything it finds.
//! - [`past_month_events_by_tag`] stops as soon as a quota is met, within the
//!   current and the previous calendar year.
//!
//! # Invariants
//! - `now` is always supplied by the caller; no clock is read here.
//! - A failed month query is logged and counted as an empty month.
//! - An expired deadline ends the walk early with whatever was accumulated.

use crate::client::{Deadline, EventQuery, EventSource};
use crate::model::event::EventRecord;
use crate::model::month::MonthCursor;
use crate::search::timeline::{filter_past, sort_descending};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};

/// Upper bound on months the quota-bounded search will examine.
///
/// Only reached when the walk starts in December.
pub const QUOTA_HORIZON_MONTHS: u32 = 24;

/// Oldest month the quota-bounded search may query: January of the previous year.
pub fn quota_horizon_floor(now: &DateTime<Utc>) -> MonthCursor {
    MonthCursor::january(MonthCursor::from_now(now).year() - 1)
}

/// Why a backfill walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackfillStop {
    /// Requested number of events was reached.
    QuotaMet,
    /// Every month in the search window was visited.
    HorizonExhausted,
    /// Caller deadline expired before the next month query.
    Deadline,
}

impl BackfillStop {
    fn as_str(self) -> &'static str {
        match self {
            Self::QuotaMet => "quota_met",
            Self::HorizonExhausted => "horizon_exhausted",
            Self::Deadline => "deadline",
        }
    }
}

/// Collects every past event tagged `tag` over the last `years_back` years.
///
/// The current year is visited from the current month down to January, then
/// each earlier year from December down to January. Records are appended in
/// query order without a cross-month sort, so the result runs newest month
/// first while events inside one month keep catalog order.
///
/// Only the current month is filtered against `now`; earlier months are
/// entirely in the past. `years_back == 0` issues no query.
pub fn past_events_by_tag<S>(
    source: &S,
    tag: &str,
    years_back: u32,
    full: bool,
    now: DateTime<Utc>,
    deadline: Deadline,
) -> Vec<EventRecord>
where
    S: EventSource + ?Sized,
{
    let current = MonthCursor::from_now(&now);
    let mut events = Vec::new();
    let mut months_queried = 0_u32;
    let mut stop = BackfillStop::HorizonExhausted;

    'years: for offset in 0..years_back {
        let Ok(offset) = i32::try_from(offset) else {
            break;
        };
        let (mut cursor, month_limit) = if offset == 0 {
            (current, current.month())
        } else {
            (MonthCursor::december(current.year() - offset), 12)
        };

        for _ in 0..month_limit {
            if deadline.is_expired() {
                stop = BackfillStop::Deadline;
                break 'years;
            }
            events.extend(past_records_for_month(source, tag, cursor, full, now, deadline));
            months_queried += 1;
            cursor.step_back();
        }
    }

    info!(
        "event=backfill_done module=search variant=years status=ok tag={} years_back={} months={} count={} stop={}",
        tag,
        years_back,
        months_queried,
        events.len(),
        stop.as_str()
    );
    events
}

/// Collects up to `quota` of the most recent past events tagged `tag`.
///
/// Walks back one month at a time from the month containing `now` down to
/// January of the previous year, so at most `now.month() + 12` months are
/// queried. When a month holds more events than
/// still needed, its most recent ones are taken. The result is sorted most
/// recent first whichever way the walk ends; fewer than `quota` records is a
/// valid outcome.
pub fn past_month_events_by_tag<S>(
    source: &S,
    tag: &str,
    quota: u32,
    full: bool,
    now: DateTime<Utc>,
    deadline: Deadline,
) -> Vec<EventRecord>
where
    S: EventSource + ?Sized,
{
    let mut collected = Vec::new();
    if quota == 0 {
        return collected;
    }

    let mut cursor = MonthCursor::from_now(&now);
    let floor = quota_horizon_floor(&now);
    let mut remaining = quota as usize;
    let mut months_queried = 0_u32;
    let mut stop = BackfillStop::HorizonExhausted;

    for _ in 0..QUOTA_HORIZON_MONTHS {
        if cursor < floor {
            break;
        }
        if deadline.is_expired() {
            stop = BackfillStop::Deadline;
            break;
        }

        let mut month_events =
            sort_descending(past_records_for_month(source, tag, cursor, full, now, deadline));
        months_queried += 1;

        if month_events.len() >= remaining {
            month_events.truncate(remaining);
            collected.extend(month_events);
            stop = BackfillStop::QuotaMet;
            break;
        }

        remaining -= month_events.len();
        collected.extend(month_events);
        cursor.step_back();
    }

    let collected = sort_descending(collected);
    info!(
        "event=backfill_done module=search variant=quota status=ok tag={} quota={} months={} count={} stop={}",
        tag,
        quota,
        months_queried,
        collected.len(),
        stop.as_str()
    );
    collected
}

/// Queries one month and drops events that have not started yet.
///
/// Failures degrade to an empty month.
fn past_records_for_month<S>(
    source: &S,
    tag: &str,
    month: MonthCursor,
    full: bool,
    now: DateTime<Utc>,
    deadline: Deadline,
) -> Vec<EventRecord>
where
    S: EventSource + ?Sized,
{
    let query = EventQuery::tagged_in_month(tag, month, full);
    let records = match source.query(&query, deadline) {
        Ok(records) => records,
        Err(err) => {
            warn!(
                "event=month_query module=search status=degraded tag={} month={} error={}",
                tag, month, err
            );
            return Vec::new();
        }
    };

    let fetched = records.len();
    let records = if month.is_current_month(&now) {
        filter_past(records, now)
    } else {
        records
    };
    debug!(
        "event=month_query module=search status=ok tag={} month={} fetched={} kept={}",
        tag,
        month,
        fetched,
        records.len()
    );
    records
}
