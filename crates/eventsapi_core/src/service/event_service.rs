//! Past-event use-case service.
//!
//! # Responsibility
//! - Provide the two past-event entry points over any `EventSource`.
//! - Normalize tags and reject unusable bounds before any query is issued.
//! - Supply the current time and an optional wall-clock budget.
//!
//! # Invariants
//! - Validation errors are the only errors surfaced; catalog failures degrade
//!   to shorter results inside the search.
//! - `*_at` variants never read the system clock.

use crate::client::{Deadline, EventSource};
use crate::model::event::EventRecord;
use crate::search::backfill::{past_events_by_tag, past_month_events_by_tag};
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Quota used when callers do not pick one.
pub const DEFAULT_PAST_EVENT_QUOTA: u32 = 5;

/// Service error for past-event use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventServiceError {
    /// Tag is empty after trimming.
    InvalidTag(String),
    /// Quota must be at least one.
    InvalidQuota(u32),
}

impl Display for EventServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTag(value) => write!(f, "invalid tag: `{value}`"),
            Self::InvalidQuota(value) => write!(f, "quota must be at least 1, got {value}"),
        }
    }
}

impl Error for EventServiceError {}

/// Past-event service facade over an event source.
pub struct EventService<S: EventSource> {
    source: S,
    time_budget: Option<Duration>,
}

impl<S: EventSource> EventService<S> {
    /// Creates a service with no wall-clock budget.
    pub fn new(source: S) -> Self {
        Self {
            source,
            time_budget: None,
        }
    }

    /// Bounds the total time of each search started through this service.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Every past event tagged `tag` over the last `years_back` years.
    ///
    /// See [`past_events_by_tag`] for ordering.
    pub fn past_events_by_tag(
        &self,
        tag: &str,
        years_back: u32,
        full: bool,
    ) -> Result<Vec<EventRecord>, EventServiceError> {
        self.past_events_by_tag_at(tag, years_back, full, Utc::now(), self.deadline())
    }

    /// [`Self::past_events_by_tag`] with an explicit clock and deadline.
    pub fn past_events_by_tag_at(
        &self,
        tag: &str,
        years_back: u32,
        full: bool,
        now: DateTime<Utc>,
        deadline: Deadline,
    ) -> Result<Vec<EventRecord>, EventServiceError> {
        let tag = normalize_tag(tag)?;
        Ok(past_events_by_tag(
            &self.source,
            tag,
            years_back,
            full,
            now,
            deadline,
        ))
    }

    /// Up to `quota` most recent past events tagged `tag`, newest first.
    pub fn past_month_events_by_tag(
        &self,
        tag: &str,
        quota: u32,
        full: bool,
    ) -> Result<Vec<EventRecord>, EventServiceError> {
        self.past_month_events_by_tag_at(tag, quota, full, Utc::now(), self.deadline())
    }

    /// [`Self::past_month_events_by_tag`] with an explicit clock and deadline.
    pub fn past_month_events_by_tag_at(
        &self,
        tag: &str,
        quota: u32,
        full: bool,
        now: DateTime<Utc>,
        deadline: Deadline,
    ) -> Result<Vec<EventRecord>, EventServiceError> {
        let tag = normalize_tag(tag)?;
        if quota == 0 {
            return Err(EventServiceError::InvalidQuota(quota));
        }
        Ok(past_month_events_by_tag(
            &self.source,
            tag,
            quota,
            full,
            now,
            deadline,
        ))
    }

    fn deadline(&self) -> Deadline {
        self.time_budget.map_or_else(Deadline::none, Deadline::after)
    }
}

/// Trims a caller tag, rejecting blank values.
pub fn normalize_tag(tag: &str) -> Result<&str, EventServiceError> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        return Err(EventServiceError::InvalidTag(tag.to_string()));
    }
    Ok(trimmed)
}
