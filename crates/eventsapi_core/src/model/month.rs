//! Month-scoped query window.
//!
//! # Responsibility
//! - Represent one `(month, year)` catalog query scope.
//! - Step backward through calendar months across year boundaries.
//!
//! # Invariants
//! - `month` is always in `1..=12`.
//! - Stepping back from January lands on December of the previous year.

use chrono::{DateTime, Datelike, TimeZone};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected month value for [`MonthCursor::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMonth(pub u32);

impl Display for InvalidMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "month must be within 1..=12, got {}", self.0)
    }
}

impl Error for InvalidMonth {}

/// Calendar month cursor used to walk backward through the catalog.
///
/// Ordering is chronological (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// Creates a cursor, validating the month range.
    pub fn new(month: u32, year: i32) -> Result<Self, InvalidMonth> {
        if !(1..=12).contains(&month) {
            return Err(InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Captures the month containing `now`.
    pub fn from_now<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    /// January of `year`.
    pub fn january(year: i32) -> Self {
        Self { year, month: 1 }
    }

    /// December of `year`.
    pub fn december(year: i32) -> Self {
        Self { year, month: 12 }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Moves this cursor one calendar month back, in place.
    pub fn step_back(&mut self) {
        if self.month == 1 {
            self.month = 12;
            self.year -= 1;
        } else {
            self.month -= 1;
        }
    }

    /// Returns the month before this one.
    pub fn previous(self) -> Self {
        let mut cursor = self;
        cursor.step_back();
        cursor
    }

    /// Returns whether this cursor is the month containing `now`.
    ///
    /// Only that month can still hold events that have not started yet.
    pub fn is_current_month<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.month == now.month() && self.year == now.year()
    }
}

impl Display for MonthCursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
