//! Catalog endpoint client.
//!
//! # Responsibility
//! - Define the `EventSource` contract consumed by the backfill searches.
//! - Build endpoint URLs as pure values and execute them through pluggable
//!   fetch/parse strategies.
//!
//! # Invariants
//! - Transport and decode failures surface as one `ClientError`; callers in
//!   `search` only observe presence or absence of a failure.
//! - No request is issued once the caller's deadline has expired.

use crate::model::event::EventRecord;
use crate::model::month::MonthCursor;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod deadline;
pub mod endpoint;
pub mod events_client;
pub mod fetch;

pub use deadline::Deadline;

pub type ClientResult<T> = Result<T, ClientError>;

/// Failure at the endpoint client boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Request could not be expressed as a URL.
    InvalidRequest(String),
    /// Connection, TLS, timeout or body read failure.
    Transport(String),
    /// Catalog answered with a non-success status code.
    HttpStatus(u16),
    /// Body was not a JSON array of event objects.
    Parse(String),
    /// Caller deadline elapsed before the request was issued.
    DeadlineExceeded,
}

impl ClientError {
    /// Returns whether this failure happened while talking to the catalog.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::HttpStatus(_) | Self::DeadlineExceeded
        )
    }

    /// Returns whether this failure happened while decoding a response.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest(message) => write!(f, "invalid catalog request: {message}"),
            Self::Transport(message) => write!(f, "catalog transport failure: {message}"),
            Self::HttpStatus(status) => write!(f, "catalog returned status {status}"),
            Self::Parse(message) => write!(f, "catalog response decode failed: {message}"),
            Self::DeadlineExceeded => write!(f, "deadline exceeded before catalog request"),
        }
    }
}

impl Error for ClientError {}

/// One logical catalog query: events tagged `tag`, optionally scoped to a month.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventQuery {
    pub tag: String,
    /// Restricts results to events occurring within this month.
    pub month: Option<MonthCursor>,
    /// Requests the full event detail payload. Never changes which events match.
    pub full: bool,
}

impl EventQuery {
    pub fn tagged(tag: impl Into<String>, full: bool) -> Self {
        Self {
            tag: tag.into(),
            month: None,
            full,
        }
    }

    pub fn tagged_in_month(tag: impl Into<String>, month: MonthCursor, full: bool) -> Self {
        Self {
            tag: tag.into(),
            month: Some(month),
            full,
        }
    }
}

/// Source of catalog events, queried once per month by the backfill searches.
pub trait EventSource {
    /// Executes one query and returns the matching records in catalog order.
    fn query(&self, query: &EventQuery, deadline: Deadline) -> ClientResult<Vec<EventRecord>>;
}

impl<S: EventSource + ?Sized> EventSource for &S {
    fn query(&self, query: &EventQuery, deadline: Deadline) -> ClientResult<Vec<EventRecord>> {
        (**self).query(query, deadline)
    }
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn query(&self, query: &EventQuery, deadline: Deadline) -> ClientResult<Vec<EventRecord>> {
        (**self).query(query, deadline)
    }
}
