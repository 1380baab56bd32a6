//! Core client for the events catalog.
//! This crate owns the past-event backfill searches and their invariants.

pub mod client;
pub mod config;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;

pub use client::endpoint::{redacted_url, EndpointRequest};
pub use client::events_client::EventsClient;
pub use client::fetch::{Fetcher, HttpFetcher, JsonParser, Parser};
pub use client::{ClientError, ClientResult, Deadline, EventQuery, EventSource};
pub use config::{ClientConfig, ConfigError, ConfigResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{parse_start_time, EventRecord};
pub use model::month::{InvalidMonth, MonthCursor};
pub use reqwest::Url;
pub use search::backfill::{
    past_events_by_tag, past_month_events_by_tag, quota_horizon_floor, QUOTA_HORIZON_MONTHS,
};
pub use search::timeline::{filter_past, sort_descending};
pub use service::event_service::{EventService, EventServiceError, DEFAULT_PAST_EVENT_QUOTA};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
