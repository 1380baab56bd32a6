//! Pure endpoint URL construction.
//!
//! # Responsibility
//! - Describe catalog requests as values (path segments + display/filter flags).
//! - Render them into absolute URLs for a given `ClientConfig`.
//!
//! # Invariants
//! - Building a URL never mutates shared state; two identical requests always
//!   render the same URL.
//! - Caller-supplied path segments (tags) are percent-encoded as one segment.
//! - Query parameter order is `auth_token`, `full`, `filter`, `month`, `year`.

use crate::client::{ClientError, ClientResult, EventQuery};
use crate::config::ClientConfig;
use crate::model::month::MonthCursor;
use reqwest::Url;

/// Path of the tagged all-events listing, before the tag segment.
pub const TAGGED_EVENTS_PATH: [&str; 3] = ["events", "all", "tagged"];

const AUTH_TOKEN_PARAM: &str = "auth_token";
const REDACTED: &str = "***";

/// One catalog request, independent of credentials and host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRequest {
    segments: Vec<String>,
    full: bool,
    month_filter: Option<MonthCursor>,
}

impl EndpointRequest {
    /// Request for `events/all/tagged/<tag>`.
    pub fn tagged_events(tag: &str, month_filter: Option<MonthCursor>, full: bool) -> Self {
        let mut segments: Vec<String> = TAGGED_EVENTS_PATH
            .iter()
            .map(|segment| segment.to_string())
            .collect();
        segments.push(tag.to_string());
        Self {
            segments,
            full,
            month_filter,
        }
    }

    pub fn from_query(query: &EventQuery) -> Self {
        Self::tagged_events(&query.tag, query.month, query.full)
    }

    /// Unencoded relative path, for diagnostics.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    pub fn month_filter(&self) -> Option<MonthCursor> {
        self.month_filter
    }

    /// Query parameters in wire order.
    pub fn query_params(&self, api_key: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![(AUTH_TOKEN_PARAM, api_key.to_string())];
        if self.full {
            params.push(("full", "true".to_string()));
        }
        if let Some(month) = self.month_filter {
            params.push(("filter", "month".to_string()));
            params.push(("month", month.month().to_string()));
            params.push(("year", month.year().to_string()));
        }
        params
    }

    /// Renders `<scheme>://<host>/<api_path>/<path>.<format>?<params>`.
    pub fn build_url(&self, config: &ClientConfig) -> ClientResult<Url> {
        let base = format!("{}://{}/", config.scheme, config.hostname.trim());
        let mut url = Url::parse(&base)
            .map_err(|err| ClientError::InvalidRequest(format!("bad base url `{base}`: {err}")))?;

        let Some((last, leading)) = self.segments.split_last() else {
            return Err(ClientError::InvalidRequest(
                "endpoint path is empty".to_string(),
            ));
        };

        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ClientError::InvalidRequest(format!("base url `{base}` cannot carry a path"))
            })?;
            path.clear();
            path.extend(
                config
                    .api_path
                    .split('/')
                    .filter(|segment| !segment.is_empty()),
            );
            path.extend(leading.iter());
            path.push(&format!("{last}.{}", config.format));
        }

        url.query_pairs_mut()
            .extend_pairs(self.query_params(&config.api_key));
        Ok(url)
    }
}

/// Renders `url` with the `auth_token` value masked, for logging.
pub fn redacted_url(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == AUTH_TOKEN_PARAM {
                REDACTED.to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    if pairs.is_empty() {
        return redacted.to_string();
    }
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
