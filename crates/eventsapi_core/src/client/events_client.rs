//! Catalog client combining config with fetch/parse strategies.

use crate::client::endpoint::{redacted_url, EndpointRequest};
use crate::client::fetch::{Fetcher, HttpFetcher, JsonParser, Parser};
use crate::client::{ClientError, ClientResult, Deadline, EventQuery, EventSource};
use crate::config::ClientConfig;
use crate::model::event::EventRecord;
use log::{debug, warn};

/// Events catalog client.
///
/// Generic over the fetch and parse strategies so applications can plug in
/// their own transport (or test doubles) without touching URL construction.
pub struct EventsClient<F = HttpFetcher, P = JsonParser> {
    config: ClientConfig,
    fetcher: F,
    parser: P,
}

impl EventsClient<HttpFetcher, JsonParser> {
    /// Builds a client with blocking HTTP GET and JSON decoding.
    pub fn http(config: ClientConfig) -> ClientResult<Self> {
        config
            .validate()
            .map_err(|err| ClientError::InvalidRequest(err.to_string()))?;
        let fetcher = HttpFetcher::new(config.request_timeout())?;
        Ok(Self::new(config, fetcher, JsonParser))
    }
}

impl<F: Fetcher, P: Parser> EventsClient<F, P> {
    pub fn new(config: ClientConfig, fetcher: F, parser: P) -> Self {
        Self {
            config,
            fetcher,
            parser,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Swaps the fetch strategy, keeping config and parser.
    pub fn with_fetcher<G: Fetcher>(self, fetcher: G) -> EventsClient<G, P> {
        EventsClient {
            config: self.config,
            fetcher,
            parser: self.parser,
        }
    }

    /// Swaps the parse strategy, keeping config and fetcher.
    pub fn with_parser<Q: Parser>(self, parser: Q) -> EventsClient<F, Q> {
        EventsClient {
            config: self.config,
            fetcher: self.fetcher,
            parser,
        }
    }

    /// Fetches and decodes one endpoint.
    ///
    /// # Errors
    /// - `DeadlineExceeded` when `deadline` has already passed; nothing is sent.
    /// - `InvalidRequest` when the URL cannot be built from config.
    /// - Any fetcher or parser failure, unchanged.
    pub fn fetch_records(
        &self,
        request: &EndpointRequest,
        deadline: Deadline,
    ) -> ClientResult<Vec<EventRecord>> {
        if deadline.is_expired() {
            return Err(ClientError::DeadlineExceeded);
        }

        let url = request.build_url(&self.config)?;
        debug!(
            "event=endpoint_fetch module=client status=start url={}",
            redacted_url(&url)
        );

        let outcome = self
            .fetcher
            .fetch(&url, deadline)
            .and_then(|body| self.parser.parse(&body));
        match &outcome {
            Ok(records) => debug!(
                "event=endpoint_fetch module=client status=ok path={} count={}",
                request.path(),
                records.len()
            ),
            Err(err) => warn!(
                "event=endpoint_fetch module=client status=error path={} error={}",
                request.path(),
                err
            ),
        }
        outcome
    }
}

impl<F: Fetcher, P: Parser> EventSource for EventsClient<F, P> {
    fn query(&self, query: &EventQuery, deadline: Deadline) -> ClientResult<Vec<EventRecord>> {
        self.fetch_records(&EndpointRequest::from_query(query), deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::EventsClient;
    use crate::client::fetch::JsonParser;
    use crate::client::{ClientError, ClientResult, Deadline, EventQuery, EventSource};
    use crate::config::ClientConfig;
    use reqwest::Url;
    use std::time::{Duration, Instant};

    #[test]
    fn http_client_rejects_invalid_config() {
        let result = EventsClient::http(ClientConfig::new(" "));
        assert!(matches!(result, Err(ClientError::InvalidRequest(_))));
    }

    #[test]
    fn expired_deadline_skips_fetcher() {
        let fetcher = |_: &Url, _: Deadline| -> ClientResult<String> {
            panic!("fetcher must not run after the deadline")
        };
        let client = EventsClient::new(ClientConfig::new("k"), fetcher, JsonParser);
        let expired = Deadline::at(Instant::now() - Duration::from_millis(1));
        let result = client.query(&EventQuery::tagged("x", false), expired);
        assert_eq!(result, Err(ClientError::DeadlineExceeded));
    }
}
